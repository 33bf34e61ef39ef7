//! Parallax engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the small 3D scene
//! layer (transforms, camera, textured objects) used by the demo binary.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod math;
pub mod camera;
pub mod render;
pub mod scene;

pub use glam;
pub use wgpu;
