//! Fly camera and projection.
//!
//! The camera owns eye position and orientation; `Projection` owns lens
//! parameters. `FrameView` snapshots both once per frame for the scene.

mod camera;
mod frame_view;
mod projection;

pub use camera::Camera;
pub use frame_view::FrameView;
pub use projection::Projection;
