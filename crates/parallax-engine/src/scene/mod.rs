//! Scene objects.
//!
//! Responsibilities:
//! - build indexed meshes with a per-triangle tangent frame (`Geometry`)
//! - pair geometry with surface maps, a transform and shading toggles (`Object`)
//! - own the frame's object list and draw it in one pass (`ObjectManager`)

mod geometry;
mod object;
mod object_manager;

pub use geometry::{Geometry, GeometryError};
pub use object::{Object, DEFAULT_DEPTH_SCALE, DEFAULT_LIGHT_POSITION};
pub use object_manager::ObjectManager;
