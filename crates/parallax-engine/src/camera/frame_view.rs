use glam::{Mat4, Vec3};

use super::{Camera, Projection};

/// Camera matrices for one frame.
///
/// Built once per frame and handed to every object's `update`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameView {
    pub view: Mat4,
    pub projection: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
}

impl FrameView {
    pub fn new(camera: &Camera, projection: &Projection, width: u32, height: u32) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: projection.matrix(Projection::aspect(width, height)),
            eye: camera.eye_position(),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}
