use glam::Mat4;

/// Perspective lens parameters.
///
/// Produces right-handed projections with a `[0, 1]` depth range, which is what
/// wgpu expects; no OpenGL-to-wgpu correction matrix is needed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        debug_assert!(near > 0.0 && far > near);
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
        }
    }

    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Aspect ratio of a drawable; a zero-sized drawable is treated as 1×1.
    pub fn aspect(width: u32, height: u32) -> f32 {
        width.max(1) as f32 / height.max(1) as f32
    }
}

impl Default for Projection {
    /// 45° vertical field of view; nothing nearer than 0.1 or farther than 100
    /// units is visible.
    fn default() -> Self {
        Self::new(45.0, 0.1, 100.0)
    }
}
