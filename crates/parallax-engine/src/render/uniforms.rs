use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::FrameView;

/// Which surface-detail techniques the fragment shader applies.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShadingFlags {
    pub normal_map: bool,
    pub parallax_mapping: bool,
    pub self_shadowing: bool,
}

impl Default for ShadingFlags {
    fn default() -> Self {
        Self {
            normal_map: true,
            parallax_mapping: false,
            self_shadowing: false,
        }
    }
}

/// Per-object uniform block, bound at `@group(0) @binding(0)`.
///
/// Layout mirrors `ObjectUniforms` in `parallax.wgsl`; every member is
/// 16-byte aligned so no implicit padding appears on either side.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// World-space light position (w unused).
    pub light_pos: [f32; 4],
    /// World-space camera position (w unused).
    pub view_pos: [f32; 4],
    /// normal map, parallax mapping, self-shadowing, unused.
    pub flags: [u32; 4],
    /// depth scale, unused × 3.
    pub params: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(
        model: Mat4,
        frame: &FrameView,
        light_pos: Vec3,
        flags: ShadingFlags,
        depth_scale: f32,
    ) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            light_pos: light_pos.extend(1.0).to_array(),
            view_pos: frame.eye.extend(1.0).to_array(),
            flags: [
                flags.normal_map as u32,
                flags.parallax_mapping as u32,
                flags.self_shadowing as u32,
                0,
            ],
            params: [depth_scale, 0.0, 0.0, 0.0],
        }
    }

    pub fn depth_scale(&self) -> f32 {
        self.params[0]
    }

    pub fn shading_flags(&self) -> ShadingFlags {
        ShadingFlags {
            normal_map: self.flags[0] != 0,
            parallax_mapping: self.flags[1] != 0,
            self_shadowing: self.flags[2] != 0,
        }
    }

    pub fn min_binding_size() -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64)
    }
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, Projection};

    #[test]
    fn block_is_256_bytes() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 256);
        assert_eq!(ObjectUniforms::min_binding_size().unwrap().get(), 256);
    }

    #[test]
    fn new_packs_matrices_and_flags() {
        let frame = FrameView::new(&Camera::new(), &Projection::default(), 800, 600);
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -8.0));
        let flags = ShadingFlags {
            normal_map: true,
            parallax_mapping: true,
            self_shadowing: false,
        };

        let u = ObjectUniforms::new(model, &frame, Vec3::new(0.0, -1.0, -7.0), flags, 0.05);

        assert_eq!(u.model, model.to_cols_array_2d());
        assert_eq!(u.view, frame.view.to_cols_array_2d());
        assert_eq!(u.projection, frame.projection.to_cols_array_2d());
        assert_eq!(u.light_pos, [0.0, -1.0, -7.0, 1.0]);
        assert_eq!(u.view_pos, [0.0, 0.0, 5.0, 1.0]);
        assert_eq!(u.flags, [1, 1, 0, 0]);
        assert_eq!(u.shading_flags(), flags);
        assert_eq!(u.depth_scale(), 0.05);
    }

    #[test]
    fn default_flags_enable_normal_mapping_only() {
        let f = ShadingFlags::default();
        assert!(f.normal_map && !f.parallax_mapping && !f.self_shadowing);
    }
}
