use bytemuck::{Pod, Zeroable};

/// Floats per interleaved vertex: position 3, uv 2, normal 3, tangent 3, bitangent 3.
pub const FLOATS_PER_VERTEX: usize = 14;

/// Interleaved vertex consumed by the parallax pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2, // uv
        2 => Float32x3, // normal
        3 => Float32x3, // tangent
        4 => Float32x3  // bitangent
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_matches_float_count() {
        assert_eq!(
            std::mem::size_of::<MeshVertex>(),
            FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
        );
        assert_eq!(MeshVertex::layout().array_stride, 56);
    }

    #[test]
    fn attribute_offsets_follow_field_order() {
        let offsets: Vec<u64> = MeshVertex::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20, 32, 44]);
    }
}
