use glam::{Vec2, Vec3};
use thiserror::Error;

use crate::render::{MeshVertex, FLOATS_PER_VERTEX};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("triangle index {index} is out of range ({vertex_count} vertices)")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Position + texture coordinate as supplied by the caller.
#[derive(Debug, Copy, Clone, PartialEq)]
struct SourceVertex {
    position: Vec3,
    uv: Vec2,
}

/// Indexed triangle mesh with a generated tangent frame.
///
/// Vertices and triangles are collected first; [`Geometry::generate`] then builds
/// the interleaved buffer (position, uv, normal, tangent, bitangent) the
/// renderer uploads. Adding vertices or triangles marks that buffer stale until
/// the next `generate`.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    vertices: Vec<SourceVertex>,
    indices: Vec<u32>,
    buffer: Vec<MeshVertex>,
    stale: bool,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `[-1, 1]²` quad on the z = 0 plane facing +Z, UVs covering `[0, 1]²`.
    pub fn textured_quad() -> Self {
        let mut g = Self::new();
        g.add_vertex(-1.0, -1.0, 0.0, 0.0, 0.0);
        g.add_vertex(1.0, -1.0, 0.0, 1.0, 0.0);
        g.add_vertex(1.0, 1.0, 0.0, 1.0, 1.0);
        g.add_vertex(-1.0, 1.0, 0.0, 0.0, 1.0);
        g.indices.extend_from_slice(&[0, 1, 2, 2, 3, 0]);
        g.generate();
        g
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32, s: f32, t: f32) {
        self.vertices.push(SourceVertex {
            position: Vec3::new(x, y, z),
            uv: Vec2::new(s, t),
        });
        self.stale = true;
    }

    pub fn make_triangle(&mut self, i0: u32, i1: u32, i2: u32) -> Result<(), GeometryError> {
        for index in [i0, i1, i2] {
            if index as usize >= self.vertices.len() {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        self.indices.extend_from_slice(&[i0, i1, i2]);
        self.stale = true;
        Ok(())
    }

    /// Builds the interleaved vertex buffer.
    ///
    /// Each triangle's face normal, tangent and bitangent are written to its
    /// three vertices; a vertex shared by several triangles keeps the frame of
    /// the last one.
    pub fn generate(&mut self) {
        self.buffer = self
            .vertices
            .iter()
            .map(|v| MeshVertex {
                position: v.position.to_array(),
                uv: v.uv.to_array(),
                normal: Vec3::Z.to_array(),
                tangent: Vec3::X.to_array(),
                bitangent: Vec3::Y.to_array(),
            })
            .collect();

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (normal, tangent, bitangent) =
                tangent_frame(&self.vertices[a], &self.vertices[b], &self.vertices[c]);

            for i in [a, b, c] {
                let out = &mut self.buffer[i];
                out.normal = normal.to_array();
                out.tangent = tangent.to_array();
                out.bitangent = bitangent.to_array();
            }
        }

        self.stale = false;

        log::debug!(
            "generated geometry: {} vertices, {} triangles",
            self.buffer.len(),
            self.indices.len() / 3
        );
    }

    /// True when vertices or triangles were added after the last `generate`.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Regenerates the buffer if it no longer matches the vertex and index lists.
    pub fn ensure_generated(&mut self) {
        if self.stale {
            self.generate();
        }
    }

    /// Interleaved vertices produced by the last `generate`.
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.buffer
    }

    /// The same buffer viewed as raw floats.
    pub fn buffer_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.buffer)
    }

    pub fn buffer_size_bytes(&self) -> usize {
        self.buffer.len() * FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

fn tangent_frame(p0: &SourceVertex, p1: &SourceVertex, p2: &SourceVertex) -> (Vec3, Vec3, Vec3) {
    let e1 = p1.position - p0.position;
    let e2 = p2.position - p0.position;
    let d1 = p1.uv - p0.uv;
    let d2 = p2.uv - p0.uv;

    let normal = e1.cross(e2).try_normalize().unwrap_or(Vec3::Z);

    let det = d1.x * d2.y - d2.x * d1.y;
    if det.abs() <= f32::EPSILON {
        return (normal, Vec3::X, Vec3::Y);
    }
    let r = 1.0 / det;

    let tangent = ((e1 * d2.y - e2 * d1.y) * r).try_normalize().unwrap_or(Vec3::X);
    let bitangent = ((e2 * d1.x - e1 * d2.x) * r).try_normalize().unwrap_or(Vec3::Y);
    (normal, tangent, bitangent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_layout() {
        let g = Geometry::textured_quad();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.index_data(), &[0, 1, 2, 2, 3, 0]);
        assert_eq!(g.index_count(), 6);
        assert_eq!(g.buffer_data().len(), 4 * FLOATS_PER_VERTEX);
        assert_eq!(g.buffer_size_bytes(), 4 * 56);

        let v2 = g.vertices()[2];
        assert_eq!(v2.position, [1.0, 1.0, 0.0]);
        assert_eq!(v2.uv, [1.0, 1.0]);
    }

    #[test]
    fn quad_tangent_frame_is_axis_aligned() {
        let g = Geometry::textured_quad();
        for v in g.vertices() {
            assert!(Vec3::from(v.normal).abs_diff_eq(Vec3::Z, 1e-6));
            assert!(Vec3::from(v.tangent).abs_diff_eq(Vec3::X, 1e-6));
            assert!(Vec3::from(v.bitangent).abs_diff_eq(Vec3::Y, 1e-6));
        }
    }

    #[test]
    fn interleaved_floats_follow_vertex_order() {
        let g = Geometry::textured_quad();
        let f = g.buffer_data();
        // Second vertex: position (1, -1, 0), uv (1, 0), normal (0, 0, 1).
        assert_eq!(&f[14..22], &[1.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn tangent_follows_uv_direction() {
        // UVs rotated so +u runs along +Y.
        let mut g = Geometry::new();
        g.add_vertex(0.0, 0.0, 0.0, 0.0, 0.0);
        g.add_vertex(0.0, 1.0, 0.0, 1.0, 0.0);
        g.add_vertex(-1.0, 0.0, 0.0, 0.0, 1.0);
        g.make_triangle(0, 1, 2).unwrap();
        g.generate();

        let v = g.vertices()[0];
        assert!(Vec3::from(v.tangent).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(Vec3::from(v.bitangent).abs_diff_eq(-Vec3::X, 1e-6));
        assert!(Vec3::from(v.normal).abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn degenerate_uvs_fall_back_to_axes() {
        let mut g = Geometry::new();
        g.add_vertex(0.0, 0.0, 0.0, 0.5, 0.5);
        g.add_vertex(1.0, 0.0, 0.0, 0.5, 0.5);
        g.add_vertex(0.0, 1.0, 0.0, 0.5, 0.5);
        g.make_triangle(0, 1, 2).unwrap();
        g.generate();

        for v in g.vertices() {
            assert_eq!(v.tangent, [1.0, 0.0, 0.0]);
            assert_eq!(v.bitangent, [0.0, 1.0, 0.0]);
            assert!(v.tangent.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn adding_after_generate_marks_buffer_stale() {
        let mut g = Geometry::new();
        g.add_vertex(0.0, 0.0, 0.0, 0.0, 0.0);
        g.add_vertex(1.0, 0.0, 0.0, 1.0, 0.0);
        g.add_vertex(0.0, 1.0, 0.0, 0.0, 1.0);
        g.make_triangle(0, 1, 2).unwrap();
        g.generate();
        assert!(!g.is_stale());

        g.add_vertex(1.0, 1.0, 0.0, 1.0, 1.0);
        g.make_triangle(1, 3, 2).unwrap();
        assert!(g.is_stale());
        assert_eq!(g.vertices().len(), 3);

        g.ensure_generated();
        assert!(!g.is_stale());
        assert_eq!(g.vertices().len(), 4);
        let max_index = g.index_data().iter().copied().max().unwrap();
        assert!((max_index as usize) < g.vertices().len());
    }

    #[test]
    fn triangles_without_generate_are_stale() {
        let mut g = Geometry::new();
        g.add_vertex(0.0, 0.0, 0.0, 0.0, 0.0);
        g.add_vertex(1.0, 0.0, 0.0, 1.0, 0.0);
        g.add_vertex(0.0, 1.0, 0.0, 0.0, 1.0);
        g.make_triangle(0, 1, 2).unwrap();

        assert!(g.is_stale());
        assert_eq!(g.index_count(), 3);
        assert_eq!(g.buffer_size_bytes(), 0);

        g.ensure_generated();
        assert_eq!(g.buffer_size_bytes(), 3 * 56);
    }

    #[test]
    fn textured_quad_is_generated() {
        assert!(!Geometry::textured_quad().is_stale());
    }

    #[test]
    fn out_of_range_triangle_is_rejected() {
        let mut g = Geometry::new();
        g.add_vertex(0.0, 0.0, 0.0, 0.0, 0.0);
        let err = g.make_triangle(0, 0, 3).unwrap_err();
        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                index: 3,
                vertex_count: 1
            }
        );
        assert_eq!(g.index_count(), 0);
    }

    #[test]
    fn empty_geometry_has_no_buffer() {
        let mut g = Geometry::new();
        g.generate();
        assert!(g.buffer_data().is_empty());
        assert_eq!(g.buffer_size_bytes(), 0);
    }
}
