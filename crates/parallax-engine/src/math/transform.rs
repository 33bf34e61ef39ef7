use core::ops::{Add, AddAssign, Mul, MulAssign};

use glam::{Mat4, Vec3};

/// Model transform of a 3D entity, stored as a single 4×4 matrix.
///
/// Operations post-multiply the current matrix (`M = M * op`), so the call
/// made last is the first one applied to a vertex:
///
/// ```
/// use parallax_engine::math::Transform;
///
/// let mut t = Transform::new();
/// t.translate(0.0, 0.0, -8.0);
/// t.scale(2.0, 2.0, 2.0);
/// // A vertex at x = 1 is scaled to 2, then pushed back to z = -8.
/// let p = t.matrix().transform_point3(glam::Vec3::X);
/// assert_eq!(p, glam::Vec3::new(2.0, 0.0, -8.0));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    #[inline]
    pub const fn new() -> Self {
        Self { matrix: Mat4::IDENTITY }
    }

    #[inline]
    pub const fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Resets to the identity matrix.
    #[inline]
    pub fn load_identity(&mut self) {
        self.matrix = Mat4::IDENTITY;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.matrix *= Mat4::from_translation(Vec3::new(x, y, z));
    }

    /// Rotates by `radians` about the axis `(x, y, z)`.
    ///
    /// The axis does not need to be normalized. A zero-length axis leaves the
    /// matrix unchanged.
    pub fn rotate(&mut self, radians: f32, x: f32, y: f32, z: f32) {
        let Some(axis) = Vec3::new(x, y, z).try_normalize() else {
            return;
        };
        self.matrix *= Mat4::from_axis_angle(axis, radians);
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.matrix *= Mat4::from_scale(Vec3::new(x, y, z));
    }

    /// Replaces the internal matrix with the one held by `other`.
    #[inline]
    pub fn apply_transform(&mut self, other: &Transform) {
        self.matrix = other.matrix;
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Column-major floats, the layout uploaded to uniform buffers.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.matrix.to_cols_array()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self::from_matrix(matrix)
    }
}

impl Mul for Transform {
    type Output = Transform;
    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        Transform::from_matrix(self.matrix * rhs.matrix)
    }
}

impl MulAssign for Transform {
    #[inline]
    fn mul_assign(&mut self, rhs: Transform) {
        self.matrix *= rhs.matrix;
    }
}

impl Add for Transform {
    type Output = Transform;
    #[inline]
    fn add(self, rhs: Transform) -> Transform {
        Transform::from_matrix(self.matrix + rhs.matrix)
    }
}

impl AddAssign for Transform {
    #[inline]
    fn add_assign(&mut self, rhs: Transform) {
        self.matrix = self.matrix + rhs.matrix;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn new_is_identity() {
        assert_eq!(Transform::new().matrix(), Mat4::IDENTITY);
        assert_eq!(Transform::default(), Transform::new());
    }

    #[test]
    fn load_identity_resets() {
        let mut t = Transform::new();
        t.translate(1.0, 2.0, 3.0);
        t.load_identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_scales_first() {
        let mut t = Transform::new();
        t.translate(0.0, 0.0, -8.0);
        t.scale(2.0, 2.0, 2.0);

        let p = t.matrix().transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(2.0, 2.0, -8.0), EPS));
    }

    #[test]
    fn scale_then_translate_scales_the_offset() {
        let mut t = Transform::new();
        t.scale(2.0, 2.0, 2.0);
        t.translate(0.0, 0.0, -8.0);

        let p = t.matrix().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -16.0), EPS));
    }

    #[test]
    fn rotate_about_y_turns_x_into_minus_z() {
        let mut t = Transform::new();
        t.rotate(FRAC_PI_2, 0.0, 1.0, 0.0);

        let p = t.matrix().transform_vector3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn rotate_normalizes_axis() {
        let mut a = Transform::new();
        a.rotate(0.3, 0.0, 5.0, 0.0);
        let mut b = Transform::new();
        b.rotate(0.3, 0.0, 1.0, 0.0);
        assert!(a.matrix().abs_diff_eq(b.matrix(), EPS));
    }

    #[test]
    fn rotate_about_zero_axis_is_noop() {
        let mut t = Transform::new();
        t.rotate(1.0, 0.0, 0.0, 0.0);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn mul_composes_like_successive_calls() {
        let mut a = Transform::new();
        a.translate(1.0, 0.0, 0.0);
        let mut b = Transform::new();
        b.scale(3.0, 3.0, 3.0);

        let mut expected = Transform::new();
        expected.translate(1.0, 0.0, 0.0);
        expected.scale(3.0, 3.0, 3.0);

        assert!((a * b).matrix().abs_diff_eq(expected.matrix(), EPS));

        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
    }

    #[test]
    fn add_is_component_wise() {
        let sum = Transform::new() + Transform::new();
        assert_eq!(sum.matrix(), Mat4::from_diagonal(glam::Vec4::splat(2.0)));

        let mut acc = Transform::new();
        acc += Transform::new();
        assert_eq!(acc, sum);
    }

    #[test]
    fn apply_transform_copies_matrix() {
        let mut src = Transform::new();
        src.translate(4.0, 5.0, 6.0);
        let mut dst = Transform::new();
        dst.apply_transform(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn cols_array_is_column_major() {
        let mut t = Transform::new();
        t.translate(7.0, 8.0, 9.0);
        let cols = t.to_cols_array();
        assert_eq!(&cols[12..15], &[7.0, 8.0, 9.0]);
    }
}
