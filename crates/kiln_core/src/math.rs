//! Fixed-size vector and matrix algebra for graphics code.
//!
//! The value types are glam's: `Vec2`/`IVec2`, `Vec3`/`IVec3`, `Vec4`, and
//! column-major `Mat2`/`Mat3`/`Mat4`. Operators, `dot`, `cross`, `length`,
//! `normalize`, `determinant`, `inverse`, `floor`/`round`/`ceil` and identity
//! constants come from glam directly. This module adds what glam lacks: a few
//! norms and all-component comparisons, row-vector products, and the transform
//! builders used by the demos, with their exact conventions:
//!
//! - [`perspective`] has no aspect term and maps depth to `[0, 1]`.
//! - [`rotation_y`] uses rows `[c 0 -s] [0 1 0] [s 0 c]`, i.e. glam's
//!   `from_rotation_y(-angle)`. [`rotation_x`] and [`rotation_z`] are standard.

use std::fmt::Write as _;

pub use glam::{IVec2, IVec3, Mat2, Mat3, Mat4, UVec2, Vec2, Vec3, Vec4};

/// Swaps the y and z axes, leaving x and w alone.
pub const SWITCH_Y_AND_Z: Mat4 = Mat4::from_cols(Vec4::X, Vec4::Z, Vec4::Y, Vec4::W);

/// Norms and all-component ordering for vector types.
pub trait VectorExt: Copy {
    type Scalar;

    /// Sum of absolute components.
    fn norm1(self) -> Self::Scalar;
    /// Largest absolute component.
    fn norm_inf(self) -> Self::Scalar;

    fn all_lt(self, rhs: Self) -> bool;
    fn all_le(self, rhs: Self) -> bool;
    fn all_gt(self, rhs: Self) -> bool;
    fn all_ge(self, rhs: Self) -> bool;
}

macro_rules! impl_vector_ext {
    ($($ty:ty => $scalar:ty),* $(,)?) => {
        $(
            impl VectorExt for $ty {
                type Scalar = $scalar;

                fn norm1(self) -> $scalar {
                    self.abs().element_sum()
                }

                fn norm_inf(self) -> $scalar {
                    self.abs().max_element()
                }

                fn all_lt(self, rhs: Self) -> bool {
                    self.cmplt(rhs).all()
                }

                fn all_le(self, rhs: Self) -> bool {
                    self.cmple(rhs).all()
                }

                fn all_gt(self, rhs: Self) -> bool {
                    self.cmpgt(rhs).all()
                }

                fn all_ge(self, rhs: Self) -> bool {
                    self.cmpge(rhs).all()
                }
            }
        )*
    };
}

impl_vector_ext!(
    Vec2 => f32,
    Vec3 => f32,
    Vec4 => f32,
    IVec2 => i32,
    IVec3 => i32,
);

/// Scalar projection of `p` onto `axis`, in units of `axis`.
pub fn project_onto(p: Vec2, axis: Vec2) -> f32 {
    axis.dot(p) / axis.length_squared()
}

/// `v` rotated a quarter turn counter-clockwise: `(-y, x)`.
pub fn orthogonal(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Scalar 2D cross product `a.x * b.y - a.y * b.x`.
pub fn cross2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// `u * (1 - t) + v * t`.
pub fn lerp(t: f32, u: Vec3, v: Vec3) -> Vec3 {
    u * (1.0 - t) + v * t
}

/// Row-vector product `v * m`.
pub fn row_mul2(v: Vec2, m: &Mat2) -> Vec2 {
    m.transpose() * v
}

/// Row-vector product `v * m`.
pub fn row_mul3(v: Vec3, m: &Mat3) -> Vec3 {
    m.transpose() * v
}

/// Row-vector product `v * m`.
pub fn row_mul4(v: Vec4, m: &Mat4) -> Vec4 {
    m.transpose() * v
}

/// Embeds a linear map in a 4x4 affine matrix with no translation.
pub fn affine_from_mat3(m: &Mat3) -> Mat4 {
    Mat4::from_mat3(*m)
}

/// Upper-left 3x3 block of `m`.
pub fn linear_part(m: &Mat4) -> Mat3 {
    Mat3::from_mat4(*m)
}

/// Projection with vertical and horizontal half field of view `half_fov`.
pub fn perspective(half_fov: f32, near: f32, far: f32) -> Mat4 {
    let s = half_fov.cos() / half_fov.sin();
    let f = -far / (far - near);
    Mat4::from_cols(
        Vec4::new(s, 0.0, 0.0, 0.0),
        Vec4::new(0.0, s, 0.0, 0.0),
        Vec4::new(0.0, 0.0, f, -1.0),
        Vec4::new(0.0, 0.0, f * near, 0.0),
    )
}

pub fn translation(v: Vec3) -> Mat4 {
    Mat4::from_translation(v)
}

pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

pub fn rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols(
        Vec4::X,
        Vec4::new(0.0, c, s, 0.0),
        Vec4::new(0.0, -s, c, 0.0),
        Vec4::W,
    )
}

pub fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols(
        Vec4::new(c, 0.0, s, 0.0),
        Vec4::Y,
        Vec4::new(-s, 0.0, c, 0.0),
        Vec4::W,
    )
}

pub fn rotation_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols(
        Vec4::new(c, s, 0.0, 0.0),
        Vec4::new(-s, c, 0.0, 0.0),
        Vec4::Z,
        Vec4::W,
    )
}

/// One line per row, entries in scientific notation.
pub fn format_mat3(m: &Mat3) -> String {
    let cols = m.to_cols_array_2d();
    format_rows(&cols.map(|c| c.to_vec()))
}

/// One line per row, entries in scientific notation.
pub fn format_mat4(m: &Mat4) -> String {
    let cols = m.to_cols_array_2d();
    format_rows(&cols.map(|c| c.to_vec()))
}

fn format_rows(cols: &[Vec<f32>]) -> String {
    let n = cols.len();
    let mut out = String::new();
    for row in 0..n {
        for col in cols {
            let _ = write!(out, " {:.10e}", col[row]);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f32 = 1e-5;

    #[test]
    fn test_component_wise_operators() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(a * b, Vec2::new(3.0, 8.0));
        assert_eq!(b / a, Vec2::new(3.0, 2.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(2.0 * a, Vec2::new(2.0, 4.0));
        assert_eq!(a + 1.0, Vec2::new(2.0, 3.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));

        let mut c = IVec3::new(1, 2, 3);
        c += 1;
        c *= IVec3::new(2, 2, 2);
        assert_eq!(c, IVec3::new(4, 6, 8));
    }

    #[test]
    fn test_float_to_int_conversion_truncates() {
        assert_eq!(Vec2::new(1.9, -1.9).as_ivec2(), IVec2::new(1, -1));
        assert_eq!(IVec3::new(1, 2, 3).as_vec3(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_all_component_comparisons() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(2.0, 3.0, 4.0);
        assert!(a.all_lt(b));
        assert!(a.all_le(a));
        assert!(b.all_gt(a));
        // Mixed ordering is neither less nor greater.
        let c = Vec3::new(0.0, 5.0, 3.0);
        assert!(!a.all_lt(c));
        assert!(!a.all_gt(c));
        assert!(IVec2::new(1, 1).all_ge(IVec2::new(1, 0)));
    }

    #[test]
    fn test_norms() {
        let v = Vec2::new(-3.0, 4.0);
        assert!((v.norm1() - 7.0).abs() < EPS);
        assert!((v.norm_inf() - 4.0).abs() < EPS);
        assert!((Vec3::new(1.0, -6.0, 2.0).norm_inf() - 6.0).abs() < EPS);
        assert_eq!(IVec2::new(-2, 5).norm1(), 7);
    }

    #[test]
    fn test_2d_helpers() {
        assert!((project_onto(Vec2::new(2.0, 2.0), Vec2::new(2.0, 0.0)) - 1.0).abs() < EPS);
        assert_eq!(orthogonal(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
        assert!((cross2(Vec2::X, Vec2::Y) - 1.0).abs() < EPS);
        assert!((cross2(Vec2::Y, Vec2::X) + 1.0).abs() < EPS);
        assert_eq!(Vec2::new(1.5, -1.5).floor(), Vec2::new(1.0, -2.0));
        assert_eq!(Vec2::new(1.5, -1.2).ceil(), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_3d_helpers() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        let n = Vec3::new(0.0, 3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < EPS);
        let mid = lerp(0.25, Vec3::ZERO, Vec3::new(4.0, 8.0, -4.0));
        assert!(mid.abs_diff_eq(Vec3::new(1.0, 2.0, -1.0), EPS));
    }

    #[test]
    fn test_row_vector_products() {
        let m = Mat2::from_cols(Vec2::new(1.0, 3.0), Vec2::new(2.0, 4.0));
        // Rows [1 2] [3 4].
        assert_eq!(m * Vec2::new(1.0, 1.0), Vec2::new(3.0, 7.0));
        assert_eq!(row_mul2(Vec2::new(1.0, 1.0), &m), Vec2::new(4.0, 6.0));

        let r = rotation_z(FRAC_PI_2);
        let v = Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(row_mul4(v, &r).abs_diff_eq(r.transpose() * v, EPS));
        let m3 = Mat3::from_diagonal(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(row_mul3(Vec3::ONE, &m3), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mat3_determinant_and_inverse() {
        let m = Mat3::from_cols(
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(1.0, 3.0, 0.0),
            Vec3::new(0.0, 1.0, 4.0),
        );
        assert!((m.determinant() - 25.0).abs() < EPS);
        assert!((m * m.inverse()).abs_diff_eq(Mat3::IDENTITY, EPS));
    }

    #[test]
    fn test_affine_round_trip() {
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        let a = affine_from_mat3(&m);
        assert_eq!(a.w_axis, Vec4::W);
        assert_eq!(a.x_axis.w, 0.0);
        assert_eq!(linear_part(&a), m);
    }

    #[test]
    fn test_switch_y_and_z() {
        let v = SWITCH_Y_AND_Z * Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(v, Vec4::new(1.0, 3.0, 2.0, 1.0));
    }

    #[test]
    fn test_perspective_matches_unit_aspect_rh() {
        let half_fov = 0.6;
        let p = perspective(half_fov, 0.1, 100.0);
        let expected = Mat4::perspective_rh(half_fov * 2.0, 1.0, 0.1, 100.0);
        assert!(p.abs_diff_eq(expected, 1e-4));
        // Near plane maps to depth 0, far plane to depth 1.
        let near = p * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = p * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_translation_and_scale() {
        let t = translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(1.0, 2.0, 3.0, 1.0));
        // Directions are not translated.
        assert_eq!(t * Vec4::new(1.0, 0.0, 0.0, 0.0), Vec4::new(1.0, 0.0, 0.0, 0.0));
        let s = scale(2.0, 3.0, 4.0);
        assert_eq!(s * Vec4::ONE, Vec4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn test_rotations() {
        assert!(rotation_x(FRAC_PI_4).abs_diff_eq(Mat4::from_rotation_x(FRAC_PI_4), EPS));
        assert!(rotation_z(FRAC_PI_4).abs_diff_eq(Mat4::from_rotation_z(FRAC_PI_4), EPS));
        assert!(rotation_y(FRAC_PI_4).abs_diff_eq(Mat4::from_rotation_y(-FRAC_PI_4), EPS));

        let x_to = rotation_y(FRAC_PI_2) * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert!(x_to.abs_diff_eq(Vec4::new(0.0, 0.0, 1.0, 0.0), EPS));
    }

    #[test]
    fn test_format_matrix_is_row_major() {
        let m = translation(Vec3::new(5.0, 0.0, 0.0));
        let text = format_mat4(&m);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        let first_row: Vec<f32> = lines[0]
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(first_row, vec![1.0, 0.0, 0.0, 5.0]);

        let text3 = format_mat3(&Mat3::IDENTITY);
        assert_eq!(text3.lines().count(), 3);
        assert!(text3.lines().all(|l| l.split_whitespace().count() == 3));
    }
}
