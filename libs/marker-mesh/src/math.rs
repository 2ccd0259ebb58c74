//! # Linear Algebra Helpers
//!
//! Thin helpers over `glam` for the transform pipeline. Points are lifted to
//! homogeneous coordinates with w=1 and directions (normals) with w=0, so a
//! translation never moves a normal.

use config::constants::EPSILON;
use glam::{DMat3, DMat4, DQuat, DVec3, DVec4};

/// Lifts a position to homogeneous coordinates (w=1).
#[inline]
pub fn point(v: DVec3) -> DVec4 {
    v.extend(1.0)
}

/// Lifts a free vector to homogeneous coordinates (w=0).
#[inline]
pub fn direction(v: DVec3) -> DVec4 {
    v.extend(0.0)
}

/// Applies `matrix` to a position.
#[inline]
pub fn transform_point(matrix: &DMat4, p: DVec3) -> DVec3 {
    (*matrix * point(p)).truncate()
}

/// Applies `matrix` to a normal or direction, ignoring translation.
#[inline]
pub fn transform_normal(matrix: &DMat4, n: DVec3) -> DVec3 {
    (*matrix * direction(n)).truncate()
}

/// Builds an affine matrix whose upper 3x3 columns are the given basis
/// vectors and whose translation is zero.
///
/// # Example
///
/// ```rust
/// use marker_mesh::math::from_basis;
/// use glam::{DMat4, DVec3};
///
/// let m = from_basis(DVec3::X, DVec3::Y, DVec3::Z);
/// assert_eq!(m, DMat4::IDENTITY);
/// ```
pub fn from_basis(x: DVec3, y: DVec3, z: DVec3) -> DMat4 {
    DMat4::from_cols(direction(x), direction(y), direction(z), DVec4::W)
}

/// Converts an orientation quaternion into a rotation matrix built from the
/// quaternion's column basis.
///
/// The quaternion is normalized first. A zero-length quaternion (an
/// uninitialized orientation) is treated as identity.
pub fn rotation_basis(orientation: DQuat) -> DMat4 {
    let length_squared = orientation.length_squared();
    if !length_squared.is_finite() || length_squared < EPSILON {
        log::warn!(
            "Orientation quaternion {:?} has no usable length, using identity",
            orientation
        );
        return DMat4::IDENTITY;
    }

    let basis = DMat3::from_quat(orientation.normalize());
    from_basis(basis.x_axis, basis.y_axis, basis.z_axis)
}

/// Builds the placement matrix for a marker pose:
/// `translate(position * scaling) * rotation`.
///
/// Rotation is applied first, so geometry rotates about its own center and
/// is then moved into place.
///
/// # Example
///
/// ```rust
/// use marker_mesh::math::{placement_matrix, transform_point};
/// use glam::{DQuat, DVec3};
///
/// let m = placement_matrix(DVec3::new(1.0, 0.0, 0.0), DQuat::IDENTITY, 2.0);
/// assert_eq!(transform_point(&m, DVec3::ZERO), DVec3::new(2.0, 0.0, 0.0));
/// ```
pub fn placement_matrix(position: DVec3, orientation: DQuat, scaling: f64) -> DMat4 {
    DMat4::from_translation(position * scaling) * rotation_basis(orientation)
}

/// Converts spherical coordinates to Cartesian.
///
/// `elevation` is the polar angle measured from +Z (0 at the north pole,
/// pi at the south pole); `azimuth` is measured from +X towards +Y.
#[inline]
pub fn sphere_to_cartesian(azimuth: f64, elevation: f64, radius: f64) -> DVec3 {
    let (sin_el, cos_el) = elevation.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    DVec3::new(
        radius * sin_el * cos_az,
        radius * sin_el * sin_az,
        radius * cos_el,
    )
}

/// Flat normal of the triangle `(p1, p2, p3)`.
///
/// Counter-clockwise winding seen from outside yields an outward normal.
/// Degenerate triangles get a zero normal.
#[inline]
pub fn face_normal(p1: DVec3, p2: DVec3, p3: DVec3) -> DVec3 {
    (p1 - p2).cross(p2 - p3).normalize_or_zero()
}

/// Narrows a geometry vector to the f32 layout written into vertex buffers.
#[inline]
pub(crate) fn to_f32(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_translation_ignores_directions() {
        let m = DMat4::from_translation(DVec3::new(5.0, 6.0, 7.0));
        assert_eq!(transform_point(&m, DVec3::ONE), DVec3::new(6.0, 7.0, 8.0));
        assert_eq!(transform_normal(&m, DVec3::ONE), DVec3::ONE);
    }

    #[test]
    fn test_composition_applies_child_first() {
        let parent = DMat4::from_translation(DVec3::new(10.0, 0.0, 0.0));
        let child = DMat4::from_scale(DVec3::splat(2.0));
        let p = transform_point(&(parent * child), DVec3::X);
        assert_eq!(p, DVec3::new(12.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_basis_columns() {
        let m = from_basis(DVec3::Y, DVec3::NEG_X, DVec3::Z);
        assert_eq!(transform_normal(&m, DVec3::X), DVec3::Y);
        assert_eq!(transform_normal(&m, DVec3::Y), DVec3::NEG_X);
        assert_eq!(m.w_axis, DVec4::W);
    }

    #[test]
    fn test_rotation_basis_quarter_turn() {
        let m = rotation_basis(DQuat::from_rotation_z(FRAC_PI_2));
        let v = transform_normal(&m, DVec3::X);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_basis_normalizes() {
        let q = DQuat::from_xyzw(0.0, 0.0, 2.0, 2.0);
        let m = rotation_basis(q);
        let v = transform_normal(&m, DVec3::X);
        assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_basis_zero_quaternion_is_identity() {
        let m = rotation_basis(DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(m, DMat4::IDENTITY);
    }

    #[test]
    fn test_placement_rotates_then_translates() {
        let m = placement_matrix(
            DVec3::new(1.0, 2.0, 3.0),
            DQuat::from_rotation_z(FRAC_PI_2),
            1.0,
        );
        let p = transform_point(&m, DVec3::X);
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_to_cartesian_poles_and_equator() {
        assert_abs_diff_eq!(sphere_to_cartesian(0.0, 0.0, 2.0).z, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sphere_to_cartesian(0.0, PI, 2.0).z, -2.0, epsilon = 1e-12);
        let eq = sphere_to_cartesian(FRAC_PI_2, FRAC_PI_2, 1.0);
        assert_abs_diff_eq!(eq.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_normal_ccw_points_up() {
        let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::Y);
        assert_eq!(n, DVec3::Z);
    }

    #[test]
    fn test_face_normal_degenerate_is_zero() {
        let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
        assert_eq!(n, DVec3::ZERO);
    }
}
