//! # Triangle List Passthrough
//!
//! Places a caller-supplied triangle soup into world space.

use crate::builder::MeshBuilder;
use crate::error::{ensure_non_negative, MeshError};
use crate::math::transform_point;
use crate::mesh::SubMesh;
use glam::{DMat4, DVec3};

/// Creates a flat-shaded mesh from consecutive point triples.
///
/// # Arguments
///
/// * `placement` - Local-to-world transform
/// * `scale` - Per-axis factor applied to each point before `placement`
/// * `points` - Triangle corners, three per triangle
/// * `colors` - Optional per-point RGB colors
/// * `fallback_color` - Color for triangles without a per-point color
///
/// Each triangle takes the color of its first point when `colors` has an
/// entry for it, otherwise `fallback_color`. Colors are per triangle only;
/// the second and third point colors are ignored.
///
/// # Errors
///
/// [`MeshError::InvalidInput`] when `points.len()` is not a multiple of 3,
/// or when a scale component is negative or not finite. A negative factor
/// would mirror the points and turn every triangle inside out.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_triangle_list;
/// use glam::{DMat4, DVec3};
///
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y];
/// let mesh = create_triangle_list(&DMat4::IDENTITY, DVec3::ONE, &points, &[], [1.0; 3]).unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
pub fn create_triangle_list(
    placement: &DMat4,
    scale: DVec3,
    points: &[DVec3],
    colors: &[[f32; 3]],
    fallback_color: [f32; 3],
) -> Result<SubMesh, MeshError> {
    ensure_non_negative("Triangle list scale x", scale.x)?;
    ensure_non_negative("Triangle list scale y", scale.y)?;
    ensure_non_negative("Triangle list scale z", scale.z)?;

    if points.len() % 3 != 0 {
        return Err(MeshError::invalid_input(format!(
            "Triangle list point count must be a multiple of 3: {}",
            points.len()
        )));
    }

    let mut builder = MeshBuilder::with_triangle_capacity(points.len() / 3)?;
    let place = |p: DVec3| transform_point(placement, p * scale);

    for (triangle, corners) in points.chunks_exact(3).enumerate() {
        let color = colors.get(triangle * 3).copied().unwrap_or(fallback_color);
        builder.add_flat_triangle(place(corners[0]), place(corners[1]), place(corners[2]), color)?;
    }

    Ok(builder.finish(None))
}
