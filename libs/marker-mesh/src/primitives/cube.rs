//! # Cube Primitive
//!
//! Generates a flat-shaded box from half extents and a placement matrix.

use crate::builder::MeshBuilder;
use crate::error::{ensure_non_negative, MeshError};
use crate::math::transform_point;
use crate::mesh::SubMesh;
use glam::{DMat4, DVec3};

/// Creates a box centered on the placement origin.
///
/// # Arguments
///
/// * `half_extents` - Half size along local X, Y and Z
/// * `color` - RGB color of every vertex
/// * `placement` - Local-to-world transform
///
/// # Returns
///
/// A sub-mesh with 12 triangles (2 per face) and 36 unwelded vertices.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_cube;
/// use glam::{DMat4, DVec3};
///
/// let mesh = create_cube(DVec3::splat(0.5), [1.0, 0.0, 0.0], &DMat4::IDENTITY).unwrap();
/// assert_eq!(mesh.indices().len(), 36);
/// ```
pub fn create_cube(
    half_extents: DVec3,
    color: [f32; 3],
    placement: &DMat4,
) -> Result<SubMesh, MeshError> {
    ensure_non_negative("Cube half extent x", half_extents.x)?;
    ensure_non_negative("Cube half extent y", half_extents.y)?;
    ensure_non_negative("Cube half extent z", half_extents.z)?;

    let DVec3 { x: rx, y: ry, z: rz } = half_extents;
    let corner = |x: f64, y: f64, z: f64| transform_point(placement, DVec3::new(x, y, z));

    // Bottom ring (z = -rz)
    let a = corner(-rx, -ry, -rz);
    let b = corner(rx, -ry, -rz);
    let c = corner(rx, ry, -rz);
    let d = corner(-rx, ry, -rz);

    // Top ring (z = +rz)
    let e = corner(-rx, -ry, rz);
    let f = corner(rx, -ry, rz);
    let g = corner(rx, ry, rz);
    let h = corner(-rx, ry, rz);

    let mut builder = MeshBuilder::with_triangle_capacity(12)?;

    // Two triangles per face sharing a diagonal, CCW seen from outside

    // +Z
    builder.add_flat_triangle(e, f, g, color)?;
    builder.add_flat_triangle(g, h, e, color)?;

    // -Z
    builder.add_flat_triangle(b, a, d, color)?;
    builder.add_flat_triangle(d, c, b, color)?;

    // +Y
    builder.add_flat_triangle(h, g, c, color)?;
    builder.add_flat_triangle(c, d, h, color)?;

    // -Y
    builder.add_flat_triangle(a, b, f, color)?;
    builder.add_flat_triangle(f, e, a, color)?;

    // -X
    builder.add_flat_triangle(a, e, h, color)?;
    builder.add_flat_triangle(h, d, a, color)?;

    // +X
    builder.add_flat_triangle(f, b, c, color)?;
    builder.add_flat_triangle(c, g, f, color)?;

    Ok(builder.finish(None))
}
