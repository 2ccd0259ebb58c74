//! # Cylinder Primitive
//!
//! Generates a closed N-gon prism along the local Z axis.

use crate::builder::MeshBuilder;
use crate::error::{ensure_non_negative, MeshError};
use crate::math::transform_point;
use crate::mesh::SubMesh;
use config::constants::MIN_SEGMENTS;
use glam::{DMat4, DVec3};
use std::f64::consts::PI;

/// Creates a cylinder centered on the placement origin.
///
/// # Arguments
///
/// * `placement` - Local-to-world transform
/// * `radius` - Radius of both caps
/// * `length` - Full height along local Z (caps at `-length/2` and `+length/2`)
/// * `color` - RGB color of every vertex
/// * `facets` - Number of sides
///
/// # Returns
///
/// A sub-mesh with `4 * facets` triangles: per facet one fan piece on each
/// cap and two triangles for the side quad.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_cylinder;
/// use glam::DMat4;
///
/// let mesh = create_cylinder(&DMat4::IDENTITY, 0.5, 2.0, [0.0, 1.0, 0.0], 16).unwrap();
/// assert_eq!(mesh.triangle_count(), 64);
/// ```
pub fn create_cylinder(
    placement: &DMat4,
    radius: f64,
    length: f64,
    color: [f32; 3],
    facets: u32,
) -> Result<SubMesh, MeshError> {
    ensure_non_negative("Cylinder radius", radius)?;
    ensure_non_negative("Cylinder length", length)?;

    if facets < MIN_SEGMENTS {
        return Err(MeshError::invalid_input(format!(
            "Cylinder facets must be at least {MIN_SEGMENTS}: {facets}"
        )));
    }

    let half = length / 2.0;
    let bottom = transform_point(placement, DVec3::new(0.0, 0.0, -half));
    let top = transform_point(placement, DVec3::new(0.0, 0.0, half));

    let ring = |z: f64| -> Vec<DVec3> {
        (0..facets)
            .map(|i| {
                let angle = i as f64 * PI * 2.0 / facets as f64;
                let (sin, cos) = angle.sin_cos();
                transform_point(placement, DVec3::new(radius * sin, radius * cos, z))
            })
            .collect()
    };
    let bottom_ring = ring(-half);
    let top_ring = ring(half);

    let facet_count = facets as usize;
    let mut builder = MeshBuilder::with_triangle_capacity(4 * facet_count)?;

    // Ring points advance clockwise seen from +Z
    for i in 0..facet_count {
        let j = (i + 1) % facet_count;

        // Bottom cap, facing -Z
        builder.add_flat_triangle(bottom, bottom_ring[i], bottom_ring[j], color)?;

        // Top cap, facing +Z
        builder.add_flat_triangle(top, top_ring[j], top_ring[i], color)?;

        // Side
        builder.add_flat_triangle(top_ring[i], top_ring[j], bottom_ring[j], color)?;
        builder.add_flat_triangle(bottom_ring[j], bottom_ring[i], top_ring[i], color)?;
    }

    Ok(builder.finish(None))
}
