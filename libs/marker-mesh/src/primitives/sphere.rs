//! # Sphere Primitive
//!
//! Generates a UV sphere using latitude/longitude tessellation.

use crate::builder::MeshBuilder;
use crate::error::{ensure_non_negative, MeshError};
use crate::math::sphere_to_cartesian;
use crate::mesh::SubMesh;
use config::constants::{
    default_longitudes, DEFAULT_SPHERE_LATITUDES, MAX_VERTICES, MIN_SEGMENTS,
    MIN_SPHERE_LATITUDES,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tessellation parameters for spheres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    /// Number of latitude rings, pole to pole
    pub latitudes: u32,
    /// Number of longitude segments; twice `latitudes` when `None`
    pub longitudes: Option<u32>,
    /// Per-vertex radial normals instead of flat per-triangle normals
    pub smooth: bool,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            latitudes: DEFAULT_SPHERE_LATITUDES,
            longitudes: None,
            smooth: false,
        }
    }
}

impl SphereParams {
    /// Effective longitude count.
    pub fn longitudes(&self) -> u32 {
        self.longitudes
            .unwrap_or_else(|| default_longitudes(self.latitudes))
    }

    /// Number of triangles these parameters produce: `2 * M * (L - 1)`.
    ///
    /// Both pole rings contribute one triangle per cell, every other ring two.
    /// Returns `None` when the count does not fit in `usize`.
    pub fn triangle_count(&self) -> Option<usize> {
        let latitudes = self.latitudes as usize;
        (self.longitudes() as usize)
            .checked_mul(latitudes.saturating_sub(1))?
            .checked_mul(2)
    }
}

/// Creates a sphere mesh.
///
/// # Arguments
///
/// * `radius` - The radius of the sphere
/// * `color` - RGB color of every vertex
/// * `center` - World-space center
/// * `params` - Ring counts and shading mode
///
/// # Algorithm
///
/// For every (lat, lon) cell the four corners are
/// `p1 = (az1, el1)`, `p2 = (az2, el1)`, `p3 = (az2, el2)`, `p4 = (az1, el2)`
/// with elevation measured from the +Z pole. The cell is split along the
/// `p1`-`p3` diagonal. In the first ring `p1` and `p2` coincide at the pole,
/// so only `(p3, p1, p4)` is emitted; in the last ring `p3` and `p4` coincide,
/// so only `(p3, p2, p1)` is emitted.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::{create_sphere, SphereParams};
/// use glam::DVec3;
///
/// let params = SphereParams { latitudes: 8, longitudes: None, smooth: false };
/// let mesh = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params).unwrap();
/// assert_eq!(mesh.triangle_count(), 2 * 16 * 7);
/// ```
pub fn create_sphere(
    radius: f64,
    color: [f32; 3],
    center: DVec3,
    params: &SphereParams,
) -> Result<SubMesh, MeshError> {
    ensure_non_negative("Sphere radius", radius)?;

    let num_lat = params.latitudes;
    let num_lon = params.longitudes();

    if num_lat < MIN_SPHERE_LATITUDES {
        return Err(MeshError::invalid_input(format!(
            "Sphere latitudes must be at least {MIN_SPHERE_LATITUDES}: {num_lat}"
        )));
    }

    if num_lon < MIN_SEGMENTS {
        return Err(MeshError::invalid_input(format!(
            "Sphere longitudes must be at least {MIN_SEGMENTS}: {num_lon}"
        )));
    }

    let triangle_count = params.triangle_count().ok_or(MeshError::TooManyVertices {
        count: usize::MAX,
        max: MAX_VERTICES,
    })?;
    let mut builder = MeshBuilder::with_triangle_capacity(triangle_count)?;

    for lat in 0..num_lat {
        let elevation1 = lat as f64 / num_lat as f64 * PI;
        let elevation2 = (lat + 1) as f64 / num_lat as f64 * PI;
        let first_ring = lat == 0;
        let last_ring = lat == num_lat - 1;

        for lon in 0..num_lon {
            let azimuth1 = lon as f64 / num_lon as f64 * PI * 2.0;
            let azimuth2 = (lon + 1) as f64 / num_lon as f64 * PI * 2.0;

            // Unit directions double as smooth normals
            let n1 = sphere_to_cartesian(azimuth1, elevation1, 1.0);
            let n2 = sphere_to_cartesian(azimuth2, elevation1, 1.0);
            let n3 = sphere_to_cartesian(azimuth2, elevation2, 1.0);
            let n4 = sphere_to_cartesian(azimuth1, elevation2, 1.0);

            let p1 = center + n1 * radius;
            let p2 = center + n2 * radius;
            let p3 = center + n3 * radius;
            let p4 = center + n4 * radius;

            if params.smooth {
                if !first_ring {
                    builder.emit_colored(p3, n3, color)?;
                    builder.emit_colored(p2, n2, color)?;
                    builder.emit_colored(p1, n1, color)?;
                }
                if !last_ring {
                    builder.emit_colored(p3, n3, color)?;
                    builder.emit_colored(p1, n1, color)?;
                    builder.emit_colored(p4, n4, color)?;
                }
            } else {
                if !first_ring {
                    builder.add_flat_triangle(p3, p2, p1, color)?;
                }
                if !last_ring {
                    builder.add_flat_triangle(p3, p1, p4, color)?;
                }
            }
        }
    }

    Ok(builder.finish(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn params(latitudes: u32, longitudes: Option<u32>, smooth: bool) -> SphereParams {
        SphereParams {
            latitudes,
            longitudes,
            smooth,
        }
    }

    #[test]
    fn test_sphere_triangle_count() {
        let mesh = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params(6, Some(10), false)).unwrap();
        assert_eq!(mesh.triangle_count(), 2 * 10 * 5);
        assert!(mesh.validate());
    }

    #[test]
    fn test_sphere_default_longitudes() {
        let p = SphereParams::default();
        assert_eq!(p.longitudes(), 2 * DEFAULT_SPHERE_LATITUDES);
        let mesh = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &p).unwrap();
        assert_eq!(Some(mesh.triangle_count()), p.triangle_count());
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let center = DVec3::new(1.0, -2.0, 3.0);
        let mesh = create_sphere(2.5, [1.0; 3], center, &params(8, None, false)).unwrap();
        for p in mesh.vertices().positions() {
            let p = DVec3::from(p.map(f64::from));
            assert_abs_diff_eq!(p.distance(center), 2.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_flat_normals_point_outward() {
        let mesh = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params(8, None, false)).unwrap();
        let vertices = mesh.colored_vertices().unwrap();
        for v in vertices {
            let p = DVec3::from(v.position.map(f64::from));
            let n = DVec3::from(v.normal.map(f64::from));
            assert!(p.dot(n) > 0.0);
        }
    }

    #[test]
    fn test_sphere_no_degenerate_pole_triangles() {
        let mesh = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params(4, None, false)).unwrap();
        let vertices = mesh.colored_vertices().unwrap();
        for v in vertices {
            let n = DVec3::from(v.normal.map(f64::from));
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_smooth_normals_are_radial() {
        let center = DVec3::new(0.0, 0.0, 5.0);
        let mesh = create_sphere(3.0, [1.0; 3], center, &params(6, None, true)).unwrap();
        assert_eq!(mesh.triangle_count(), 2 * 12 * 5);
        for v in mesh.colored_vertices().unwrap() {
            let p = DVec3::from(v.position.map(f64::from));
            let n = DVec3::from(v.normal.map(f64::from));
            let radial = (p - center) / 3.0;
            assert_abs_diff_eq!(n.distance(radial), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_smooth_winding_matches_flat() {
        let flat = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params(5, None, false)).unwrap();
        let smooth = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params(5, None, true)).unwrap();
        assert_eq!(flat.vertices().positions(), smooth.vertices().positions());
    }

    #[test]
    fn test_sphere_negative_radius() {
        let result = create_sphere(-5.0, [1.0; 3], DVec3::ZERO, &SphereParams::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_sphere_too_few_latitudes() {
        let result = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params(1, None, false));
        assert!(matches!(result, Err(MeshError::InvalidInput { .. })));
    }

    #[test]
    fn test_sphere_too_few_longitudes() {
        let result = create_sphere(1.0, [1.0; 3], DVec3::ZERO, &params(4, Some(2), false));
        assert!(matches!(result, Err(MeshError::InvalidInput { .. })));
    }

    #[test]
    fn test_sphere_huge_ring_count_is_rejected() {
        let huge = params(u32::MAX, None, false);
        assert_eq!(huge.triangle_count(), None);
        assert!(matches!(
            create_sphere(1.0, [1.0; 3], DVec3::ZERO, &huge),
            Err(MeshError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn test_sphere_over_capacity_is_rejected() {
        let big = params(4096, Some(4096), false);
        assert!(big.triangle_count().is_some());
        assert!(matches!(
            create_sphere(1.0, [1.0; 3], DVec3::ZERO, &big),
            Err(MeshError::TooManyVertices { .. })
        ));
    }
}
