//! # Configuration Constants
//!
//! Centralized constants for the marker mesh pipeline. Tessellation defaults,
//! precision values and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Default tessellation parameters for curved primitives
//! - **Limits**: Maximum values for safety bounds
//! - **Scaling**: World-to-render unit conversion
//! - **Frame Labels**: Defaults for frame origin annotations

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Threshold below which a squared length counts as zero.
///
/// An orientation quaternion whose squared length falls under this value is
/// degenerate and replaced by the identity rotation.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// let [x, y, z, w] = [0.0_f64, 0.0, 1e-6, 0.0];
/// assert!(x * x + y * y + z * z + w * w < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// SCALING CONSTANTS
// =============================================================================

/// Default factor from world units to render units.
///
/// Marker positions and sizes are multiplied by this factor before
/// tessellation. 1.0 keeps world units unchanged.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SCALING_FACTOR;
///
/// let diameter_in_render_units = 0.5 * DEFAULT_SCALING_FACTOR;
/// assert_eq!(diameter_in_render_units, 0.5);
/// ```
pub const DEFAULT_SCALING_FACTOR: f64 = 1.0;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of latitude rings for sphere tessellation.
///
/// Latitude runs pole to pole (0 to 180 degrees).
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_SPHERE_LATITUDES, MIN_SPHERE_LATITUDES};
///
/// assert!(DEFAULT_SPHERE_LATITUDES >= MIN_SPHERE_LATITUDES);
/// ```
pub const DEFAULT_SPHERE_LATITUDES: u32 = 16;

/// Minimum number of latitude rings for a sphere.
///
/// With fewer than two rings both pole rings coincide and no triangle
/// survives the degenerate-pole rule.
pub const MIN_SPHERE_LATITUDES: u32 = 2;

/// Default number of facets around a cylinder.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CYLINDER_FACETS;
///
/// // 4 triangles per facet: two cap fan pieces and a side quad
/// let triangles = 4 * DEFAULT_CYLINDER_FACETS;
/// assert_eq!(triangles, 128);
/// ```
pub const DEFAULT_CYLINDER_FACETS: u32 = 32;

/// Minimum number of angular segments for any ring (sphere longitudes,
/// cylinder facets). Fewer than three points cannot enclose an area.
pub const MIN_SEGMENTS: u32 = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single sub-mesh.
///
/// Safety limit to prevent memory exhaustion from extreme tessellation
/// requests. Index buffers are `u32`, so this also keeps every index
/// representable.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 1000;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Default color when none is specified (light gray).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Color written to vertex-colored asset geometry that carries no colors.
pub const MISSING_VERTEX_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

// =============================================================================
// FRAME LABEL CONSTANTS
// =============================================================================

/// Height of the text used to label frame origins (render units).
pub const FRAME_LABEL_HEIGHT: f64 = 0.015;

/// Frame ids starting with this prefix are never labeled.
///
/// The visualization base frame is the reference every other frame is drawn
/// against, so labeling it only adds clutter.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_IGNORED_FRAME_PREFIX;
///
/// assert!("viz_base_link".starts_with(DEFAULT_IGNORED_FRAME_PREFIX));
/// ```
pub const DEFAULT_IGNORED_FRAME_PREFIX: &str = "viz_base";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Default longitude count for a sphere with the given latitude count.
///
/// Longitude spans 360 degrees while latitude spans only 180, so twice as
/// many longitude segments keep the cells roughly square.
///
/// # Example
///
/// ```rust
/// use config::constants::default_longitudes;
///
/// assert_eq!(default_longitudes(8), 16);
/// ```
#[inline]
pub fn default_longitudes(latitudes: u32) -> u32 {
    latitudes.saturating_mul(2)
}
