//! # Marker Translation
//!
//! Maps a marker record (type, pose, scale, color) onto exactly one
//! tessellator call.
//!
//! ## Conventions
//!
//! - `scale` is a full size: cube edge lengths, sphere and cylinder
//!   diameters. Radii are `scale / 2`.
//! - A cylinder's height is `scale.z`, not halved.
//! - A sphere uses `scale.x` only and ignores the orientation.
//! - Triangle-list points are multiplied by `scale` before placement.
//! - Positions and sizes are multiplied by the configured scaling factor to
//!   convert world units into render units.

use crate::error::{ensure_non_negative, MeshError};
use crate::math::placement_matrix;
use crate::mesh::SubMesh;
use crate::primitives::{
    create_cube, create_cylinder, create_sphere, create_triangle_list, SphereParams,
};
use config::constants::{DEFAULT_COLOR, DEFAULT_CYLINDER_FACETS, DEFAULT_SCALING_FACTOR};
use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Kind of shape a marker describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerType {
    /// Arrow, drawn by an external renderer
    Arrow,
    /// Box
    Cube,
    /// Sphere
    Sphere,
    /// Cylinder along local Z
    Cylinder,
    /// Triangle soup from `points`
    TriangleList,
    /// View-facing text, drawn by an external renderer
    Text,
    /// Any other type code from the marker stream
    Other(i32),
}

impl MarkerType {
    /// Maps a marker stream type code onto a marker type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marker_mesh::marker::MarkerType;
    ///
    /// assert_eq!(MarkerType::from_code(1), MarkerType::Cube);
    /// assert_eq!(MarkerType::from_code(4), MarkerType::Other(4));
    /// ```
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => MarkerType::Arrow,
            1 => MarkerType::Cube,
            2 => MarkerType::Sphere,
            3 => MarkerType::Cylinder,
            9 => MarkerType::Text,
            11 => MarkerType::TriangleList,
            other => MarkerType::Other(other),
        }
    }

    /// Returns true if this engine produces geometry for the type.
    pub fn has_geometry(&self) -> bool {
        match self {
            MarkerType::Cube
            | MarkerType::Sphere
            | MarkerType::Cylinder
            | MarkerType::TriangleList => true,
            MarkerType::Arrow | MarkerType::Text | MarkerType::Other(_) => false,
        }
    }
}

/// RGBA color in [0, 1]. Alpha is a rendering hint and never reaches the
/// vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl ColorRgba {
    /// Creates a color from components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// The RGB part written into vertices.
    #[inline]
    pub fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for ColorRgba {
    fn default() -> Self {
        let [r, g, b, a] = DEFAULT_COLOR;
        Self { r, g, b, a }
    }
}

/// Position and orientation of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    /// Position in world units
    pub position: DVec3,
    /// Orientation quaternion; normalized before use
    pub orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

/// Immutable snapshot of one marker from the marker stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSpec {
    /// Shape kind
    pub marker_type: MarkerType,
    /// Coordinate frame the pose is expressed in
    pub frame_id: String,
    /// Placement
    pub pose: Pose,
    /// Full size per axis
    pub scale: DVec3,
    /// Color used when no per-point color applies
    pub color: ColorRgba,
    /// Triangle corners for [`MarkerType::TriangleList`]
    pub points: Vec<DVec3>,
    /// Optional per-point colors for [`MarkerType::TriangleList`]
    pub colors: Vec<ColorRgba>,
    /// Label for [`MarkerType::Text`]
    pub text: String,
}

impl Default for MarkerSpec {
    fn default() -> Self {
        Self::new(MarkerType::Cube)
    }
}

impl MarkerSpec {
    /// Creates a unit-sized marker of `marker_type` at the origin.
    pub fn new(marker_type: MarkerType) -> Self {
        Self {
            marker_type,
            frame_id: String::new(),
            pose: Pose::default(),
            scale: DVec3::ONE,
            color: ColorRgba::default(),
            points: Vec::new(),
            colors: Vec::new(),
            text: String::new(),
        }
    }
}

/// Tunables for marker tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// World-to-render unit factor applied to positions and sizes
    pub scaling_factor: f64,
    /// Sphere ring counts and shading
    pub sphere: SphereParams,
    /// Number of sides of a cylinder
    pub cylinder_facets: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            scaling_factor: DEFAULT_SCALING_FACTOR,
            sphere: SphereParams::default(),
            cylinder_facets: DEFAULT_CYLINDER_FACETS,
        }
    }
}

/// Converts a marker into its sub-meshes.
///
/// Returns a single colored sub-mesh without material for shapes this
/// engine tessellates, and an empty list for arrows, text and unknown
/// types. An empty list is a valid "nothing to draw" result.
///
/// The output depends only on `marker` and `config`: translating the same
/// snapshot twice yields bit-identical buffers.
///
/// # Errors
///
/// [`MeshError::InvalidInput`] for contract violations such as a negative
/// scale or a triangle list whose point count is not a multiple of 3.
///
/// # Example
///
/// ```rust
/// use marker_mesh::marker::{marker_to_sub_meshes, GenerationConfig, MarkerSpec, MarkerType};
///
/// let cube = MarkerSpec::new(MarkerType::Cube);
/// let meshes = marker_to_sub_meshes(&cube, &GenerationConfig::default()).unwrap();
/// assert_eq!(meshes.len(), 1);
/// assert_eq!(meshes[0].triangle_count(), 12);
///
/// let text = MarkerSpec::new(MarkerType::Text);
/// assert!(marker_to_sub_meshes(&text, &GenerationConfig::default()).unwrap().is_empty());
/// ```
pub fn marker_to_sub_meshes(
    marker: &MarkerSpec,
    config: &GenerationConfig,
) -> Result<Vec<SubMesh>, MeshError> {
    let scaling = config.scaling_factor;
    ensure_non_negative("Scaling factor", scaling)?;

    let pose = &marker.pose;
    let placement = || placement_matrix(pose.position, pose.orientation, scaling);
    let radius = marker.scale / 2.0 * scaling;
    let color = marker.color.rgb();

    log::debug!("Generating geometry for {:?} marker", marker.marker_type);

    let mesh = match marker.marker_type {
        MarkerType::Cube => create_cube(radius, color, &placement())?,
        MarkerType::Sphere => {
            create_sphere(radius.x, color, pose.position * scaling, &config.sphere)?
        }
        MarkerType::Cylinder => {
            let length = marker.scale.z * scaling;
            create_cylinder(&placement(), radius.x, length, color, config.cylinder_facets)?
        }
        MarkerType::TriangleList => {
            let colors: Vec<[f32; 3]> = marker.colors.iter().map(ColorRgba::rgb).collect();
            create_triangle_list(&placement(), radius * 2.0, &marker.points, &colors, color)?
        }
        MarkerType::Arrow | MarkerType::Text | MarkerType::Other(_) => {
            log::debug!(
                "{:?} marker has no geometry in this engine, deferring",
                marker.marker_type
            );
            return Ok(Vec::new());
        }
    };

    Ok(vec![mesh])
}
