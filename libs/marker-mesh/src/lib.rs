//! # Marker Mesh
//!
//! Geometry generation for a 3D visualization client. Converts marker
//! descriptions and hierarchical mesh assets into renderer-ready
//! vertex/index buffers.
//!
//! ## Architecture
//!
//! ```text
//! MarkerSpec ──► marker ──► primitives ──► MeshBuilder ──┐
//!                                                        ├──► Vec<SubMesh>
//! SceneGraph ──► flatten ────────────────────────────────┘
//! ```
//!
//! ## Conventions
//!
//! - Geometry is computed in `f64` and stored as `f32` in vertex buffers
//! - Triangles are unwelded and wound counter-clockwise seen from outside
//! - An empty sub-mesh list means "nothing to draw", never an error
//!
//! ## Usage
//!
//! ```rust
//! use marker_mesh::{marker_to_sub_meshes, GenerationConfig, MarkerSpec, MarkerType};
//! use glam::DVec3;
//!
//! let mut marker = MarkerSpec::new(MarkerType::Sphere);
//! marker.scale = DVec3::splat(0.2);
//! let meshes = marker_to_sub_meshes(&marker, &GenerationConfig::default())?;
//! assert_eq!(meshes.len(), 1);
//! # Ok::<(), marker_mesh::MeshError>(())
//! ```

pub mod builder;
pub mod error;
pub mod flatten;
pub mod labels;
pub mod marker;
pub mod material;
pub mod math;
pub mod mesh;
pub mod primitives;
pub mod scene;
pub mod vertex;

pub use builder::MeshBuilder;
pub use error::MeshError;
pub use flatten::{flatten_scene, Diagnostic, FlattenOptions, SceneMesh};
pub use labels::{frame_labels, FrameCache};
pub use marker::{marker_to_sub_meshes, ColorRgba, GenerationConfig, MarkerSpec, MarkerType, Pose};
pub use material::{resolve_texture_path, Material, MaterialTable, TextureHandle};
pub use mesh::{MarkerMesh, SubMesh, Vertices};
pub use primitives::SphereParams;
pub use scene::{SceneGraph, SceneNode, SourceMesh};
pub use vertex::{ColoredVertex, TexturedVertex, Vertex, VertexLayout};
