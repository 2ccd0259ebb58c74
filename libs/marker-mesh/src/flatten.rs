//! # Scene Flattening
//!
//! Bakes an asset hierarchy into static sub-meshes: one sub-mesh per source
//! mesh entry, with every node transform, the axis convention, the global
//! transform and scale applied to the vertices.
//!
//! ## Pipeline per vertex
//!
//! ```text
//! p_source ⊙ scale ─► [Z-up remap] ─► accumulated node transform ─► global transform
//! ```
//!
//! Normals follow the same path through the upper 3x3 of the combined
//! matrix. They are not corrected for non-uniform scale and not
//! re-normalized; assets with non-uniform scale in their hierarchy get
//! skewed normals.
//!
//! ## Failure policy
//!
//! Problems are contained to the smallest unit: a bad face is skipped, a bad
//! entry is dropped, and both are reported as [`Diagnostic`]s. Sibling
//! entries always continue.

use crate::error::MeshError;
use crate::math::{to_f32, transform_normal, transform_point};
use crate::material::MaterialTable;
use crate::mesh::SubMesh;
use crate::scene::{SceneGraph, SourceMesh};
use crate::vertex::{ColoredVertex, TexturedVertex};
use config::constants::{MAX_VERTICES, MISSING_VERTEX_COLOR};
use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied placement of the whole asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    /// Global transform applied after the node transforms
    pub transform: DMat4,
    /// Per-axis scale applied to source positions before anything else
    pub scale: DVec3,
    /// Convert a Y-up asset into the Z-up convention
    pub z_up: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            transform: DMat4::IDENTITY,
            scale: DVec3::ONE,
            z_up: false,
        }
    }
}

impl FlattenOptions {
    /// Scales a source position and applies the axis convention.
    pub fn convert_position(&self, position: DVec3) -> DVec3 {
        let scaled = position * self.scale;
        if self.z_up {
            z_up_remap(scaled)
        } else {
            scaled
        }
    }

    /// Applies the axis convention to a source normal.
    pub fn convert_normal(&self, normal: DVec3) -> DVec3 {
        if self.z_up {
            z_up_remap(normal)
        } else {
            normal
        }
    }
}

/// Maps a Y-up vector into the Z-up convention: `(x, y, z) -> (x, -z, y)`.
///
/// # Example
///
/// ```rust
/// use marker_mesh::flatten::z_up_remap;
/// use glam::DVec3;
///
/// assert_eq!(z_up_remap(DVec3::new(1.0, 2.0, 3.0)), DVec3::new(1.0, -3.0, 2.0));
/// ```
#[inline]
pub fn z_up_remap(v: DVec3) -> DVec3 {
    DVec3::new(v.x, -v.z, v.y)
}

/// A recoverable problem found while flattening, for the caller to log.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A face was not a triangle and was skipped.
    NonTriangularFace {
        /// Node index
        node: usize,
        /// Mesh index within the node
        mesh: usize,
        /// Face index within the mesh
        face: usize,
        /// Number of vertices of the face
        vertex_count: usize,
    },
    /// A face referenced a vertex that does not exist and was skipped.
    FaceIndexOutOfRange {
        /// Node index
        node: usize,
        /// Mesh index within the node
        mesh: usize,
        /// Face index within the mesh
        face: usize,
        /// The offending vertex index
        index: u32,
    },
    /// A whole mesh entry was dropped.
    EntryFailed {
        /// Node index
        node: usize,
        /// Mesh index within the node
        mesh: usize,
        /// Why the entry failed
        error: MeshError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NonTriangularFace {
                node,
                mesh,
                face,
                vertex_count,
            } => write!(
                f,
                "node {node} mesh {mesh}: face {face} has {vertex_count} vertices, expected 3"
            ),
            Diagnostic::FaceIndexOutOfRange {
                node,
                mesh,
                face,
                index,
            } => write!(
                f,
                "node {node} mesh {mesh}: face {face} references missing vertex {index}"
            ),
            Diagnostic::EntryFailed { node, mesh, error } => {
                write!(f, "node {node} mesh {mesh}: {error}")
            }
        }
    }
}

/// Result of flattening a scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    sub_meshes: Vec<SubMesh>,
    diagnostics: Vec<Diagnostic>,
}

impl SceneMesh {
    /// Sub-meshes of all entries that succeeded, in scene order.
    pub fn sub_meshes(&self) -> &[SubMesh] {
        &self.sub_meshes
    }

    /// Consumes the result into its sub-meshes.
    pub fn into_sub_meshes(self) -> Vec<SubMesh> {
        self.sub_meshes
    }

    /// Skipped faces and failed entries, in scene order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if at least one entry was dropped.
    pub fn has_failed_entries(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::EntryFailed { .. }))
    }
}

struct Entry<'a> {
    node: usize,
    mesh: usize,
    source: &'a SourceMesh,
}

struct EntryOutcome {
    result: Result<SubMesh, MeshError>,
    diagnostics: Vec<Diagnostic>,
}

/// Flattens every mesh entry of `scene` into a sub-mesh.
///
/// Entries are visited in node arena order, then in attachment order. Each
/// sub-mesh is tagged with its source material index and uses the textured
/// layout when that material has a texture, the colored layout otherwise.
///
/// # Example
///
/// ```rust
/// use marker_mesh::flatten::{flatten_scene, FlattenOptions};
/// use marker_mesh::material::MaterialTable;
/// use marker_mesh::scene::{SceneGraph, SourceMesh};
/// use glam::{DMat4, DVec3};
///
/// let mut scene = SceneGraph::new();
/// let root = scene.add_root("root", DMat4::IDENTITY);
/// scene.attach_mesh(root, SourceMesh::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![vec![0, 1, 2]], 0));
///
/// let result = flatten_scene(&scene, &MaterialTable::new(), &FlattenOptions::default());
/// assert_eq!(result.sub_meshes().len(), 1);
/// assert!(result.diagnostics().is_empty());
/// ```
pub fn flatten_scene(
    scene: &SceneGraph,
    materials: &MaterialTable,
    options: &FlattenOptions,
) -> SceneMesh {
    let entries: Vec<Entry<'_>> = scene
        .nodes()
        .iter()
        .enumerate()
        .flat_map(|(node, n)| {
            n.meshes.iter().enumerate().map(move |(mesh, source)| Entry {
                node,
                mesh,
                source,
            })
        })
        .collect();

    let outcomes = map_entries(&entries, |entry| {
        flatten_entry(scene, materials, options, entry)
    });

    let mut result = SceneMesh::default();
    for (entry, outcome) in entries.iter().zip(outcomes) {
        result.diagnostics.extend(outcome.diagnostics);
        match outcome.result {
            Ok(sub_mesh) => result.sub_meshes.push(sub_mesh),
            Err(error) => {
                log::warn!(
                    "Dropping mesh {} of node {}: {}",
                    entry.mesh,
                    entry.node,
                    error
                );
                result.diagnostics.push(Diagnostic::EntryFailed {
                    node: entry.node,
                    mesh: entry.mesh,
                    error,
                });
            }
        }
    }
    result
}

#[cfg(feature = "parallel")]
fn map_entries<F>(entries: &[Entry<'_>], f: F) -> Vec<EntryOutcome>
where
    F: Fn(&Entry<'_>) -> EntryOutcome + Sync + Send,
{
    use rayon::prelude::*;
    entries.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_entries<F>(entries: &[Entry<'_>], f: F) -> Vec<EntryOutcome>
where
    F: Fn(&Entry<'_>) -> EntryOutcome,
{
    entries.iter().map(f).collect()
}

fn flatten_entry(
    scene: &SceneGraph,
    materials: &MaterialTable,
    options: &FlattenOptions,
    entry: &Entry<'_>,
) -> EntryOutcome {
    log::trace!("Flattening mesh {} of node {}", entry.mesh, entry.node);

    let mut diagnostics = Vec::new();
    let result = build_sub_mesh(scene, materials, options, entry, &mut diagnostics);
    EntryOutcome {
        result,
        diagnostics,
    }
}

fn build_sub_mesh(
    scene: &SceneGraph,
    materials: &MaterialTable,
    options: &FlattenOptions,
    entry: &Entry<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<SubMesh, MeshError> {
    let source = entry.source;
    source.check_attributes()?;

    let vertex_count = source.positions.len();
    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max: MAX_VERTICES,
        });
    }

    let accumulated = scene.accumulated_transform(entry.node)?;
    let matrix = options.transform * accumulated;

    let indices = triangle_indices(entry, diagnostics);
    if indices.is_empty() {
        return Err(MeshError::invalid_input(format!(
            "mesh {} of node {} has no usable triangles",
            entry.mesh, entry.node
        )));
    }

    let position = |i: usize| {
        to_f32(transform_point(
            &matrix,
            options.convert_position(source.positions[i]),
        ))
    };
    let normal = |i: usize| {
        let n = source
            .normals
            .as_ref()
            .map_or(DVec3::ZERO, |normals| normals[i]);
        to_f32(transform_normal(&matrix, options.convert_normal(n)))
    };

    let material = Some(source.material_index);
    if materials.has_texture(source.material_index) {
        let vertices: Vec<TexturedVertex> = (0..vertex_count)
            .map(|i| {
                let uv = source
                    .tex_coords
                    .as_ref()
                    .map_or(DVec2::ZERO, |uvs| uvs[i]);
                TexturedVertex {
                    position: position(i),
                    normal: normal(i),
                    uv: [uv.x as f32, uv.y as f32],
                }
            })
            .collect();
        Ok(SubMesh::new(vertices, indices, material))
    } else {
        let vertices: Vec<ColoredVertex> = (0..vertex_count)
            .map(|i| ColoredVertex {
                position: position(i),
                normal: normal(i),
                color: source
                    .colors
                    .as_ref()
                    .map_or(MISSING_VERTEX_COLOR, |colors| colors[i].rgb()),
            })
            .collect();
        Ok(SubMesh::new(vertices, indices, material))
    }
}

/// Collects the indices of every usable triangle, recording skipped faces.
fn triangle_indices(entry: &Entry<'_>, diagnostics: &mut Vec<Diagnostic>) -> Vec<u32> {
    let source = entry.source;
    let vertex_count = source.positions.len();
    let mut indices = Vec::with_capacity(source.faces.len() * 3);

    for (face, vertices) in source.faces.iter().enumerate() {
        if vertices.len() != 3 {
            log::warn!(
                "Skipping face {} of mesh {} in node {}: {} vertices, expected 3",
                face,
                entry.mesh,
                entry.node,
                vertices.len()
            );
            diagnostics.push(Diagnostic::NonTriangularFace {
                node: entry.node,
                mesh: entry.mesh,
                face,
                vertex_count: vertices.len(),
            });
            continue;
        }

        if let Some(&index) = vertices.iter().find(|&&i| i as usize >= vertex_count) {
            log::warn!(
                "Skipping face {} of mesh {} in node {}: vertex {} does not exist",
                face,
                entry.mesh,
                entry.node,
                index
            );
            diagnostics.push(Diagnostic::FaceIndexOutOfRange {
                node: entry.node,
                mesh: entry.mesh,
                face,
                index,
            });
            continue;
        }

        indices.extend_from_slice(vertices);
    }
    indices
}
