//! # Sub-Mesh Data Structure
//!
//! Renderer-ready output of a generation pass: one vertex buffer and one
//! index buffer per material, plus the [`MarkerMesh`] holder that tracks
//! when a marker's geometry must be rebuilt.

use crate::error::MeshError;
use crate::flatten::{flatten_scene, FlattenOptions, SceneMesh};
use crate::marker::{marker_to_sub_meshes, GenerationConfig, MarkerSpec};
use crate::material::MaterialTable;
use crate::scene::SceneGraph;
use crate::vertex::{ColoredVertex, TexturedVertex, Vertex, VertexLayout};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Vertex buffer of a sub-mesh in one of the two supported layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Vertices {
    /// Per-vertex colors
    Colored(Vec<ColoredVertex>),
    /// Per-vertex texture coordinates
    Textured(Vec<TexturedVertex>),
}

impl Vertices {
    /// Layout of the stored vertices.
    pub fn layout(&self) -> VertexLayout {
        match self {
            Vertices::Colored(_) => VertexLayout::Colored,
            Vertices::Textured(_) => VertexLayout::Textured,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        match self {
            Vertices::Colored(v) => v.len(),
            Vertices::Textured(v) => v.len(),
        }
    }

    /// Returns true if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions of all vertices, in buffer order.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        match self {
            Vertices::Colored(v) => v.iter().map(Vertex::position).collect(),
            Vertices::Textured(v) => v.iter().map(Vertex::position).collect(),
        }
    }

    /// Normals of all vertices, in buffer order.
    pub fn normals(&self) -> Vec<[f32; 3]> {
        match self {
            Vertices::Colored(v) => v.iter().map(Vertex::normal).collect(),
            Vertices::Textured(v) => v.iter().map(Vertex::normal).collect(),
        }
    }
}

impl From<Vec<ColoredVertex>> for Vertices {
    fn from(vertices: Vec<ColoredVertex>) -> Self {
        Vertices::Colored(vertices)
    }
}

impl From<Vec<TexturedVertex>> for Vertices {
    fn from(vertices: Vec<TexturedVertex>) -> Self {
        Vertices::Textured(vertices)
    }
}

/// An independently indexed vertex/index buffer pair sharing one material.
///
/// Created once per generation pass and never edited afterwards; a new pass
/// replaces it wholesale.
///
/// # Example
///
/// ```rust
/// use marker_mesh::mesh::SubMesh;
/// use marker_mesh::vertex::{ColoredVertex, VertexLayout};
///
/// let v = ColoredVertex::default();
/// let mesh = SubMesh::new(vec![v, v, v], vec![0, 1, 2], None);
/// assert_eq!(mesh.layout(), VertexLayout::Colored);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMesh {
    vertices: Vertices,
    indices: Vec<u32>,
    /// Index into the material table, `None` for "no material"
    material: Option<usize>,
}

impl SubMesh {
    /// Creates a sub-mesh from vertices in either layout.
    pub fn new(vertices: impl Into<Vertices>, indices: Vec<u32>, material: Option<usize>) -> Self {
        Self {
            vertices: vertices.into(),
            indices,
            material,
        }
    }

    /// Vertex layout of this sub-mesh.
    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.vertices.layout()
    }

    /// Material index, or `None` when the sub-mesh has no material.
    #[inline]
    pub fn material(&self) -> Option<usize> {
        self.material
    }

    /// Returns the vertex buffer.
    #[inline]
    pub fn vertices(&self) -> &Vertices {
        &self.vertices
    }

    /// Returns the index buffer (3 indices per triangle).
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the colored vertices, if this sub-mesh uses that layout.
    pub fn colored_vertices(&self) -> Option<&[ColoredVertex]> {
        match &self.vertices {
            Vertices::Colored(v) => Some(v),
            Vertices::Textured(_) => None,
        }
    }

    /// Returns the textured vertices, if this sub-mesh uses that layout.
    pub fn textured_vertices(&self) -> Option<&[TexturedVertex]> {
        match &self.vertices {
            Vertices::Textured(v) => Some(v),
            Vertices::Colored(_) => None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if there is nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Validates the buffers.
    ///
    /// Checks:
    /// - The index count is a multiple of 3
    /// - All indices refer to existing vertices
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len();
        self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < vertex_count)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let positions = self.vertices.positions();
        let Some(first) = positions.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        let first = DVec3::from(first.map(f64::from));
        positions[1..].iter().fold((first, first), |(min, max), p| {
            let p = DVec3::from(p.map(f64::from));
            (min.min(p), max.max(p))
        })
    }
}

/// Geometry for one drawable: a marker snapshot or a flattened asset.
///
/// Tracks whether the stored sub-meshes reflect the current marker. Setting
/// a new marker only marks the mesh stale; [`MarkerMesh::regenerate`]
/// rebuilds every sub-mesh from scratch.
#[derive(Debug, Clone, Default)]
pub struct MarkerMesh {
    marker: Option<MarkerSpec>,
    sub_meshes: Vec<SubMesh>,
    initialized: bool,
    needs_update: bool,
}

impl MarkerMesh {
    /// Creates an empty, uninitialized mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh holding `marker`, not yet generated.
    pub fn from_marker(marker: MarkerSpec) -> Self {
        let mut mesh = Self::new();
        mesh.set_marker(marker);
        mesh
    }

    /// Stores a new marker snapshot and marks the geometry stale.
    pub fn set_marker(&mut self, marker: MarkerSpec) {
        self.marker = Some(marker);
        self.needs_update = true;
    }

    /// The current marker snapshot, if any.
    pub fn marker(&self) -> Option<&MarkerSpec> {
        self.marker.as_ref()
    }

    /// Rebuilds the sub-meshes from the stored marker.
    ///
    /// On error the previous sub-meshes are kept and the mesh stays stale.
    /// Without a marker this is a no-op.
    pub fn regenerate(&mut self, config: &GenerationConfig) -> Result<(), MeshError> {
        let Some(marker) = &self.marker else {
            return Ok(());
        };

        self.sub_meshes = marker_to_sub_meshes(marker, config)?;
        self.initialized = true;
        self.needs_update = false;
        Ok(())
    }

    /// Replaces the sub-meshes with a flattened scene asset.
    ///
    /// Returns the flattening result so the caller can log its diagnostics.
    pub fn load_scene(
        &mut self,
        scene: &SceneGraph,
        materials: &MaterialTable,
        options: &FlattenOptions,
    ) -> SceneMesh {
        let flattened = flatten_scene(scene, materials, options);
        self.marker = None;
        self.sub_meshes = flattened.sub_meshes().to_vec();
        self.initialized = true;
        self.needs_update = false;
        flattened
    }

    /// The generated sub-meshes. Empty means "nothing to draw".
    pub fn sub_meshes(&self) -> &[SubMesh] {
        &self.sub_meshes
    }

    /// Returns true once geometry has been generated at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns true if the stored marker changed since the last generation.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }
}
