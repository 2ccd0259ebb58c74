//! # Scene Graph
//!
//! In-memory asset hierarchy handed over by the asset loader. Nodes live in
//! an arena and refer to their parent by index, so the child-to-parent walk
//! needs no back pointers.
//!
//! The root (the node without a parent) conventionally carries the loader's
//! axis-normalization matrix; flattening excludes it.

use crate::error::MeshError;
use crate::marker::ColorRgba;
use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Raw per-vertex arrays of one mesh, as parsed by the asset loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMesh {
    /// Vertex positions in node-local space
    pub positions: Vec<DVec3>,
    /// Vertex normals (same length as `positions`), if present
    pub normals: Option<Vec<DVec3>>,
    /// Texture coordinates of channel 0, if present
    pub tex_coords: Option<Vec<DVec2>>,
    /// Vertex colors of channel 0, if present
    pub colors: Option<Vec<ColorRgba>>,
    /// Faces as vertex index lists; only triangles are used
    pub faces: Vec<Vec<u32>>,
    /// Index into the material table
    pub material_index: usize,
}

impl SourceMesh {
    /// Creates a mesh from positions and faces with no other attributes.
    pub fn new(positions: Vec<DVec3>, faces: Vec<Vec<u32>>, material_index: usize) -> Self {
        Self {
            positions,
            faces,
            material_index,
            ..Default::default()
        }
    }

    /// Checks that every present attribute array matches the position count.
    pub fn check_attributes(&self) -> Result<(), MeshError> {
        let expected = self.positions.len();
        let lengths = [
            ("normals", self.normals.as_ref().map(Vec::len)),
            ("texture coordinates", self.tex_coords.as_ref().map(Vec::len)),
            ("colors", self.colors.as_ref().map(Vec::len)),
        ];

        for (name, len) in lengths {
            if let Some(len) = len {
                if len != expected {
                    return Err(MeshError::invalid_input(format!(
                        "Mesh has {len} {name} for {expected} positions"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One node of the asset hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Node name from the asset
    pub name: String,
    /// Transform relative to the parent
    pub transform: DMat4,
    /// Arena index of the parent, `None` for the root
    pub parent: Option<usize>,
    /// Meshes attached to this node
    pub meshes: Vec<SourceMesh>,
}

impl SceneNode {
    /// Creates a node without meshes.
    pub fn new(name: impl Into<String>, transform: DMat4, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            transform,
            parent,
            meshes: Vec::new(),
        }
    }
}

/// Arena of scene nodes.
///
/// # Example
///
/// ```rust
/// use marker_mesh::scene::SceneGraph;
/// use glam::{DMat4, DVec3};
///
/// let mut scene = SceneGraph::new();
/// let root = scene.add_root("root", DMat4::IDENTITY);
/// let arm = scene.add_child(root, "arm", DMat4::from_translation(DVec3::X));
/// assert_eq!(scene.node(arm).and_then(|n| n.parent), Some(root));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a scene from nodes whose parent indices refer to the same list.
    ///
    /// Parent indices are not checked here; a broken chain is reported per
    /// mesh entry when the scene is flattened.
    pub fn from_nodes(nodes: Vec<SceneNode>) -> Self {
        Self { nodes }
    }

    /// Adds a parentless node and returns its index.
    pub fn add_root(&mut self, name: impl Into<String>, transform: DMat4) -> usize {
        self.push(SceneNode::new(name, transform, None))
    }

    /// Adds a child of `parent` and returns its index.
    pub fn add_child(&mut self, parent: usize, name: impl Into<String>, transform: DMat4) -> usize {
        self.push(SceneNode::new(name, transform, Some(parent)))
    }

    /// Adds a node as is and returns its index.
    pub fn push(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Attaches a mesh to `node`. Returns false if the node does not exist.
    pub fn attach_mesh(&mut self, node: usize, mesh: SourceMesh) -> bool {
        match self.nodes.get_mut(node) {
            Some(n) => {
                n.meshes.push(mesh);
                true
            }
            None => false,
        }
    }

    /// Returns the node at `index`.
    pub fn node(&self, index: usize) -> Option<&SceneNode> {
        self.nodes.get(index)
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Composes the transforms from `node` up to, but excluding, the root.
    ///
    /// Returns `A_k * ... * A_1 * node.transform` where `A_i` are the
    /// non-root ancestors, so the node's own transform is applied first.
    /// A node that is itself the root gets identity.
    ///
    /// # Errors
    ///
    /// [`MeshError::MissingTransform`] if `node` or an ancestor index does
    /// not exist, or if the parent chain loops.
    pub fn accumulated_transform(&self, node: usize) -> Result<DMat4, MeshError> {
        let mut current = self.lookup(node, node)?;
        let mut transform = DMat4::IDENTITY;

        // A chain longer than the arena must revisit a node
        for _ in 0..=self.nodes.len() {
            let Some(parent) = current.parent else {
                return Ok(transform);
            };
            transform = current.transform * transform;
            current = self.lookup(node, parent)?;
        }

        Err(MeshError::missing_transform(
            node,
            "parent chain does not reach a root",
        ))
    }

    fn lookup(&self, node: usize, index: usize) -> Result<&SceneNode, MeshError> {
        self.nodes.get(index).ok_or_else(|| {
            MeshError::missing_transform(node, format!("node {index} does not exist"))
        })
    }
}
