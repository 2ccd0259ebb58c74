//! # Vertex Layouts
//!
//! The two vertex formats handed to the render-upload collaborator. Both are
//! `#[repr(C)]` so a vertex slice can be uploaded as raw bytes.

use serde::{Deserialize, Serialize};

/// Vertex with a per-vertex color. Used for procedural geometry and for
/// asset meshes whose material has no texture.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColoredVertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Normal in world space
    pub normal: [f32; 3],
    /// RGB color in [0, 1]
    pub color: [f32; 3],
}

/// Vertex with a texture coordinate. Used when the material has a texture.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TexturedVertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Normal in world space
    pub normal: [f32; 3],
    /// Texture coordinate (channel 0)
    pub uv: [f32; 2],
}

/// Which vertex format a sub-mesh uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexLayout {
    /// [`ColoredVertex`]
    Colored,
    /// [`TexturedVertex`]
    Textured,
}

/// Common accessors over both vertex formats.
pub trait Vertex: Copy {
    /// Layout tag of this vertex format.
    const LAYOUT: VertexLayout;

    /// Position in world space.
    fn position(&self) -> [f32; 3];

    /// Normal in world space.
    fn normal(&self) -> [f32; 3];
}

impl Vertex for ColoredVertex {
    const LAYOUT: VertexLayout = VertexLayout::Colored;

    fn position(&self) -> [f32; 3] {
        self.position
    }

    fn normal(&self) -> [f32; 3] {
        self.normal
    }
}

impl Vertex for TexturedVertex {
    const LAYOUT: VertexLayout = VertexLayout::Textured;

    fn position(&self) -> [f32; 3] {
        self.position
    }

    fn normal(&self) -> [f32; 3] {
        self.normal
    }
}
