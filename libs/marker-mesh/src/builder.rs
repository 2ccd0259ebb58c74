//! # Vertex Emitter
//!
//! Growing vertex/index buffers for one generation call.
//!
//! Every emitted vertex gets its own index equal to its position in the
//! buffer. Nothing is welded, so after any tessellation
//! `indices.len() == vertices.len()` and both are a multiple of 3.
//!
//! A builder never holds more than [`MAX_VERTICES`] vertices, which keeps
//! every index representable as `u32`.

use crate::error::MeshError;
use crate::math::{face_normal, to_f32};
use crate::mesh::{SubMesh, Vertices};
use crate::vertex::{ColoredVertex, TexturedVertex, Vertex};
use config::constants::MAX_VERTICES;
use glam::{DVec2, DVec3};

/// Builder for one sub-mesh, consumed by [`MeshBuilder::finish`].
///
/// # Example
///
/// ```rust
/// use marker_mesh::builder::MeshBuilder;
/// use glam::DVec3;
///
/// let mut builder = MeshBuilder::new();
/// builder.add_flat_triangle(DVec3::ZERO, DVec3::X, DVec3::Y, [1.0, 0.0, 0.0])?;
/// let mesh = builder.finish(None);
/// assert_eq!(mesh.indices(), &[0, 1, 2]);
/// # Ok::<(), marker_mesh::MeshError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuilder<V> {
    vertices: Vec<V>,
    indices: Vec<u32>,
    limit: usize,
}

impl<V: Vertex> Default for MeshBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> MeshBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            limit: MAX_VERTICES,
        }
    }

    /// Creates a builder sized for `triangle_count` unwelded triangles.
    ///
    /// Fails when the request exceeds [`MAX_VERTICES`].
    pub fn with_triangle_capacity(triangle_count: usize) -> Result<Self, MeshError> {
        let count = triangle_count.saturating_mul(3);
        if count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count,
                max: MAX_VERTICES,
            });
        }

        Ok(Self {
            vertices: Vec::with_capacity(count),
            indices: Vec::with_capacity(count),
            limit: MAX_VERTICES,
        })
    }

    #[cfg(test)]
    fn with_vertex_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::new()
        }
    }

    /// Appends a vertex and its index; returns the index.
    ///
    /// Fails with [`MeshError::TooManyVertices`] once the builder is full.
    pub fn emit(&mut self, vertex: V) -> Result<u32, MeshError> {
        let count = self.vertices.len();
        let too_many = || MeshError::TooManyVertices {
            count: count.saturating_add(1),
            max: self.limit,
        };
        if count >= self.limit {
            return Err(too_many());
        }
        let index = u32::try_from(count).map_err(|_| too_many())?;

        self.vertices.push(vertex);
        self.indices.push(index);
        Ok(index)
    }

    /// Returns the number of vertices emitted so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of complete triangles emitted so far.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Consumes the builder into a sub-mesh tagged with `material`.
    pub fn finish(self, material: Option<usize>) -> SubMesh
    where
        Vertices: From<Vec<V>>,
    {
        SubMesh::new(self.vertices, self.indices, material)
    }
}

impl MeshBuilder<ColoredVertex> {
    /// Emits one colored vertex.
    pub fn emit_colored(
        &mut self,
        position: DVec3,
        normal: DVec3,
        color: [f32; 3],
    ) -> Result<u32, MeshError> {
        self.emit(ColoredVertex {
            position: to_f32(position),
            normal: to_f32(normal),
            color,
        })
    }

    /// Emits a flat-shaded triangle: the three vertices share the face normal.
    pub fn add_flat_triangle(
        &mut self,
        p1: DVec3,
        p2: DVec3,
        p3: DVec3,
        color: [f32; 3],
    ) -> Result<(), MeshError> {
        let normal = face_normal(p1, p2, p3);
        self.emit_colored(p1, normal, color)?;
        self.emit_colored(p2, normal, color)?;
        self.emit_colored(p3, normal, color)?;
        Ok(())
    }
}

impl MeshBuilder<TexturedVertex> {
    /// Emits one textured vertex.
    pub fn emit_textured(
        &mut self,
        position: DVec3,
        normal: DVec3,
        uv: DVec2,
    ) -> Result<u32, MeshError> {
        self.emit(TexturedVertex {
            position: to_f32(position),
            normal: to_f32(normal),
            uv: [uv.x as f32, uv.y as f32],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::VertexLayout;

    #[test]
    fn test_emit_returns_buffer_position() {
        let mut builder = MeshBuilder::<ColoredVertex>::new();
        assert_eq!(builder.emit(ColoredVertex::default()).unwrap(), 0);
        assert_eq!(builder.emit(ColoredVertex::default()).unwrap(), 1);
        assert_eq!(builder.vertex_count(), 2);
    }

    #[test]
    fn test_coincident_vertices_are_not_welded() {
        let mut builder = MeshBuilder::new();
        builder.add_flat_triangle(DVec3::ZERO, DVec3::X, DVec3::Y, [1.0; 3]).unwrap();
        builder.add_flat_triangle(DVec3::ZERO, DVec3::X, DVec3::Y, [1.0; 3]).unwrap();
        let mesh = builder.finish(None);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flat_triangle_shares_normal() {
        let mut builder = MeshBuilder::new();
        builder.add_flat_triangle(DVec3::ZERO, DVec3::X, DVec3::Y, [0.5; 3]).unwrap();
        let mesh = builder.finish(None);
        let vertices = mesh.colored_vertices().unwrap();
        assert!(vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert!(vertices.iter().all(|v| v.color == [0.5; 3]));
    }

    #[test]
    fn test_textured_builder() {
        let mut builder = MeshBuilder::new();
        builder.emit_textured(DVec3::ONE, DVec3::Z, DVec2::new(0.25, 0.75)).unwrap();
        let mesh = builder.finish(Some(1));
        assert_eq!(mesh.layout(), VertexLayout::Textured);
        assert_eq!(mesh.textured_vertices().unwrap()[0].uv, [0.25, 0.75]);
        assert_eq!(mesh.material(), Some(1));
    }

    #[test]
    fn test_capacity_limit() {
        let result = MeshBuilder::<ColoredVertex>::with_triangle_capacity(MAX_VERTICES);
        assert!(matches!(result, Err(MeshError::TooManyVertices { .. })));
        assert!(MeshBuilder::<ColoredVertex>::with_triangle_capacity(12).is_ok());
    }

    #[test]
    fn test_emit_stops_at_vertex_limit() {
        let mut builder = MeshBuilder::<ColoredVertex>::with_vertex_limit(4);
        builder.add_flat_triangle(DVec3::ZERO, DVec3::X, DVec3::Y, [1.0; 3]).unwrap();
        assert!(builder.emit(ColoredVertex::default()).is_ok());
        assert!(matches!(
            builder.emit(ColoredVertex::default()),
            Err(MeshError::TooManyVertices { count: 5, max: 4 })
        ));
        assert_eq!(builder.vertex_count(), 4);
        assert!(matches!(
            builder.add_flat_triangle(DVec3::ZERO, DVec3::X, DVec3::Y, [1.0; 3]),
            Err(MeshError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn test_default_builder_is_bounded() {
        let builder = MeshBuilder::<TexturedVertex>::new();
        assert_eq!(builder.limit, MAX_VERTICES);
        assert!(MAX_VERTICES < u32::MAX as usize);
    }
}
