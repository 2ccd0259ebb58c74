//! # Mesh Errors
//!
//! Error types for geometry generation.
//!
//! Unsupported marker types are not errors: they produce an empty sub-mesh
//! list. Per-face problems in scene assets are recorded as
//! [`Diagnostic`](crate::flatten::Diagnostic)s instead of failing the call.

use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A caller-supplied parameter violates the tessellator contract
    /// (point count not a multiple of 3, negative radius, too few segments)
    /// or a mesh entry has no usable faces left.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A node's ancestor chain cannot be resolved.
    #[error("Missing transform for node {node}: {message}")]
    MissingTransform { node: usize, message: String },

    /// Too many vertices for one sub-mesh
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },
}

impl MeshError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a missing transform error for `node`.
    pub fn missing_transform(node: usize, message: impl Into<String>) -> Self {
        Self::MissingTransform {
            node,
            message: message.into(),
        }
    }
}

/// Fails with [`MeshError::InvalidInput`] unless `value` is finite and not negative.
pub(crate) fn ensure_non_negative(what: &str, value: f64) -> Result<(), MeshError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MeshError::invalid_input(format!(
            "{what} must be a non-negative finite number: {value}"
        )));
    }
    Ok(())
}
