//! # Material Table
//!
//! Materials of a loaded asset. The engine only asks whether a material has
//! a texture, which decides the vertex layout of its sub-meshes. Decoding
//! and binding textures belongs to the render collaborator.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Opaque reference to a texture owned by the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// One material entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse texture, if one was loaded
    pub texture: Option<TextureHandle>,
}

impl Material {
    /// A material with a diffuse texture.
    pub fn textured(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
        }
    }

    /// A material without texture.
    pub fn untextured() -> Self {
        Self::default()
    }
}

/// Materials indexed by the material index stored on each source mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a material and returns its index.
    pub fn push(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Returns the material at `index`.
    pub fn get(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Returns the texture bound to material `index`.
    pub fn texture(&self, index: usize) -> Option<TextureHandle> {
        self.get(index).and_then(|m| m.texture)
    }

    /// Returns true if material `index` exists and has a texture.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marker_mesh::material::{Material, MaterialTable, TextureHandle};
    ///
    /// let mut table = MaterialTable::new();
    /// table.push(Material::untextured());
    /// table.push(Material::textured(TextureHandle(7)));
    /// assert!(!table.has_texture(0));
    /// assert!(table.has_texture(1));
    /// assert!(!table.has_texture(2));
    /// ```
    pub fn has_texture(&self, index: usize) -> bool {
        self.texture(index).is_some()
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the table has no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl FromIterator<Material> for MaterialTable {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        Self {
            materials: iter.into_iter().collect(),
        }
    }
}

/// Resolves a texture path stored in a material relative to the model file.
///
/// The texture lives next to the model: a model without a directory part
/// resolves against `.`, a model directly under the filesystem root against
/// `/`. No file is accessed.
///
/// # Example
///
/// ```rust
/// use marker_mesh::material::resolve_texture_path;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     resolve_texture_path("models/robot.dae", "skin.png"),
///     PathBuf::from("models/skin.png")
/// );
/// assert_eq!(resolve_texture_path("robot.dae", "skin.png"), PathBuf::from("./skin.png"));
/// ```
pub fn resolve_texture_path(model_file: impl AsRef<Path>, texture: impl AsRef<Path>) -> PathBuf {
    let directory = match model_file.as_ref().parent() {
        Some(dir) if dir.as_os_str().is_empty() => Path::new("."),
        Some(dir) => dir,
        None => Path::new("/"),
    };
    directory.join(texture)
}
