//! # Mesh Collection
//!
//! Ordered layer name → mesh mapping produced by a stack build, and the
//! bulk persistence step that writes one STL per layer.

use std::path::{Path, PathBuf};

use config::constants::STL_EXTENSION;
use tracing::info;

use crate::error::LithoResult;
use crate::mesh::Mesh;
use crate::stl::{save_stl, StlFormat};

/// Layer meshes in stack order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshCollection {
    meshes: Vec<(String, Mesh)>,
}

impl MeshCollection {
    /// Wraps meshes already in stack order.
    pub fn new(meshes: Vec<(String, Mesh)>) -> Self {
        Self { meshes }
    }

    /// Looks up a mesh by layer name.
    pub fn get(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|(n, _)| n == name).map(|(_, mesh)| mesh)
    }

    /// Layer names in stack order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.meshes.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, mesh)` pairs in stack order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mesh)> {
        self.meshes.iter().map(|(name, mesh)| (name.as_str(), mesh))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Total face count across all layers.
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|(_, mesh)| mesh.face_count()).sum()
    }

    /// Writes `<name>.stl` for every layer into `dir`, creating it if needed.
    ///
    /// Returns the written paths in stack order.
    pub fn save_to_folder(&self, dir: impl AsRef<Path>, format: StlFormat) -> LithoResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut paths = Vec::with_capacity(self.meshes.len());
        for (name, mesh) in &self.meshes {
            let path = dir.join(name).with_extension(STL_EXTENSION);
            save_stl(mesh, &path, name, format)?;
            info!(path = %path.display(), faces = mesh.face_count(), "saved layer");
            paths.push(path);
        }

        Ok(paths)
    }
}
