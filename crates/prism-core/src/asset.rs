// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Imported geometry and the loader contract that produces it.

use crate::graphics::{BufferId, GraphicsDevice, GraphicsError};
use glam::{Vec3, Vec4};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An error raised while importing a model.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be read.
    #[error("failed to read '{}'", path.display())]
    Io {
        /// The model path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but could not be parsed.
    #[error("failed to parse '{}': {message}", path.display())]
    Parse {
        /// The model path.
        path: PathBuf,
        /// The importer's message.
        message: String,
    },
    /// The file parsed but contained no geometry.
    #[error("'{}' contains no meshes", path.display())]
    Empty {
        /// The model path.
        path: PathBuf,
    },
}

/// One triangle-list mesh of a model.
///
/// Per-vertex channels are either empty or exactly as long as `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// The mesh name from the source file.
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals.
    pub normals: Vec<Vec3>,
    /// Texture coordinate channels (`z` unused for 2D coordinates).
    pub texture_coordinates: Vec<Vec<Vec3>>,
    /// Vertex color channels.
    pub vertex_colors: Vec<Vec<Vec4>>,
    /// Triangle indices into the vertex channels.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Uploads the indices into a new index buffer.
    pub fn create_index_buffer(
        &self,
        device: &mut dyn GraphicsDevice,
    ) -> Result<BufferId, GraphicsError> {
        device.create_index_buffer(&self.name, &self.indices)
    }
}

/// A set of meshes imported from one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    meshes: Vec<Mesh>,
}

impl Model {
    /// Wraps already imported meshes.
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    /// The meshes, in file order.
    #[must_use]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Whether the model has any meshes.
    #[must_use]
    pub fn has_meshes(&self) -> bool {
        !self.meshes.is_empty()
    }

    /// The first mesh, which is all most demos use.
    pub fn first_mesh(&self) -> Option<&Mesh> {
        self.meshes.first()
    }
}

/// Imports models from disk.
pub trait ModelLoader {
    /// Loads `path`. With `flip_uvs`, texture V coordinates become `1 - v`.
    fn load_model(&self, path: &Path, flip_uvs: bool) -> Result<Model, AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_count() {
        let mesh = Mesh {
            indices: vec![0, 1, 2, 2, 1, 3],
            ..Default::default()
        };
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_empty_model_has_no_first_mesh() {
        let model = Model::default();
        assert!(!model.has_meshes());
        assert!(model.first_mesh().is_none());
    }
}
