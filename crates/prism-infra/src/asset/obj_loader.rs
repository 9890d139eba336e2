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

//! Wavefront OBJ import through `tobj`.

use glam::{Vec3, Vec4};
use prism_core::asset::{AssetError, Mesh, Model, ModelLoader};
use std::path::Path;

/// Loads OBJ files, triangulating faces and unifying indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjModelLoader;

impl ObjModelLoader {
    /// Creates a loader.
    pub fn new() -> Self {
        Self
    }

    fn convert_mesh(model: tobj::Model, flip_uvs: bool) -> Mesh {
        let name = model.name;
        let mesh = model.mesh;

        let positions = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();

        let normals = mesh
            .normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect();

        let mut texture_coordinates = Vec::new();
        if !mesh.texcoords.is_empty() {
            texture_coordinates.push(
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| {
                        let v = if flip_uvs { 1.0 - t[1] } else { t[1] };
                        Vec3::new(t[0], v, 0.0)
                    })
                    .collect(),
            );
        }

        let mut vertex_colors = Vec::new();
        if !mesh.vertex_color.is_empty() {
            vertex_colors.push(
                mesh.vertex_color
                    .chunks_exact(3)
                    .map(|c| Vec4::new(c[0], c[1], c[2], 1.0))
                    .collect(),
            );
        }

        Mesh {
            name,
            positions,
            normals,
            texture_coordinates,
            vertex_colors,
            indices: mesh.indices,
        }
    }
}

impl ModelLoader for ObjModelLoader {
    fn load_model(&self, path: &Path, flip_uvs: bool) -> Result<Model, AssetError> {
        std::fs::metadata(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|e| AssetError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let meshes: Vec<Mesh> = models
            .into_iter()
            .map(|model| Self::convert_mesh(model, flip_uvs))
            .filter(|mesh| !mesh.indices.is_empty())
            .collect();

        if meshes.is_empty() {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }

        log::debug!(
            "Loaded '{}' with {} mesh(es).",
            path.display(),
            meshes.len()
        );
        Ok(Model::new(meshes))
    }
}
