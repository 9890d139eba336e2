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

//! Where the demos find their models, textures and effects.

use anyhow::Context;
use prism_core::asset::{Mesh, ModelLoader};
use prism_infra::ObjModelLoader;
use std::path::{Path, PathBuf};

/// The content directory shipped next to this crate.
pub fn default_content_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("content")
}

/// Resolves content file names under one root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    root: PathBuf,
}

impl Content {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn model(&self, name: &str) -> PathBuf {
        self.root.join("models").join(name)
    }

    pub fn texture(&self, name: &str) -> PathBuf {
        self.root.join("textures").join(name)
    }

    pub fn effect(&self, name: &str) -> PathBuf {
        self.root.join("effects").join(name)
    }

    /// Imports `name` and returns its first mesh.
    pub fn load_first_mesh(&self, name: &str, flip_uvs: bool) -> anyhow::Result<Mesh> {
        let path = self.model(name);
        let model = ObjModelLoader::new()
            .load_model(&path, flip_uvs)
            .with_context(|| format!("failed to load model '{}'", path.display()))?;
        model
            .meshes()
            .first()
            .cloned()
            .with_context(|| format!("model '{}' has no meshes", path.display()))
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::new(default_content_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_grouped_by_kind() {
        let content = Content::new("/data");
        assert_eq!(content.model("Sphere.obj"), Path::new("/data/models/Sphere.obj"));
        assert_eq!(content.texture("Earthatday.dds"), Path::new("/data/textures/Earthatday.dds"));
        assert_eq!(content.effect("BasicEffect.fx"), Path::new("/data/effects/BasicEffect.fx"));
    }

    #[test]
    fn test_shipped_sphere_loads() {
        let mesh = Content::default().load_first_mesh("Sphere.obj", true).unwrap();
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.texture_coordinates.len(), 1);
    }

    #[test]
    fn test_missing_model_names_the_path() {
        let error = Content::default()
            .load_first_mesh("Teapot.obj", false)
            .unwrap_err();
        assert!(error.to_string().contains("Teapot.obj"));
    }
}
