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

//! A model drawn with a colour texture.

use crate::content::Content;
use crate::material::{Material, MeshBuffers};
use crate::vertex::VertexPositionTexture;
use anyhow::Context;
use glam::{Mat4, Vec3};
use prism_core::asset::Mesh;
use prism_core::graphics::{ShaderConstant, TextureId};
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};

#[derive(Debug)]
pub struct TextureModelDemo {
    state: DrawableState,
    content: Content,
    world_matrix: Mat4,
    material: Option<Material>,
    buffers: Option<MeshBuffers>,
    texture: Option<TextureId>,
}

impl TextureModelDemo {
    pub fn new(content: Content) -> Self {
        Self {
            state: DrawableState::default(),
            content,
            world_matrix: Mat4::IDENTITY,
            material: None,
            buffers: None,
            texture: None,
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.world_matrix = Mat4::from_translation(position);
    }

    /// Pairs each position with the first texture-coordinate channel.
    pub fn build_vertices(mesh: &Mesh) -> anyhow::Result<Vec<VertexPositionTexture>> {
        let uvs = mesh
            .texture_coordinates
            .first()
            .filter(|uvs| uvs.len() == mesh.positions.len())
            .context("mesh has no texture coordinates for every vertex")?;
        Ok(mesh
            .positions
            .iter()
            .zip(uvs)
            .map(|(&position, uv)| VertexPositionTexture::new(position, uv.truncate()))
            .collect())
    }
}

impl GameComponent for TextureModelDemo {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "TextureModelDemo"
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let material = Material::load(
            ctx.device,
            &self.content.effect("TextureMapping.fx"),
            "main11",
            VertexPositionTexture::LAYOUT,
        )?;
        let mesh = self.content.load_first_mesh("Sphere.obj", true)?;
        let vertices = Self::build_vertices(&mesh)?;

        self.buffers = Some(MeshBuffers::upload(ctx.device, &material, &mesh, &vertices)?);
        self.texture = Some(ctx.device.load_texture(&self.content.texture("Earthatday.dds"))?);
        self.material = Some(material);
        Ok(())
    }

    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        Some(self)
    }
}

impl DrawableGameComponent for TextureModelDemo {
    fn drawable_state(&self) -> &DrawableState {
        &self.state
    }

    fn drawable_state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        let (Some(material), Some(buffers), Some(texture)) =
            (&self.material, &self.buffers, self.texture)
        else {
            anyhow::bail!("texture model demo drawn before initialization");
        };
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let view_projection = camera
            .view_projection_matrix()
            .context("camera is unavailable")?;

        buffers.draw(
            ctx.graphics,
            material,
            &[
                ShaderConstant::new("WorldViewProjection", view_projection * self.world_matrix),
                ShaderConstant::new("ColorTexture", texture),
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_without_uvs_is_rejected() {
        let mesh = Mesh {
            positions: vec![Vec3::ZERO],
            ..Default::default()
        };
        assert!(TextureModelDemo::build_vertices(&mesh).is_err());
    }

    #[test]
    fn test_uvs_drop_the_third_component() {
        let mesh = Mesh {
            positions: vec![Vec3::ZERO],
            texture_coordinates: vec![vec![Vec3::new(0.25, 0.75, 0.0)]],
            ..Default::default()
        };
        let vertices = TextureModelDemo::build_vertices(&mesh).unwrap();
        assert_eq!(vertices[0].texture_coordinates, [0.25, 0.75]);
    }
}
