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

//! A cube-mapped sphere surrounding the camera.

use crate::content::Content;
use crate::material::{Material, MeshBuffers};
use crate::vertex::VertexPosition;
use anyhow::Context;
use glam::{Mat4, Vec3};
use prism_core::graphics::{ShaderConstant, TextureId};
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};

/// Follows the camera every update so the sky never gets closer.
#[derive(Debug)]
pub struct Skybox {
    state: DrawableState,
    content: Content,
    cube_map_name: &'static str,
    scale: f32,
    world_matrix: Mat4,
    material: Option<Material>,
    buffers: Option<MeshBuffers>,
    cube_map: Option<TextureId>,
}

impl Skybox {
    pub const DEFAULT_SCALE: f32 = 500.0;

    pub fn new(content: Content, cube_map_name: &'static str, scale: f32) -> Self {
        Self {
            state: DrawableState::default(),
            content,
            cube_map_name,
            scale,
            world_matrix: Mat4::from_scale(Vec3::splat(scale)),
            material: None,
            buffers: None,
            cube_map: None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }
}

impl GameComponent for Skybox {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "Skybox"
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let mesh = self.content.load_first_mesh("Sphere.obj", false)?;
        let material = Material::load(
            ctx.device,
            &self.content.effect("Skybox.fx"),
            "main11",
            VertexPosition::LAYOUT,
        )?;
        let vertices: Vec<_> = mesh.positions.iter().copied().map(VertexPosition::new).collect();

        self.buffers = Some(MeshBuffers::upload(ctx.device, &material, &mesh, &vertices)?);
        self.cube_map = Some(ctx.device.load_texture(&self.content.texture(self.cube_map_name))?);
        self.material = Some(material);
        Ok(())
    }

    fn update(&mut self, ctx: &mut GameContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let eye = camera.position().context("camera is unavailable")?;
        self.world_matrix = Mat4::from_translation(eye) * Mat4::from_scale(Vec3::splat(self.scale));
        Ok(())
    }

    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        Some(self)
    }
}

impl DrawableGameComponent for Skybox {
    fn drawable_state(&self) -> &DrawableState {
        &self.state
    }

    fn drawable_state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        let (Some(material), Some(buffers), Some(cube_map)) =
            (&self.material, &self.buffers, self.cube_map)
        else {
            anyhow::bail!("skybox drawn before initialization");
        };
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let view_projection = camera
            .view_projection_matrix()
            .context("camera is unavailable")?;

        ctx.graphics.state_mut().rasterizer = ctx.render_states.front_culling();
        buffers.draw(
            ctx.graphics,
            material,
            &[
                ShaderConstant::new("WorldViewProjection", view_projection * self.world_matrix),
                ShaderConstant::new("SkyboxTexture", cube_map),
            ],
        )?;
        Ok(())
    }
}
