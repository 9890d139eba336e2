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

//! A model drawn with per-vertex colours.

use crate::content::Content;
use crate::material::{Material, MeshBuffers};
use crate::vertex::VertexPositionColor;
use anyhow::Context;
use glam::{Mat4, Vec3, Vec4};
use prism_core::asset::Mesh;
use prism_core::graphics::ShaderConstant;
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};
use rand::Rng;

/// Draws the sphere model with the basic effect, coloured by the mesh's
/// first vertex-colour channel or by random colours when it has none.
#[derive(Debug)]
pub struct ModelDemo {
    state: DrawableState,
    content: Content,
    world_matrix: Mat4,
    material: Option<Material>,
    buffers: Option<MeshBuffers>,
}

impl ModelDemo {
    pub fn new(content: Content) -> Self {
        Self {
            state: DrawableState::default(),
            content,
            world_matrix: Mat4::IDENTITY,
            material: None,
            buffers: None,
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.world_matrix = Mat4::from_translation(position);
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// One vertex per mesh position, coloured from the mesh when it can be.
    pub fn build_vertices(mesh: &Mesh) -> Vec<VertexPositionColor> {
        match mesh.vertex_colors.first() {
            Some(colors) => mesh
                .positions
                .iter()
                .zip(colors)
                .map(|(&position, &color)| VertexPositionColor::new(position, color))
                .collect(),
            None => {
                let mut rng = rand::thread_rng();
                mesh.positions
                    .iter()
                    .map(|&position| {
                        let color = Vec4::new(rng.gen(), rng.gen(), rng.gen(), 1.0);
                        VertexPositionColor::new(position, color)
                    })
                    .collect()
            }
        }
    }
}

impl GameComponent for ModelDemo {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "ModelDemo"
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let material = Material::load(
            ctx.device,
            &self.content.effect("BasicEffect.fx"),
            "main11",
            VertexPositionColor::LAYOUT,
        )?;
        let mesh = self.content.load_first_mesh("Sphere.obj", true)?;
        let vertices = Self::build_vertices(&mesh);

        self.buffers = Some(MeshBuffers::upload(ctx.device, &material, &mesh, &vertices)?);
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

impl DrawableGameComponent for ModelDemo {
    fn drawable_state(&self) -> &DrawableState {
        &self.state
    }

    fn drawable_state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        let (Some(material), Some(buffers)) = (&self.material, &self.buffers) else {
            anyhow::bail!("model demo drawn before initialization");
        };
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let view_projection = camera
            .view_projection_matrix()
            .context("camera is unavailable")?;

        buffers.draw(
            ctx.graphics,
            material,
            &[ShaderConstant::new(
                "WorldViewProjection",
                view_projection * self.world_matrix,
            )],
        )?;
        Ok(())
    }
}
