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

//! A small wireframe model marking where a light sits.

use crate::content::Content;
use crate::material::{Material, MeshBuffers};
use crate::vertex::VertexPositionColor;
use anyhow::Context;
use glam::{Mat3, Mat4, Vec3};
use prism_core::graphics::{color, Color, ShaderConstant};
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};

/// Renders a model with the basic effect at a position, orientation and
/// uniform scale.
///
/// Owned by the demo whose light it follows; the demo forwards its own
/// hooks to it.
#[derive(Debug)]
pub struct ProxyModel {
    state: DrawableState,
    content: Content,
    model_name: &'static str,
    scale: f32,
    color: Color,
    display_wireframe: bool,
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    world_matrix: Mat4,
    material: Option<Material>,
    buffers: Option<MeshBuffers>,
}

impl ProxyModel {
    pub fn new(content: Content, model_name: &'static str, scale: f32) -> Self {
        Self {
            state: DrawableState::default(),
            content,
            model_name,
            scale,
            color: color::WHITE,
            display_wireframe: true,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_matrix: Mat4::IDENTITY,
            material: None,
            buffers: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn display_wireframe(&self) -> bool {
        self.display_wireframe
    }

    pub fn set_display_wireframe(&mut self, display_wireframe: bool) {
        self.display_wireframe = display_wireframe;
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    pub fn apply_rotation(&mut self, rotation: Mat3) {
        self.direction = (rotation * self.direction).normalize();
        self.up = (rotation * self.up).normalize();
        self.right = self.direction.cross(self.up).normalize();
        self.up = self.right.cross(self.direction).normalize();
    }

    fn orientation(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_cols(self.right, self.up, -self.direction))
    }
}

impl GameComponent for ProxyModel {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "ProxyModel"
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let mesh = self.content.load_first_mesh(self.model_name, false)?;
        let material = Material::load(
            ctx.device,
            &self.content.effect("BasicEffect.fx"),
            "main11",
            VertexPositionColor::LAYOUT,
        )?;

        let vertices: Vec<_> = mesh
            .positions
            .iter()
            .map(|&position| VertexPositionColor::new(position, self.color))
            .collect();
        self.buffers = Some(MeshBuffers::upload(ctx.device, &material, &mesh, &vertices)?);
        self.material = Some(material);
        Ok(())
    }

    fn update(&mut self, _ctx: &mut GameContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        self.world_matrix = Mat4::from_translation(self.position)
            * self.orientation()
            * Mat4::from_scale(Vec3::splat(self.scale));
        Ok(())
    }

    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        Some(self)
    }
}

impl DrawableGameComponent for ProxyModel {
    fn drawable_state(&self) -> &DrawableState {
        &self.state
    }

    fn drawable_state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        let (Some(material), Some(buffers)) = (&self.material, &self.buffers) else {
            anyhow::bail!("proxy model drawn before initialization");
        };
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let view_projection = camera
            .view_projection_matrix()
            .context("camera is unavailable")?;

        if self.display_wireframe {
            ctx.graphics.state_mut().rasterizer = ctx.render_states.wireframe();
        }
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
