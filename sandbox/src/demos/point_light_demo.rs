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

//! A textured model lit by a movable point light.

use super::LightingControls;
use crate::components::ProxyModel;
use crate::content::Content;
use crate::lights::PointLight;
use crate::material::{Material, MeshBuffers};
use crate::vertex::VertexPositionTextureNormal;
use anyhow::Context;
use glam::{Mat4, Vec2, Vec3};
use prism_core::asset::Mesh;
use prism_core::graphics::{color, ShaderConstant, TextureId};
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};
use prism_infra::Keyboard;

#[derive(Debug)]
pub struct PointLightDemo {
    state: DrawableState,
    content: Content,
    controls: LightingControls,
    point_light: PointLight,
    world_matrix: Mat4,
    proxy_model: ProxyModel,
    text_position: Vec2,
    material: Option<Material>,
    buffers: Option<MeshBuffers>,
    texture: Option<TextureId>,
}

impl PointLightDemo {
    pub fn new(content: Content) -> Self {
        let proxy_model = ProxyModel::new(content.clone(), "PointLightProxy.obj", 0.5);
        Self {
            state: DrawableState::default(),
            content,
            controls: LightingControls::default(),
            point_light: PointLight::new(Vec3::new(5.0, 0.0, 10.0), 500.0),
            world_matrix: Mat4::IDENTITY,
            proxy_model,
            text_position: Vec2::new(0.0, 40.0),
            material: None,
            buffers: None,
            texture: None,
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.world_matrix = Mat4::from_translation(position);
    }

    pub fn controls(&self) -> &LightingControls {
        &self.controls
    }

    pub fn point_light(&self) -> &PointLight {
        &self.point_light
    }

    pub fn proxy_model(&self) -> &ProxyModel {
        &self.proxy_model
    }

    pub fn help_text(&self) -> String {
        self.controls.help_text(&self.point_light, "Point Light")
    }
}

/// Position, first UV channel and normal for every vertex of `mesh`.
pub(crate) fn lit_vertices(mesh: &Mesh) -> anyhow::Result<Vec<VertexPositionTextureNormal>> {
    let uvs = mesh
        .texture_coordinates
        .first()
        .filter(|uvs| uvs.len() == mesh.positions.len())
        .context("mesh has no texture coordinates for every vertex")?;
    anyhow::ensure!(
        mesh.normals.len() == mesh.positions.len(),
        "mesh has no normal for every vertex"
    );
    Ok(mesh
        .positions
        .iter()
        .zip(uvs)
        .zip(&mesh.normals)
        .map(|((&position, uv), &normal)| {
            VertexPositionTextureNormal::new(position, uv.truncate(), normal)
        })
        .collect())
}

impl GameComponent for PointLightDemo {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "PointLightDemo"
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let mesh = self.content.load_first_mesh("Sphere.obj", true)?;
        let material = Material::load(
            ctx.device,
            &self.content.effect("PointLight.fx"),
            "main11",
            VertexPositionTextureNormal::LAYOUT,
        )?;
        let vertices = lit_vertices(&mesh)?;

        self.buffers = Some(MeshBuffers::upload(ctx.device, &material, &mesh, &vertices)?);
        self.texture = Some(ctx.device.load_texture(&self.content.texture("Earthatday.dds"))?);
        self.material = Some(material);

        anyhow::ensure!(
            ctx.services.get::<Keyboard>().is_some(),
            "the point light demo needs a keyboard service"
        );
        self.proxy_model.initialize(ctx)?;
        self.proxy_model.set_position(self.point_light.position);
        Ok(())
    }

    fn update(&mut self, ctx: &mut GameContext<'_>, game_time: &GameTime) -> anyhow::Result<()> {
        if let Some(keyboard) = ctx.services.get::<Keyboard>() {
            self.controls.update(
                &keyboard.borrow(),
                &mut self.point_light,
                game_time.elapsed_secs_f32(),
            );
        }
        self.proxy_model.set_position(self.point_light.position);
        self.proxy_model.update(ctx, game_time)
    }

    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        Some(self)
    }
}

impl DrawableGameComponent for PointLightDemo {
    fn drawable_state(&self) -> &DrawableState {
        &self.state
    }

    fn drawable_state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, game_time: &GameTime) -> anyhow::Result<()> {
        let (Some(material), Some(buffers), Some(texture)) =
            (&self.material, &self.buffers, self.texture)
        else {
            anyhow::bail!("point light demo drawn before initialization");
        };
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let (view_projection, eye) = camera
            .view_projection_matrix()
            .zip(camera.position())
            .context("camera is unavailable")?;

        buffers.draw(
            ctx.graphics,
            material,
            &[
                ShaderConstant::new("WorldViewProjection", view_projection * self.world_matrix),
                ShaderConstant::new("World", self.world_matrix),
                ShaderConstant::new("SpecularColor", self.controls.specular_color),
                ShaderConstant::new("SpecularPower", self.controls.specular_power),
                ShaderConstant::new("AmbientColor", self.controls.ambient_vector()),
                ShaderConstant::new("LightColor", self.point_light.color_vector()),
                ShaderConstant::new("LightPosition", self.point_light.position),
                ShaderConstant::new("LightRadius", self.point_light.radius),
                ShaderConstant::new("ColorTexture", texture),
                ShaderConstant::new("CameraPosition", eye),
            ],
        )?;

        ctx.graphics.reset_state(ctx.render_states.default_pipeline());
        self.proxy_model.draw(ctx, game_time)?;

        ctx.graphics.reset_state(ctx.render_states.default_pipeline());
        ctx.graphics
            .draw_text(&self.help_text(), self.text_position, color::WHITE)?;
        Ok(())
    }
}
