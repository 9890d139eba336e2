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

//! A textured model lit by a movable, rotatable spot light.

use super::point_light_demo::lit_vertices;
use super::LightingControls;
use crate::components::ProxyModel;
use crate::content::Content;
use crate::lights::SpotLight;
use crate::material::{Material, MeshBuffers};
use crate::vertex::VertexPositionTextureNormal;
use anyhow::Context;
use glam::{Mat3, Mat4, Vec2, Vec3};
use prism_core::graphics::{color, ShaderConstant, TextureId};
use prism_core::input::KeyCode;
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};
use prism_infra::Keyboard;
use std::f32::consts::FRAC_PI_2;

/// Radians per second while an arrow key is held.
pub const LIGHT_ROTATION_RATE: Vec2 = Vec2::new(FRAC_PI_2, FRAC_PI_2);

#[derive(Debug)]
pub struct SpotLightDemo {
    state: DrawableState,
    content: Content,
    controls: LightingControls,
    spot_light: SpotLight,
    world_matrix: Mat4,
    proxy_model: ProxyModel,
    text_position: Vec2,
    material: Option<Material>,
    buffers: Option<MeshBuffers>,
    texture: Option<TextureId>,
}

impl SpotLightDemo {
    pub fn new(content: Content) -> Self {
        let proxy_model = ProxyModel::new(content.clone(), "SpotLightProxy.obj", 0.5);
        Self {
            state: DrawableState::default(),
            content,
            controls: LightingControls::default(),
            spot_light: SpotLight::new(Vec3::new(0.0, 0.0, 10.0), 50.0),
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

    pub fn spot_light(&self) -> &SpotLight {
        &self.spot_light
    }

    pub fn help_text(&self) -> String {
        let mut text = self.controls.help_text(&self.spot_light.light, "Spot Light");
        text.push_str("Rotate Spot Light (Arrow Keys)\n");
        text
    }

    /// Left/Right yaw the light around its up axis, Up/Down pitch it
    /// around its right axis.
    fn rotation(&self, keyboard: &Keyboard, elapsed: f32) -> Option<Mat3> {
        let mut amount = Vec2::ZERO;
        if keyboard.is_key_down(KeyCode::ArrowLeft) {
            amount.x += 1.0;
        }
        if keyboard.is_key_down(KeyCode::ArrowRight) {
            amount.x -= 1.0;
        }
        if keyboard.is_key_down(KeyCode::ArrowUp) {
            amount.y += 1.0;
        }
        if keyboard.is_key_down(KeyCode::ArrowDown) {
            amount.y -= 1.0;
        }
        if amount == Vec2::ZERO {
            return None;
        }

        let angles = amount * LIGHT_ROTATION_RATE * elapsed;
        Some(
            Mat3::from_axis_angle(self.spot_light.up(), angles.x)
                * Mat3::from_axis_angle(self.spot_light.right(), angles.y),
        )
    }
}

impl GameComponent for SpotLightDemo {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "SpotLightDemo"
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let mesh = self.content.load_first_mesh("Sphere.obj", true)?;
        let material = Material::load(
            ctx.device,
            &self.content.effect("SpotLight.fx"),
            "main10",
            VertexPositionTextureNormal::LAYOUT,
        )?;
        let vertices = lit_vertices(&mesh)?;

        self.buffers = Some(MeshBuffers::upload(ctx.device, &material, &mesh, &vertices)?);
        self.texture = Some(ctx.device.load_texture(&self.content.texture("Earthatday.dds"))?);
        self.material = Some(material);

        anyhow::ensure!(
            ctx.services.get::<Keyboard>().is_some(),
            "the spot light demo needs a keyboard service"
        );
        self.proxy_model.initialize(ctx)?;
        self.proxy_model.set_position(self.spot_light.light.position);
        Ok(())
    }

    fn update(&mut self, ctx: &mut GameContext<'_>, game_time: &GameTime) -> anyhow::Result<()> {
        let elapsed = game_time.elapsed_secs_f32();
        if let Some(keyboard) = ctx.services.get::<Keyboard>() {
            let keyboard = keyboard.borrow();
            self.controls
                .update(&keyboard, &mut self.spot_light.light, elapsed);
            if let Some(rotation) = self.rotation(&keyboard, elapsed) {
                self.spot_light.apply_rotation(rotation);
                self.proxy_model.apply_rotation(rotation);
            }
        }
        self.proxy_model.set_position(self.spot_light.light.position);
        self.proxy_model.update(ctx, game_time)
    }

    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        Some(self)
    }
}

impl DrawableGameComponent for SpotLightDemo {
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
            anyhow::bail!("spot light demo drawn before initialization");
        };
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let (view_projection, eye) = camera
            .view_projection_matrix()
            .zip(camera.position())
            .context("camera is unavailable")?;
        let light = &self.spot_light;

        buffers.draw(
            ctx.graphics,
            material,
            &[
                ShaderConstant::new("WorldViewProjection", view_projection * self.world_matrix),
                ShaderConstant::new("World", self.world_matrix),
                ShaderConstant::new("SpecularColor", self.controls.specular_color),
                ShaderConstant::new("SpecularPower", self.controls.specular_power),
                ShaderConstant::new("AmbientColor", self.controls.ambient_vector()),
                ShaderConstant::new("LightColor", light.light.color_vector()),
                ShaderConstant::new("LightPosition", light.light.position),
                ShaderConstant::new("LightLookAt", light.direction()),
                ShaderConstant::new("LightRadius", light.light.radius),
                ShaderConstant::new("SpotLightInnerAngle", light.inner_angle),
                ShaderConstant::new("SpotLightOuterAngle", light.outer_angle),
                ShaderConstant::new("CameraPosition", eye),
                ShaderConstant::new("ColorTexture", texture),
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
