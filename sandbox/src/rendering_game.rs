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

//! The sandbox application: input, camera, HUD, the demos and the
//! colour-filter pass.

use crate::color_filter::ColorFilterPass;
use crate::components::{Grid, Skybox};
use crate::content::Content;
use crate::demos::{ModelDemo, PointLightDemo, SpotLightDemo, TextureModelDemo};
use anyhow::Context;
use glam::{Vec2, Vec3};
use prism_core::graphics::{Color, GraphicsContext};
use prism_core::input::KeyCode;
use prism_core::{
    CameraRef, ComponentHandle, DrawableGameComponent, Game, GameComponent, GameTime,
};
use prism_infra::{FirstPersonCamera, FpsComponent, Keyboard, Mouse};
use prism_sdk::{Application, EngineConfig};

/// Registers every demo and drives the post-processing around the game's
/// draw phase.
///
/// Escape exits, Tab switches between the point-light and spot-light demos.
pub struct RenderingGame {
    content: Content,
    keyboard: Option<ComponentHandle<Keyboard>>,
    camera: Option<ComponentHandle<FirstPersonCamera>>,
    point_light_demo: Option<ComponentHandle<PointLightDemo>>,
    spot_light_demo: Option<ComponentHandle<SpotLightDemo>>,
    color_filter: Option<ColorFilterPass>,
    background_color: Color,
}

impl RenderingGame {
    pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 25.0);
    pub const SKYBOX_CUBE_MAP: &'static str = "Maskonaive2_1024.dds";

    pub fn new(content: Content) -> Self {
        Self {
            content,
            keyboard: None,
            camera: None,
            point_light_demo: None,
            spot_light_demo: None,
            color_filter: None,
            background_color: prism_core::graphics::color::CORNFLOWER_BLUE,
        }
    }

    pub fn camera(&self) -> Option<&ComponentHandle<FirstPersonCamera>> {
        self.camera.as_ref()
    }

    pub fn point_light_demo(&self) -> Option<&ComponentHandle<PointLightDemo>> {
        self.point_light_demo.as_ref()
    }

    pub fn spot_light_demo(&self) -> Option<&ComponentHandle<SpotLightDemo>> {
        self.spot_light_demo.as_ref()
    }

    pub fn color_filter(&self) -> Option<&ColorFilterPass> {
        self.color_filter.as_ref()
    }

    /// Flips which of the two lit demos is active.
    fn toggle_light_demos(&self) {
        let (Some(point), Some(spot)) = (&self.point_light_demo, &self.spot_light_demo) else {
            return;
        };
        let point_active = point.with(|demo| demo.visible()).unwrap_or(false);
        point.with_mut(|demo| set_active(demo, !point_active));
        spot.with_mut(|demo| set_active(demo, point_active));
        log::info!(
            "Switched to the {} light demo.",
            if point_active { "spot" } else { "point" }
        );
    }
}

fn set_active(demo: &mut dyn DrawableGameComponent, active: bool) {
    demo.set_enabled(active);
    demo.set_visible(active);
}

impl Application for RenderingGame {
    fn initialize(&mut self, game: &mut Game, config: &EngineConfig) -> anyhow::Result<()> {
        self.background_color = config.background_color();

        self.keyboard = Some(game.add_service_component(Keyboard::new()));
        game.add_service_component(Mouse::new());

        let camera = game.add_service_component(FirstPersonCamera::new(config.aspect_ratio()));
        camera.with_mut(|camera| camera.set_position(Self::CAMERA_POSITION));
        game.set_camera(Some(CameraRef::from(&camera)));
        self.camera = Some(camera);

        let mut fps = FpsComponent::new();
        fps.set_text_position(Vec2::ZERO);
        game.add_component(fps);

        game.add_component(Grid::new(self.content.clone()));
        game.add_component(Skybox::new(
            self.content.clone(),
            Self::SKYBOX_CUBE_MAP,
            Skybox::DEFAULT_SCALE,
        ));

        let mut model_demo = ModelDemo::new(self.content.clone());
        model_demo.set_position(Vec3::new(-6.0, 3.0, 0.0));
        game.add_component(model_demo);

        let mut texture_model_demo = TextureModelDemo::new(self.content.clone());
        texture_model_demo.set_position(Vec3::new(6.0, 3.0, 0.0));
        game.add_component(texture_model_demo);

        self.point_light_demo = Some(game.add_component(PointLightDemo::new(self.content.clone())));

        let mut spot_light_demo = SpotLightDemo::new(self.content.clone());
        set_active(&mut spot_light_demo, false);
        self.spot_light_demo = Some(game.add_component(spot_light_demo));

        let color_filter = ColorFilterPass::create(
            game.graphics_mut().device(),
            &self.content,
            config.screen_width,
            config.screen_height,
        )
        .context("failed to create the color filter pass")?;
        game.render_states_mut().default_pipeline_mut().render_target = color_filter.scene_target();
        self.color_filter = Some(color_filter);

        log::info!("RenderingGame registered {} components.", game.component_count());
        Ok(())
    }

    fn update(&mut self, game: &mut Game, game_time: &GameTime) -> anyhow::Result<()> {
        let Some(keyboard) = self.keyboard.as_ref().and_then(ComponentHandle::upgrade) else {
            return Ok(());
        };
        let keyboard = keyboard.borrow();

        if keyboard.was_key_pressed_this_frame(KeyCode::Escape) {
            game.exit();
        }
        if keyboard.was_key_pressed_this_frame(KeyCode::Tab) {
            self.toggle_light_demos();
        }
        if let Some(color_filter) = &mut self.color_filter {
            color_filter.update(&keyboard, game_time.elapsed_secs_f32());
        }
        Ok(())
    }

    fn begin_draw(&mut self, game: &mut Game, _game_time: &GameTime) -> anyhow::Result<()> {
        if let Some(color_filter) = &self.color_filter {
            game.graphics_mut()
                .clear(color_filter.scene_target(), self.background_color);
        }
        Ok(())
    }

    fn end_draw(&mut self, game: &mut Game, _game_time: &GameTime) -> anyhow::Result<()> {
        if let Some(color_filter) = &self.color_filter {
            color_filter.draw(game.graphics_mut().context())?;
        }
        Ok(())
    }

    fn shutdown(&mut self, _game: &mut Game) {
        self.keyboard = None;
        self.camera = None;
        self.point_light_demo = None;
        self.spot_light_demo = None;
        log::info!("RenderingGame shut down.");
    }
}
