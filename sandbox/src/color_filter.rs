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

//! Colour-filter post processing.
//!
//! The scene renders into an off-screen target; the pass then draws a
//! full-screen quad sampling that target through the active filter.

use crate::content::Content;
use crate::material::Material;
use crate::vertex::VertexPositionTexture;
use glam::{Mat4, Vec2, Vec3, Vec4};
use prism_core::graphics::{
    color, BufferId, DepthStencilState, GraphicsContext, GraphicsDevice, GraphicsError,
    PrimitiveTopology, RenderTarget, RenderTargetId, ShaderConstant, TextureId,
};
use prism_core::input::KeyCode;
use prism_infra::Keyboard;

/// The techniques of the colour-filter effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorFilter {
    #[default]
    Grayscale,
    Inverse,
    Sepia,
    /// Scales colour by a brightness factor.
    Generic,
}

impl ColorFilter {
    pub const ALL: [ColorFilter; 4] = [
        ColorFilter::Grayscale,
        ColorFilter::Inverse,
        ColorFilter::Sepia,
        ColorFilter::Generic,
    ];

    pub fn technique(self) -> &'static str {
        match self {
            ColorFilter::Grayscale => "grayscale_filter",
            ColorFilter::Inverse => "inverse_filter",
            ColorFilter::Sepia => "sepia_filter",
            ColorFilter::Generic => "generic_filter",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ColorFilter::Grayscale => "Grayscale",
            ColorFilter::Inverse => "Inverse",
            ColorFilter::Sepia => "Sepia",
            ColorFilter::Generic => "Generic",
        }
    }

    /// The filter after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        self as usize
    }
}

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

fn quad_vertices() -> [VertexPositionTexture; 4] {
    [
        VertexPositionTexture::new(Vec3::new(-1.0, -1.0, 0.0), Vec2::new(0.0, 1.0)),
        VertexPositionTexture::new(Vec3::new(-1.0, 1.0, 0.0), Vec2::new(0.0, 0.0)),
        VertexPositionTexture::new(Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 0.0)),
        VertexPositionTexture::new(Vec3::new(1.0, -1.0, 0.0), Vec2::new(1.0, 1.0)),
    ]
}

/// Owns the scene target, the full-screen quad and one material per filter.
#[derive(Debug)]
pub struct ColorFilterPass {
    render_target: RenderTargetId,
    scene_texture: TextureId,
    materials: Vec<Material>,
    vertex_buffer: BufferId,
    index_buffer: BufferId,
    active: ColorFilter,
    brightness: f32,
    text_position: Vec2,
}

impl ColorFilterPass {
    /// Brightness units per second while Comma or Period is held.
    pub const BRIGHTNESS_MODULATION_RATE: f32 = 1.0;

    /// Creates the `width` x `height` scene target and the filter materials.
    pub fn create(
        device: &mut dyn GraphicsDevice,
        content: &Content,
        width: u32,
        height: u32,
    ) -> Result<Self, GraphicsError> {
        let render_target = device.create_render_target("Scene", width, height)?;
        let scene_texture = device
            .render_target_texture(render_target)
            .ok_or(GraphicsError::IncompleteState("scene render target texture"))?;

        let effect = device.load_effect(&content.effect("ColorFilter.fx"))?;
        let materials = ColorFilter::ALL
            .iter()
            .map(|filter| {
                Material::with_effect(device, effect, filter.technique(), VertexPositionTexture::LAYOUT)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let vertex_buffer = materials[0].create_vertex_buffer(device, "FullScreenQuad", &quad_vertices())?;
        let index_buffer = device.create_index_buffer("FullScreenQuad", &QUAD_INDICES)?;

        Ok(Self {
            render_target,
            scene_texture,
            materials,
            vertex_buffer,
            index_buffer,
            active: ColorFilter::default(),
            brightness: 1.0,
            text_position: Vec2::new(0.0, 160.0),
        })
    }

    /// Where the scene must be drawn for the filter to see it.
    pub fn scene_target(&self) -> RenderTarget {
        RenderTarget::Offscreen(self.render_target)
    }

    pub fn active_filter(&self) -> ColorFilter {
        self.active
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn cycle_filter(&mut self) {
        self.active = self.active.next();
        log::debug!("Color filter: {}.", self.active.display_name());
    }

    /// Changes the generic filter's brightness, clamped to `0..=1`.
    pub fn adjust_brightness(&mut self, delta: f32) {
        self.brightness = (self.brightness + delta).clamp(0.0, 1.0);
    }

    /// Space cycles filters. With the generic filter, Comma lowers and
    /// Period raises the brightness.
    pub fn update(&mut self, keyboard: &Keyboard, elapsed: f32) {
        if keyboard.was_key_pressed_this_frame(KeyCode::Space) {
            self.cycle_filter();
        }
        if self.active != ColorFilter::Generic {
            return;
        }
        let amount = Self::BRIGHTNESS_MODULATION_RATE * elapsed;
        if keyboard.is_key_down(KeyCode::Comma) {
            self.adjust_brightness(-amount);
        }
        if keyboard.is_key_down(KeyCode::Period) {
            self.adjust_brightness(amount);
        }
    }

    /// The `ColorFilter` matrix of the generic technique.
    pub fn generic_filter_matrix(&self) -> Mat4 {
        Mat4::from_diagonal(Vec4::new(self.brightness, self.brightness, self.brightness, 1.0))
    }

    pub fn help_text(&self) -> String {
        let mut text = format!("Color Filter (Space Bar): {}", self.active.display_name());
        if self.active == ColorFilter::Generic {
            text.push_str(&format!("\nBrightness (-Comma/+Period): {:.2}", self.brightness));
        }
        text
    }

    /// Draws the filtered scene and the filter HUD onto the back buffer.
    pub fn draw(&self, graphics: &mut dyn GraphicsContext) -> Result<(), GraphicsError> {
        let material = &self.materials[self.active.index()];
        {
            let state = graphics.state_mut();
            state.render_target = RenderTarget::BackBuffer;
            state.depth_stencil = DepthStencilState::DISABLED;
        }
        material.bind(
            graphics,
            PrimitiveTopology::TriangleList,
            self.vertex_buffer,
            Some(self.index_buffer),
        );

        let mut constants = vec![ShaderConstant::new("ColorTexture", self.scene_texture)];
        if self.active == ColorFilter::Generic {
            constants.push(ShaderConstant::new("ColorFilter", self.generic_filter_matrix()));
        }
        material.apply(graphics, &constants)?;
        graphics.draw_indexed(QUAD_INDICES.len() as u32, 0, 0)?;

        graphics.draw_text(&self.help_text(), self.text_position, color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use prism_core::graphics::{PipelineState, ShaderValue};
    use prism_infra::HeadlessGraphics;

    fn create_pass(graphics: &mut HeadlessGraphics) -> ColorFilterPass {
        ColorFilterPass::create(graphics, &Content::default(), 64, 32).unwrap()
    }

    #[test]
    fn test_filters_cycle_in_order() {
        let mut filter = ColorFilter::Grayscale;
        let names: Vec<_> = (0..5)
            .map(|_| {
                filter = filter.next();
                filter.technique()
            })
            .collect();
        assert_eq!(
            names,
            ["inverse_filter", "sepia_filter", "generic_filter", "grayscale_filter", "inverse_filter"]
        );
    }

    #[test]
    fn test_brightness_is_clamped() {
        let mut graphics = HeadlessGraphics::new(64, 32);
        let mut pass = create_pass(&mut graphics);

        pass.adjust_brightness(0.5);
        assert_relative_eq!(pass.brightness(), 1.0);
        pass.adjust_brightness(-0.25);
        assert_relative_eq!(pass.brightness(), 0.75);
        pass.adjust_brightness(-3.0);
        assert_relative_eq!(pass.brightness(), 0.0);
    }

    #[test]
    fn test_scene_target_matches_the_back_buffer_size() {
        let mut graphics = HeadlessGraphics::new(64, 32);
        let pass = create_pass(&mut graphics);
        let RenderTarget::Offscreen(target) = pass.scene_target() else {
            panic!("scene target should be off-screen");
        };
        assert_eq!(graphics.render_target_size(target), Some((64, 32)));
    }

    #[test]
    fn test_generic_filter_draws_the_scene_to_the_back_buffer() {
        let mut graphics = HeadlessGraphics::new(64, 32);
        let mut pass = create_pass(&mut graphics);
        for _ in 0..3 {
            pass.cycle_filter();
        }
        pass.adjust_brightness(-0.5);

        graphics.reset_state(&PipelineState::default());
        pass.draw(&mut graphics).unwrap();

        let frame = graphics.current_frame();
        assert_eq!(frame.draws.len(), 1);
        let draw = &frame.draws[0];
        assert_eq!(draw.pass.technique, "generic_filter");
        assert_eq!(draw.state.render_target, RenderTarget::BackBuffer);
        assert_eq!(
            draw.constant("ColorFilter").map(|c| c.value),
            Some(ShaderValue::Mat4(Mat4::from_diagonal(Vec4::new(0.5, 0.5, 0.5, 1.0))))
        );
        assert!(frame.has_text("Color Filter (Space Bar): Generic"));
        assert!(frame.has_text("Brightness (-Comma/+Period): 0.50"));
    }
}
