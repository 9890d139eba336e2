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

//! The sample components `RenderingGame` registers.

mod model_demo;
mod point_light_demo;
mod spot_light_demo;
mod texture_model_demo;

pub use self::model_demo::ModelDemo;
pub use self::point_light_demo::PointLightDemo;
pub use self::spot_light_demo::SpotLightDemo;
pub use self::texture_model_demo::TextureModelDemo;

use crate::lights::{self, PointLight, MAX_INTENSITY};
use glam::{Vec3, Vec4};
use prism_core::graphics::{color, Color};
use prism_core::input::KeyCode;
use prism_infra::Keyboard;

/// Intensity units per second while a modulation key is held.
pub const LIGHT_MODULATION_RATE: f32 = MAX_INTENSITY;

/// World units per second while a movement key is held.
pub const LIGHT_MOVEMENT_RATE: f32 = 10.0;

/// Ambient and specular terms of the lit demos, driven from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingControls {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub specular_color: Color,
    pub specular_power: f32,
}

impl Default for LightingControls {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::ONE,
            ambient_intensity: 0.0,
            specular_color: color::WHITE,
            specular_power: 25.0,
        }
    }
}

impl LightingControls {
    /// The `AmbientColor` shader variable.
    pub fn ambient_vector(&self) -> Vec4 {
        lights::color_with_intensity(self.ambient_color, self.ambient_intensity)
    }

    /// PgUp/PgDn drive the ambient term, Home/End the light, Insert/Delete
    /// the specular power, the numeric keypad moves the light.
    pub fn update(&mut self, keyboard: &Keyboard, light: &mut PointLight, elapsed: f32) {
        let amount = LIGHT_MODULATION_RATE * elapsed;
        self.ambient_intensity = lights::modulate(
            self.ambient_intensity,
            amount,
            keyboard.is_key_down(KeyCode::PageUp),
            keyboard.is_key_down(KeyCode::PageDown),
            MAX_INTENSITY,
        );
        light.intensity = lights::modulate(
            light.intensity,
            amount,
            keyboard.is_key_down(KeyCode::Home),
            keyboard.is_key_down(KeyCode::End),
            MAX_INTENSITY,
        );
        self.specular_power = lights::modulate(
            self.specular_power,
            amount,
            keyboard.is_key_down(KeyCode::Insert),
            keyboard.is_key_down(KeyCode::Delete),
            MAX_INTENSITY,
        );
        light.position += movement_direction(keyboard) * LIGHT_MOVEMENT_RATE * elapsed;
    }

    /// The HUD lines for the terms above.
    pub fn help_text(&self, light: &PointLight, light_label: &str) -> String {
        format!(
            "Ambient Intensity (+PgUp/-PgDn): {:.0}\n\
             {light_label} Intensity (+Home/-End): {:.0}\n\
             Specular Power (+Insert/-Delete): {:.1}\n\
             Move {light_label} (8/2, 4/6, 3/9)\n",
            self.ambient_intensity, light.intensity, self.specular_power,
        )
    }
}

/// Numpad 4/6 move along x, 9/3 along y, 8/2 along z.
pub fn movement_direction(keyboard: &Keyboard) -> Vec3 {
    let axis = |positive: KeyCode, negative: KeyCode| {
        let mut value = 0.0;
        if keyboard.is_key_down(positive) {
            value += 1.0;
        }
        if keyboard.is_key_down(negative) {
            value -= 1.0;
        }
        value
    };
    Vec3::new(
        axis(KeyCode::Numpad6, KeyCode::Numpad4),
        axis(KeyCode::Numpad9, KeyCode::Numpad3),
        axis(KeyCode::Numpad2, KeyCode::Numpad8),
    )
}
