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

//! Frame-rate counter drawn as HUD text.

use glam::Vec2;
use prism_core::graphics::color;
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};

/// Counts frames per second of game time and draws the rate in the corner.
#[derive(Debug, Clone)]
pub struct FpsComponent {
    state: DrawableState,
    text_position: Vec2,
    frame_count: u32,
    frame_rate: u32,
    last_total_time: f64,
}

impl FpsComponent {
    /// Creates a counter drawn at the default HUD position.
    pub fn new() -> Self {
        Self {
            state: DrawableState::default(),
            text_position: Vec2::new(0.0, 60.0),
            frame_count: 0,
            frame_rate: 0,
            last_total_time: 0.0,
        }
    }

    /// Frames counted during the last full second.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Where the text is drawn.
    pub fn text_position(&self) -> Vec2 {
        self.text_position
    }

    /// Moves the text.
    pub fn set_text_position(&mut self, position: Vec2) {
        self.text_position = position;
    }
}

impl Default for FpsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GameComponent for FpsComponent {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "FpsComponent"
    }

    fn update(&mut self, _ctx: &mut GameContext<'_>, game_time: &GameTime) -> anyhow::Result<()> {
        if game_time.total_game_time() - self.last_total_time >= 1.0 {
            self.last_total_time = game_time.total_game_time();
            self.frame_rate = self.frame_count;
            self.frame_count = 0;
        }
        self.frame_count += 1;
        Ok(())
    }

    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        Some(self)
    }
}

impl DrawableGameComponent for FpsComponent {
    fn drawable_state(&self) -> &DrawableState {
        &self.state
    }

    fn drawable_state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, game_time: &GameTime) -> anyhow::Result<()> {
        let text = format!(
            "Frame Rate: {}\nTotal Elapsed Time: {:.2}",
            self.frame_rate,
            game_time.total_game_time()
        );
        ctx.graphics
            .draw_text(&text, self.text_position, color::WHITE)?;
        Ok(())
    }
}
