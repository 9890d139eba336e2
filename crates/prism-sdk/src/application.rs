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

use crate::config::EngineConfig;
use prism_core::{Game, GameTime};

/// The user-facing hooks around the game's own frame.
///
/// `initialize` registers components. The remaining hooks wrap the game's
/// update and draw phases, for work that belongs to the game as a whole
/// (exit handling, post processing, the swap between render targets).
#[allow(unused_variables)]
pub trait Application: 'static {
    /// Registers components and services. Runs before `Game::initialize`.
    fn initialize(&mut self, game: &mut Game, config: &EngineConfig) -> anyhow::Result<()>;

    /// Runs before the game's update phase.
    fn update(&mut self, game: &mut Game, game_time: &GameTime) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the back buffer is cleared and before the game's draw phase.
    fn begin_draw(&mut self, game: &mut Game, game_time: &GameTime) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the game's draw phase and before present.
    fn end_draw(&mut self, game: &mut Game, game_time: &GameTime) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs once when the loop ends, before the game tears down.
    fn shutdown(&mut self, game: &mut Game) {}
}
