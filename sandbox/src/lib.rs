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

//! # Sandbox
//!
//! The rendering demos from the prism component model, driven by
//! [`RenderingGame`]. The binary runs them on the headless backend.

pub mod color_filter;
pub mod components;
pub mod content;
pub mod demos;
pub mod lights;
pub mod material;
pub mod rendering_game;
pub mod vertex;

pub use rendering_game::RenderingGame;

use prism_core::CameraRef;

/// The camera a drawable renders through: its own, else the game's.
pub(crate) fn active_camera(
    own: Option<&CameraRef>,
    game: Option<&CameraRef>,
) -> anyhow::Result<CameraRef> {
    own.or(game)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no camera to render through"))
}
