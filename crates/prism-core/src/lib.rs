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

//! # Prism Core
//!
//! Foundational crate containing the game-component lifecycle, the service
//! locator, and the interface contracts through which components reach the
//! graphics, asset, and input collaborators.

#![warn(missing_docs)]

pub mod asset;
pub mod camera;
pub mod component;
pub mod error;
pub mod event;
pub mod game;
pub mod graphics;
pub mod input;
pub mod service;
pub mod time;
pub mod utils;

pub use camera::{Camera, CameraRef};
pub use component::{
    ComponentHandle, ComponentState, DrawableGameComponent, DrawableState, GameComponent, Shared,
};
pub use error::GameError;
pub use game::{DrawContext, Game, GameContext};
pub use service::{Service, ServiceContainer, ServiceKind};
pub use time::GameTime;
pub use utils::timer::Stopwatch;
