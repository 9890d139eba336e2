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

//! # Prism Infra
//!
//! Concrete implementations of the collaborators `prism-core` only knows
//! through traits: a headless graphics backend, the keyboard and mouse
//! devices, a first-person camera, the frame-rate HUD, and OBJ import.

#![warn(missing_docs)]

pub mod asset;
pub mod camera;
pub mod fps;
pub mod graphics;
pub mod input;

pub use asset::ObjModelLoader;
pub use camera::FirstPersonCamera;
pub use fps::FpsComponent;
pub use graphics::HeadlessGraphics;
pub use input::{Keyboard, Mouse};
