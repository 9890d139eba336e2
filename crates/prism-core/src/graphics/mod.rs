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

//! Contracts for the graphics collaborator.
//!
//! The game core never inspects the device or context; it only hands them to
//! components and resets the pipeline state to a known default before each
//! draw. Concrete backends live in `prism-infra`.

pub mod color;
pub mod device;
pub mod error;
pub mod state;

pub use color::Color;
pub use device::*;
pub use error::GraphicsError;
pub use state::*;
