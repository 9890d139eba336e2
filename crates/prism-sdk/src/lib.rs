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

//! # Prism SDK
//!
//! The frame driver. An [`Engine`] owns the platform and the clock, builds
//! the [`Game`](prism_core::Game), and runs an [`Application`] against it
//! until the application exits, the window closes, or the frame limit is hit.

#![warn(missing_docs)]

mod application;
mod clock;
mod config;
mod engine;
mod error;
mod logging;
mod platform;

pub use application::Application;
pub use clock::{Clock, FixedStepClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{Engine, RunSummary};
pub use error::EngineError;
pub use logging::init_logging;
pub use platform::{Platform, PlatformEvent, ScriptedPlatform};
