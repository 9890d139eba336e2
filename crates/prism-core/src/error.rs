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

//! The error type surfaced by the [`Game`](crate::Game) scheduler.

use crate::graphics::GraphicsError;
use thiserror::Error;

/// A boxed error returned by a component hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fatal failure raised while driving components.
///
/// None of these are recovered locally. The first one aborts the phase that
/// produced it and propagates to the frame driver.
#[derive(Debug, Error)]
pub enum GameError {
    /// A component failed its one-time setup.
    #[error("failed to initialize component '{component}'")]
    Initialization {
        /// Name of the failing component.
        component: &'static str,
        /// The error the component returned.
        #[source]
        source: HookError,
    },
    /// A component failed during the update phase.
    #[error("component '{component}' failed to update")]
    Update {
        /// Name of the failing component.
        component: &'static str,
        /// The error the component returned.
        #[source]
        source: HookError,
    },
    /// A component failed during the draw phase.
    #[error("component '{component}' failed to draw")]
    Draw {
        /// Name of the failing component.
        component: &'static str,
        /// The error the component returned.
        #[source]
        source: HookError,
    },
    /// The game was driven again after a component failed to initialize.
    ///
    /// Initialization failures are terminal; no hook runs after one.
    #[error("game halted after component '{component}' failed to initialize")]
    Halted {
        /// Name of the component whose initialization failed.
        component: &'static str,
    },
    /// A component was already borrowed when the game tried to drive it,
    /// typically because a hook tried to reach itself through a handle.
    #[error("component '{component}' is already borrowed")]
    ComponentBusy {
        /// Name of the busy component.
        component: &'static str,
    },
    /// The graphics collaborator failed outside of any component hook.
    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}

impl GameError {
    /// The name of the component that caused the error, if any.
    pub fn component(&self) -> Option<&'static str> {
        match self {
            GameError::Initialization { component, .. }
            | GameError::Update { component, .. }
            | GameError::Draw { component, .. }
            | GameError::Halted { component }
            | GameError::ComponentBusy { component } => Some(*component),
            GameError::Graphics(_) => None,
        }
    }
}
