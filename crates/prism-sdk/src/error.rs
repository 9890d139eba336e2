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

use prism_core::error::HookError;
use prism_core::graphics::GraphicsError;
use prism_core::GameError;
use std::path::PathBuf;
use thiserror::Error;

/// A failure that stops the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The game or one of its components failed.
    #[error(transparent)]
    Game(#[from] GameError),
    /// An application hook failed.
    #[error("application failed during {phase}")]
    Application {
        /// The hook that failed.
        phase: &'static str,
        /// The error the hook returned.
        #[source]
        source: HookError,
    },
    /// The graphics backend failed outside of any component.
    #[error(transparent)]
    Graphics(#[from] GraphicsError),
    /// A configuration file could not be read or written.
    #[error("configuration file '{}' is not accessible", path.display())]
    ConfigIo {
        /// The file.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A configuration could not be (de)serialized.
    #[error("invalid configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn application(phase: &'static str, source: anyhow::Error) -> Self {
        EngineError::Application {
            phase,
            source: source.into(),
        }
    }
}
