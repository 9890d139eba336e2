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

//! Errors raised by graphics collaborators.

use super::device::ResourceId;
use std::path::PathBuf;
use thiserror::Error;

/// An error from a [`GraphicsDevice`](super::GraphicsDevice) or
/// [`GraphicsContext`](super::GraphicsContext).
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// A texture, effect, or other file-backed resource could not be found.
    #[error("resource not found: '{}'", path.display())]
    ResourceNotFound {
        /// The path that was requested.
        path: PathBuf,
    },
    /// A handle does not name a live resource.
    #[error("invalid resource handle: {0}")]
    InvalidHandle(ResourceId),
    /// A buffer was created from no data.
    #[error("buffer '{label}' was created with no data")]
    EmptyBuffer {
        /// The buffer label.
        label: String,
    },
    /// A draw was issued before the state it needs was bound.
    #[error("pipeline state incomplete: no {0} bound")]
    IncompleteState(&'static str),
    /// The effect has no such technique or pass.
    #[error("effect has no technique '{technique}' with pass '{pass}'")]
    PassNotFound {
        /// The technique name.
        technique: String,
        /// The pass name.
        pass: String,
    },
    /// Presenting the back buffer failed.
    #[error("present failed: {0}")]
    PresentFailed(String),
}
