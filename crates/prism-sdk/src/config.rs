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

//! Engine configuration, loaded from JSON.

use crate::error::EngineError;
use prism_core::graphics::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Window, back-buffer and frame-loop settings.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Title of the game window.
    pub window_title: String,
    /// Back-buffer width in pixels.
    pub screen_width: u32,
    /// Back-buffer height in pixels.
    pub screen_height: u32,
    /// Whether a depth-stencil buffer is created.
    pub depth_stencil_buffer_enabled: bool,
    /// Whether the back buffer is multisampled.
    pub multi_sampling_enabled: bool,
    /// Samples per pixel when multisampling.
    pub multi_sampling_count: u32,
    /// RGBA clear color of the back buffer.
    pub background_color: [f32; 4],
    /// Seconds per frame for a deterministic clock. Wall time when absent.
    pub fixed_time_step: Option<f64>,
    /// Stops the loop after this many frames. Unbounded when absent.
    pub max_frames: Option<u64>,
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "Prism".to_string(),
            screen_width: 1024,
            screen_height: 768,
            depth_stencil_buffer_enabled: true,
            multi_sampling_enabled: false,
            multi_sampling_count: 4,
            background_color: prism_core::graphics::color::CORNFLOWER_BLUE.to_array(),
            fixed_time_step: None,
            max_frames: None,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&content)?)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Loading configuration from '{}'.", path.display());
            Self::from_file(path)
        } else {
            log::debug!("No configuration at '{}', using defaults.", path.display());
            Ok(Self::default())
        }
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The clear color as a [`Color`].
    pub fn background_color(&self) -> Color {
        Color::from_array(self.background_color)
    }

    /// Width over height of the back buffer.
    pub fn aspect_ratio(&self) -> f32 {
        self.screen_width as f32 / self.screen_height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = EngineConfig::from_json(r#"{ "window_title": "Demo", "max_frames": 3 }"#)
            .unwrap();
        assert_eq!(config.window_title, "Demo");
        assert_eq!(config.max_frames, Some(3));
        assert_eq!(config.screen_width, 1024);
        assert_eq!(config.multi_sampling_count, 4);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");

        let config = EngineConfig {
            fixed_time_step: Some(0.25),
            ..Default::default()
        };
        config.to_file(&path).unwrap();
        assert_eq!(EngineConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_relative_eq!(config.aspect_ratio(), 1024.0 / 768.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(EngineConfig::from_json("{ not json").is_err());
    }
}
