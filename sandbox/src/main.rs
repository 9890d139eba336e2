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

// Prism Sandbox
// Runs the rendering demos headless and reports how far they got.

use anyhow::Result;
use prism_sdk::{init_logging, Engine, EngineConfig};
use sandbox::content::Content;
use sandbox::RenderingGame;

const DEFAULT_CONFIG_PATH: &str = "sandbox.json";

/// Headless runs have no window to close, so they always get a limit.
const DEFAULT_MAX_FRAMES: u64 = 600;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = EngineConfig::load_or_default(&config_path);
    init_logging(config.as_ref().map_or("info", |config| config.log_filter.as_str()));

    if let Err(error) = run(config) {
        log::error!("Sandbox failed: {error:#}");
        return Err(error);
    }
    Ok(())
}

fn run(config: Result<EngineConfig, prism_sdk::EngineError>) -> Result<()> {
    let mut config = config?;
    if config.max_frames.is_none() {
        log::warn!("No frame limit configured, stopping after {DEFAULT_MAX_FRAMES} frames.");
        config.max_frames = Some(DEFAULT_MAX_FRAMES);
    }

    let mut game = RenderingGame::new(Content::default());
    let summary = Engine::new(config).run(&mut game)?;
    log::info!(
        "Ran {} frames, {:.2}s of game time.",
        summary.frames,
        summary.total_game_time
    );
    Ok(())
}
