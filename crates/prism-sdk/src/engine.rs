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

//! The frame driver.

use crate::application::Application;
use crate::clock::{Clock, FixedStepClock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::platform::{Platform, PlatformEvent, ScriptedPlatform};
use prism_core::graphics::{Graphics, GraphicsContext, RenderStates, RenderTarget};
use prism_core::input::InputEvent;
use prism_core::{Game, GameError, GameTime, Service};
use prism_infra::{HeadlessGraphics, Keyboard, Mouse};

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames presented.
    pub frames: u64,
    /// Game time at the last frame.
    pub total_game_time: f64,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    ExitRequested,
    CloseRequested,
    FrameLimit,
}

/// Owns the platform and the clock and drives an [`Application`] frame by frame.
///
/// ```no_run
/// use prism_sdk::{Application, Engine, EngineConfig};
/// use prism_core::Game;
///
/// struct Empty;
///
/// impl Application for Empty {
///     fn initialize(&mut self, _game: &mut Game, _config: &EngineConfig) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// let summary = Engine::new(EngineConfig::default()).run(&mut Empty)?;
/// println!("{} frames", summary.frames);
/// # Ok::<(), prism_sdk::EngineError>(())
/// ```
pub struct Engine {
    config: EngineConfig,
    platform: Box<dyn Platform>,
    clock: Box<dyn Clock>,
}

impl Engine {
    /// Creates an engine with a windowless platform and the clock the
    /// configuration asks for.
    pub fn new(config: EngineConfig) -> Self {
        let clock: Box<dyn Clock> = match config.fixed_time_step {
            Some(step) => Box::new(FixedStepClock::new(step)),
            None => Box::new(SystemClock::new()),
        };
        Self {
            config,
            platform: Box::new(ScriptedPlatform::new()),
            clock,
        }
    }

    /// Replaces the platform.
    pub fn with_platform(mut self, platform: impl Platform + 'static) -> Self {
        self.platform = Box::new(platform);
        self
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs `app` on a headless backend sized from the configuration.
    pub fn run<A: Application>(self, app: &mut A) -> Result<RunSummary, EngineError> {
        let graphics = HeadlessGraphics::new(self.config.screen_width, self.config.screen_height);
        self.run_with_graphics(app, Box::new(graphics))
    }

    /// Runs `app` until it exits, the platform closes, or the frame limit is hit.
    ///
    /// The game and its components are torn down before this returns, on
    /// success and on failure.
    pub fn run_with_graphics<A: Application>(
        mut self,
        app: &mut A,
        graphics: Box<dyn Graphics>,
    ) -> Result<RunSummary, EngineError> {
        log::info!("Starting '{}'...", self.config.window_title);
        let mut game = Game::with_render_states(graphics, RenderStates::default());
        let mut game_time = GameTime::new();
        let mut frames = 0;

        let result = self.run_loop(app, &mut game, &mut game_time, &mut frames);

        app.shutdown(&mut game);
        game.shutdown();

        let reason = result?;
        log::info!("Stopped after {frames} frame(s): {reason:?}.");
        Ok(RunSummary {
            frames,
            total_game_time: game_time.total_game_time(),
        })
    }

    fn run_loop<A: Application>(
        &mut self,
        app: &mut A,
        game: &mut Game,
        game_time: &mut GameTime,
        frames: &mut u64,
    ) -> Result<StopReason, EngineError> {
        app.initialize(game, &self.config)
            .map_err(|e| EngineError::application("initialize", e))?;
        game.initialize()?;
        self.clock.reset();

        let background = self.config.background_color();
        let mut events = Vec::new();
        loop {
            if self.config.max_frames.is_some_and(|max| *frames >= max) {
                return Ok(StopReason::FrameLimit);
            }

            events.clear();
            self.platform.poll_events(&mut events);
            if route_events(game, events.drain(..))? {
                return Ok(StopReason::CloseRequested);
            }

            self.clock.update_game_time(game_time);
            app.update(game, game_time)
                .map_err(|e| EngineError::application("update", e))?;
            game.update(game_time)?;

            let defaults = game.render_states().default_pipeline().clone();
            game.graphics_mut().reset_state(&defaults);
            game.graphics_mut().clear(RenderTarget::BackBuffer, background);
            app.begin_draw(game, game_time)
                .map_err(|e| EngineError::application("begin_draw", e))?;
            game.draw(game_time)?;
            game.graphics_mut().reset_state(&defaults);
            app.end_draw(game, game_time)
                .map_err(|e| EngineError::application("end_draw", e))?;
            game.graphics_mut().present()?;
            *frames += 1;

            if game.exit_requested() {
                return Ok(StopReason::ExitRequested);
            }
        }
    }
}

/// Feeds input to the registered devices. Returns `true` on a close request.
fn route_events(
    game: &Game,
    events: impl Iterator<Item = PlatformEvent>,
) -> Result<bool, GameError> {
    let mut close_requested = false;
    for event in events {
        match event {
            PlatformEvent::CloseRequested => close_requested = true,
            PlatformEvent::Input(input) if input.is_keyboard() => {
                publish_to::<Keyboard>(game, input, Keyboard::publish)?
            }
            PlatformEvent::Input(input) => publish_to::<Mouse>(game, input, Mouse::publish)?,
        }
    }
    Ok(close_requested)
}

fn publish_to<T: Service>(
    game: &Game,
    event: InputEvent,
    publish: fn(&T, InputEvent),
) -> Result<(), GameError> {
    let Some(device) = game.services().get::<T>() else {
        log::trace!("No {:?} service registered, dropping {event:?}.", T::KIND);
        return Ok(());
    };
    let device = device.try_borrow().map_err(|_| GameError::ComponentBusy {
        component: std::any::type_name::<T>(),
    })?;
    publish(&device, event);
    Ok(())
}
