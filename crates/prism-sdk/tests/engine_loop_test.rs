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

//! Frame-loop tests for the `Engine` running applications on the headless
//! backend with a fixed-step clock.

use approx::assert_relative_eq;
use prism_core::graphics::{color, RenderTarget};
use prism_core::input::{InputEvent, KeyCode};
use prism_core::{ComponentState, Game, GameComponent, GameContext, GameError, GameTime};
use prism_infra::{HeadlessGraphics, Keyboard, Mouse};
use prism_sdk::{Application, Engine, EngineConfig, EngineError, PlatformEvent, ScriptedPlatform};
use std::cell::RefCell;
use std::rc::Rc;

type Journal = Rc<RefCell<Vec<String>>>;

fn config(max_frames: Option<u64>) -> EngineConfig {
    EngineConfig {
        fixed_time_step: Some(0.5),
        max_frames,
        ..Default::default()
    }
}

struct Ticker {
    state: ComponentState,
    journal: Journal,
    fail_on_frame: Option<u32>,
    frame: u32,
}

impl GameComponent for Ticker {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn name(&self) -> &'static str {
        "Ticker"
    }

    fn update(&mut self, _ctx: &mut GameContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        self.frame += 1;
        if self.fail_on_frame == Some(self.frame) {
            anyhow::bail!("ticker broke on frame {}", self.frame);
        }
        self.journal.borrow_mut().push("component update".to_string());
        Ok(())
    }
}

#[derive(Default)]
struct Recorder {
    journal: Journal,
    fail_on_frame: Option<u32>,
    fail_initialize: bool,
    exit_on_escape: bool,
    background_cleared: bool,
    mouse_x: f32,
}

impl Recorder {
    fn log(&self, entry: &str) {
        self.journal.borrow_mut().push(entry.to_string());
    }
}

impl Application for Recorder {
    fn initialize(&mut self, game: &mut Game, _config: &EngineConfig) -> anyhow::Result<()> {
        self.log("app initialize");
        if self.fail_initialize {
            anyhow::bail!("no content");
        }
        game.add_service_component(Keyboard::new());
        game.add_service_component(Mouse::new());
        game.add_component(Ticker {
            state: ComponentState::default(),
            journal: self.journal.clone(),
            fail_on_frame: self.fail_on_frame,
            frame: 0,
        });
        Ok(())
    }

    fn update(&mut self, game: &mut Game, _game_time: &GameTime) -> anyhow::Result<()> {
        self.log("app update");
        if !self.exit_on_escape {
            return Ok(());
        }
        if let Some(keyboard) = game.services().get::<Keyboard>() {
            let escape = keyboard
                .borrow()
                .was_key_pressed_this_frame(KeyCode::Escape);
            if escape {
                game.exit();
            }
        }
        Ok(())
    }

    fn begin_draw(&mut self, _game: &mut Game, _game_time: &GameTime) -> anyhow::Result<()> {
        self.log("app begin_draw");
        Ok(())
    }

    fn end_draw(&mut self, game: &mut Game, _game_time: &GameTime) -> anyhow::Result<()> {
        self.log("app end_draw");
        if let Some(headless) = game.graphics().as_any().downcast_ref::<HeadlessGraphics>() {
            self.background_cleared = headless
                .current_frame()
                .clears
                .contains(&(RenderTarget::BackBuffer, color::CORNFLOWER_BLUE));
        }
        if let Some(mouse) = game.services().get::<Mouse>() {
            self.mouse_x = mouse.borrow().x();
        }
        Ok(())
    }

    fn shutdown(&mut self, game: &mut Game) {
        self.log(&format!("app shutdown with {} components", game.component_count()));
    }
}

#[test]
fn test_frame_phases_run_in_order() {
    let mut app = Recorder::default();
    let summary = Engine::new(config(Some(2))).run(&mut app).unwrap();

    assert_eq!(summary.frames, 2);
    assert_relative_eq!(summary.total_game_time, 1.0);
    assert!(app.background_cleared);

    let frame = [
        "app update",
        "component update",
        "app begin_draw",
        "app end_draw",
    ];
    let mut expected = vec!["app initialize"];
    expected.extend(frame);
    expected.extend(frame);
    expected.push("app shutdown with 3 components");
    assert_eq!(*app.journal.borrow(), expected);
}

#[test]
fn test_frame_limit_of_zero_runs_no_frames() {
    let mut app = Recorder::default();
    let summary = Engine::new(config(Some(0))).run(&mut app).unwrap();

    assert_eq!(summary.frames, 0);
    assert_eq!(
        app.journal.borrow().last().map(String::as_str),
        Some("app shutdown with 3 components")
    );
}

#[test]
fn test_close_request_stops_before_the_frame() {
    let mut app = Recorder::default();
    let platform = ScriptedPlatform::new()
        .idle(1)
        .then([PlatformEvent::CloseRequested]);

    let summary = Engine::new(config(None))
        .with_platform(platform)
        .run(&mut app)
        .unwrap();
    assert_eq!(summary.frames, 1);
}

#[test]
fn test_escape_exits_after_the_keyboard_sees_it() {
    let mut app = Recorder {
        exit_on_escape: true,
        ..Default::default()
    };
    let platform = ScriptedPlatform::new().idle(2).then([PlatformEvent::Input(
        InputEvent::KeyPressed {
            key: KeyCode::Escape,
        },
    )]);

    let summary = Engine::new(config(Some(100)))
        .with_platform(platform)
        .run(&mut app)
        .unwrap();
    // Delivered on frame 3, observed by the application on frame 4.
    assert_eq!(summary.frames, 4);
}

#[test]
fn test_mouse_events_reach_the_mouse_service() {
    let mut app = Recorder::default();
    let moved = |dx: f32| {
        PlatformEvent::Input(InputEvent::MouseMoved {
            delta_x: dx,
            delta_y: 0.0,
        })
    };
    let platform = ScriptedPlatform::new()
        .then([moved(3.0), moved(2.0)])
        .then([moved(-1.0)]);

    Engine::new(config(Some(3)))
        .with_platform(platform)
        .run(&mut app)
        .unwrap();
    assert_relative_eq!(app.mouse_x, 4.0);
}

#[test]
fn test_component_failure_stops_the_run_and_tears_down() {
    let mut app = Recorder {
        fail_on_frame: Some(2),
        ..Default::default()
    };
    let error = Engine::new(config(Some(10))).run(&mut app).unwrap_err();

    match error {
        EngineError::Game(GameError::Update { component, .. }) => assert_eq!(component, "Ticker"),
        other => panic!("unexpected error: {other}"),
    }
    let journal = app.journal.borrow();
    assert_eq!(journal.iter().filter(|e| *e == "app end_draw").count(), 1);
    assert_eq!(
        journal.last().map(String::as_str),
        Some("app shutdown with 3 components")
    );
}

#[test]
fn test_application_initialize_failure_is_reported() {
    let mut app = Recorder {
        fail_initialize: true,
        ..Default::default()
    };
    let error = Engine::new(config(Some(1))).run(&mut app).unwrap_err();

    assert!(matches!(
        error,
        EngineError::Application {
            phase: "initialize",
            ..
        }
    ));
    assert_eq!(
        *app.journal.borrow(),
        vec!["app initialize", "app shutdown with 0 components"]
    );
}
