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

use prism_core::event::EventBus;
use prism_core::input::{InputEvent, KeyCode};
use prism_core::{ComponentState, GameComponent, GameContext, GameTime, Service, ServiceKind};
use std::collections::HashSet;

/// Keyboard state sampled once per frame.
///
/// Key events published between two updates are applied together at the
/// start of the next update, after the previous state has been saved, so
/// the "this frame" queries compare against exactly one frame ago.
#[derive(Debug, Default)]
pub struct Keyboard {
    state: ComponentState,
    events: EventBus<InputEvent>,
    current: HashSet<KeyCode>,
    last: HashSet<KeyCode>,
}

impl Keyboard {
    /// Creates a keyboard with no keys down.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw event for the next update. Non-keyboard events are ignored.
    pub fn publish(&self, event: InputEvent) {
        if event.is_keyboard() {
            self.events.publish(event);
        }
    }

    /// A sender for platform threads that feed this keyboard.
    pub fn sender(&self) -> flume::Sender<InputEvent> {
        self.events.sender()
    }

    /// Whether `key` is down this frame.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.current.contains(&key)
    }

    /// Whether `key` is up this frame.
    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.is_key_down(key)
    }

    /// Whether `key` was down last frame.
    pub fn was_key_down(&self, key: KeyCode) -> bool {
        self.last.contains(&key)
    }

    /// Whether `key` was up last frame.
    pub fn was_key_up(&self, key: KeyCode) -> bool {
        !self.was_key_down(key)
    }

    /// Whether `key` went down this frame.
    pub fn was_key_pressed_this_frame(&self, key: KeyCode) -> bool {
        self.is_key_down(key) && self.was_key_up(key)
    }

    /// Whether `key` went up this frame.
    pub fn was_key_released_this_frame(&self, key: KeyCode) -> bool {
        self.is_key_up(key) && self.was_key_down(key)
    }

    /// Whether `key` has been down for at least two frames.
    pub fn is_key_held_down(&self, key: KeyCode) -> bool {
        self.is_key_down(key) && self.was_key_down(key)
    }
}

impl Service for Keyboard {
    const KIND: ServiceKind = ServiceKind::Keyboard;
}

impl GameComponent for Keyboard {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn name(&self) -> &'static str {
        "Keyboard"
    }

    fn update(&mut self, _ctx: &mut GameContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        self.last.clone_from(&self.current);
        for event in self.events.drain() {
            match event {
                InputEvent::KeyPressed { key } => {
                    self.current.insert(key);
                }
                InputEvent::KeyReleased { key } => {
                    self.current.remove(&key);
                }
                _ => {}
            }
        }
        Ok(())
    }
}
