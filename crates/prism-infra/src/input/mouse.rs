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
use prism_core::input::{InputEvent, MouseButton};
use prism_core::{ComponentState, GameComponent, GameContext, GameTime, Service, ServiceKind};

const BUTTON_COUNT: usize = MouseButton::ALL.len();

/// Mouse state sampled once per frame.
///
/// Movement is relative: `x`/`y` accumulate every delta since creation,
/// while the per-frame deltas and wheel reset at each update.
#[derive(Debug, Default)]
pub struct Mouse {
    state: ComponentState,
    events: EventBus<InputEvent>,
    current: [bool; BUTTON_COUNT],
    last: [bool; BUTTON_COUNT],
    x: f32,
    y: f32,
    delta_x: f32,
    delta_y: f32,
    wheel: f32,
}

impl Mouse {
    /// Creates a mouse at the origin with no buttons down.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw event for the next update. Keyboard events are ignored.
    pub fn publish(&self, event: InputEvent) {
        if event.is_mouse() {
            self.events.publish(event);
        }
    }

    /// A sender for platform threads that feed this mouse.
    pub fn sender(&self) -> flume::Sender<InputEvent> {
        self.events.sender()
    }

    /// Accumulated horizontal position.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Accumulated vertical position.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Horizontal movement this frame.
    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    /// Vertical movement this frame.
    pub fn delta_y(&self) -> f32 {
        self.delta_y
    }

    /// Wheel movement this frame.
    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    /// Whether `button` is down this frame.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.current[button.index()]
    }

    /// Whether `button` is up this frame.
    pub fn is_button_up(&self, button: MouseButton) -> bool {
        !self.is_button_down(button)
    }

    /// Whether `button` was down last frame.
    pub fn was_button_down(&self, button: MouseButton) -> bool {
        self.last[button.index()]
    }

    /// Whether `button` was up last frame.
    pub fn was_button_up(&self, button: MouseButton) -> bool {
        !self.was_button_down(button)
    }

    /// Whether `button` went down this frame.
    pub fn was_button_pressed_this_frame(&self, button: MouseButton) -> bool {
        self.is_button_down(button) && self.was_button_up(button)
    }

    /// Whether `button` went up this frame.
    pub fn was_button_released_this_frame(&self, button: MouseButton) -> bool {
        self.is_button_up(button) && self.was_button_down(button)
    }

    /// Whether `button` has been down for at least two frames.
    pub fn is_button_held_down(&self, button: MouseButton) -> bool {
        self.is_button_down(button) && self.was_button_down(button)
    }
}

impl Service for Mouse {
    const KIND: ServiceKind = ServiceKind::Mouse;
}

impl GameComponent for Mouse {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn name(&self) -> &'static str {
        "Mouse"
    }

    fn update(&mut self, _ctx: &mut GameContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        self.last = self.current;
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        self.wheel = 0.0;

        for event in self.events.drain() {
            match event {
                InputEvent::MouseButtonPressed { button } => self.current[button.index()] = true,
                InputEvent::MouseButtonReleased { button } => self.current[button.index()] = false,
                InputEvent::MouseMoved { delta_x, delta_y } => {
                    self.delta_x += delta_x;
                    self.delta_y += delta_y;
                }
                InputEvent::MouseWheelScrolled { delta } => self.wheel += delta,
                _ => {}
            }
        }
        self.x += self.delta_x;
        self.y += self.delta_y;
        Ok(())
    }
}
