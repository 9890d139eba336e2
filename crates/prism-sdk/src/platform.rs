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

//! The window-system boundary.
//!
//! A [`Platform`] hands the engine whatever happened since the previous
//! frame. Window creation and the OS message pump live behind it.

use prism_core::input::InputEvent;
use std::collections::VecDeque;

/// Something the window system reported.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Raw user input, routed to the keyboard or mouse service.
    Input(InputEvent),
    /// The user asked to close the window.
    CloseRequested,
}

/// A source of platform events, polled once per frame.
pub trait Platform {
    /// Appends every event since the previous poll to `events`.
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>);
}

/// A platform that replays a fixed script, one batch per frame.
///
/// Once the script runs out, every poll is empty. The default script is
/// empty, which makes it the platform of a windowless run.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlatform {
    frames: VecDeque<Vec<PlatformEvent>>,
}

impl ScriptedPlatform {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the events delivered on the next unscripted frame.
    pub fn then(mut self, events: impl IntoIterator<Item = PlatformEvent>) -> Self {
        self.frames.push_back(events.into_iter().collect());
        self
    }

    /// Appends `count` frames with no events.
    pub fn idle(mut self, count: usize) -> Self {
        self.frames
            .extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    /// Frames left in the script.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
        if let Some(frame) = self.frames.pop_front() {
            events.extend(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::input::KeyCode;

    #[test]
    fn test_script_is_delivered_one_frame_at_a_time() {
        let escape = PlatformEvent::Input(InputEvent::KeyPressed {
            key: KeyCode::Escape,
        });
        let mut platform = ScriptedPlatform::new()
            .idle(1)
            .then([escape.clone()])
            .then([PlatformEvent::CloseRequested]);

        let mut events = Vec::new();
        platform.poll_events(&mut events);
        assert!(events.is_empty());

        platform.poll_events(&mut events);
        assert_eq!(events, vec![escape]);

        events.clear();
        platform.poll_events(&mut events);
        platform.poll_events(&mut events);
        assert_eq!(events, vec![PlatformEvent::CloseRequested]);
        assert_eq!(platform.remaining(), 0);
    }
}
