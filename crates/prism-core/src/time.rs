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

//! Simulation time handed to every component once per frame.

/// Total and per-frame elapsed simulation time, in seconds.
///
/// The frame driver writes both values once per frame before `update` and
/// `draw` are dispatched. Components only read it. No validation is
/// performed: the driver is trusted, so negative or decreasing values are
/// stored as given.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameTime {
    total_game_time: f64,
    elapsed_game_time: f64,
}

impl GameTime {
    /// Creates a `GameTime` with both values at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the clock was last reset.
    pub fn total_game_time(&self) -> f64 {
        self.total_game_time
    }

    /// Sets the total time. Used exclusively by the frame driver.
    pub fn set_total_game_time(&mut self, total_game_time: f64) {
        self.total_game_time = total_game_time;
    }

    /// Seconds since the previous update, usually non-negative.
    pub fn elapsed_game_time(&self) -> f64 {
        self.elapsed_game_time
    }

    /// Sets the per-frame elapsed time. Used exclusively by the frame driver.
    pub fn set_elapsed_game_time(&mut self, elapsed_game_time: f64) {
        self.elapsed_game_time = elapsed_game_time;
    }

    /// The elapsed time narrowed to `f32`, the precision most update math runs at.
    #[inline]
    pub fn elapsed_secs_f32(&self) -> f32 {
        self.elapsed_game_time as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_is_zeroed() {
        let time = GameTime::new();
        assert_relative_eq!(time.total_game_time(), 0.0);
        assert_relative_eq!(time.elapsed_game_time(), 0.0);
    }

    #[test]
    fn test_accessors_track_last_set_value() {
        let mut time = GameTime::new();
        time.set_total_game_time(12.5);
        time.set_elapsed_game_time(0.016);
        assert_relative_eq!(time.total_game_time(), 12.5);
        assert_relative_eq!(time.elapsed_game_time(), 0.016);

        time.set_elapsed_game_time(0.033);
        assert_relative_eq!(time.elapsed_game_time(), 0.033);
        assert_relative_eq!(time.total_game_time(), 12.5);
    }

    #[test]
    fn test_negative_and_decreasing_values_are_accepted() {
        let mut time = GameTime::new();
        time.set_total_game_time(10.0);
        time.set_total_game_time(4.0);
        time.set_elapsed_game_time(-1.0);
        assert_relative_eq!(time.total_game_time(), 4.0);
        assert_relative_eq!(time.elapsed_game_time(), -1.0);
        assert_relative_eq!(time.elapsed_secs_f32(), -1.0);
    }
}
