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

//! Time sources that feed [`GameTime`].

use prism_core::{GameTime, Stopwatch};

/// Produces the per-frame [`GameTime`].
pub trait Clock {
    /// Restarts the clock from zero.
    fn reset(&mut self);

    /// Writes total and elapsed time for the frame about to run.
    fn update_game_time(&mut self, game_time: &mut GameTime);
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock {
    stopwatch: Stopwatch,
}

impl SystemClock {
    /// Creates a clock started now.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn reset(&mut self) {
        self.stopwatch.restart();
    }

    fn update_game_time(&mut self, game_time: &mut GameTime) {
        let elapsed = self.stopwatch.lap();
        game_time.set_elapsed_game_time(elapsed.as_secs_f64());
        game_time.set_total_game_time(self.stopwatch.elapsed_secs_f64());
    }
}

/// Advances by a constant step every frame, regardless of wall time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    step: f64,
    total: f64,
}

impl FixedStepClock {
    /// Creates a clock advancing `step` seconds per frame.
    pub fn new(step: f64) -> Self {
        Self { step, total: 0.0 }
    }

    /// Seconds per frame.
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Clock for FixedStepClock {
    fn reset(&mut self) {
        self.total = 0.0;
    }

    fn update_game_time(&mut self, game_time: &mut GameTime) {
        self.total += self.step;
        game_time.set_elapsed_game_time(self.step);
        game_time.set_total_game_time(self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_step_accumulates() {
        let mut clock = FixedStepClock::new(0.25);
        let mut time = GameTime::new();
        for _ in 0..4 {
            clock.update_game_time(&mut time);
        }
        assert_relative_eq!(time.total_game_time(), 1.0);
        assert_relative_eq!(time.elapsed_game_time(), 0.25);

        clock.reset();
        clock.update_game_time(&mut time);
        assert_relative_eq!(time.total_game_time(), 0.25);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let mut time = GameTime::new();
        clock.update_game_time(&mut time);
        let first = time.total_game_time();
        std::thread::sleep(std::time::Duration::from_millis(5));
        clock.update_game_time(&mut time);

        assert!(time.total_game_time() > first);
        assert!(time.elapsed_game_time() > 0.0);
        assert!(time.elapsed_game_time() <= time.total_game_time());
    }
}
