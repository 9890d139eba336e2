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

use std::time::{Duration, Instant};

/// Wall-clock time since a start point, with lap support for frame deltas.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Instant,
    last_lap: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch started now.
    #[inline]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_lap: now,
        }
    }

    /// Restarts both the total and the lap measurements.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Time since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// [`elapsed`](Self::elapsed) in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// [`elapsed`](Self::elapsed) in microseconds.
    #[inline]
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed().as_micros() as u64
    }

    /// [`elapsed`](Self::elapsed) in seconds.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Time since the previous lap (or the start), and starts a new lap.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now.duration_since(self.last_lap);
        self.last_lap = now;
        lap
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SMALL_DURATION_MS: u64 = 15;
    const SLEEP_DURATION_MS: u64 = 50;
    const SLEEP_MARGIN_MS: u64 = 200;

    #[test]
    fn test_stopwatch_starts_near_zero() {
        let watch = Stopwatch::new();
        assert!(watch.elapsed() < Duration::from_millis(SMALL_DURATION_MS));
        assert!(watch.elapsed_ms() < SMALL_DURATION_MS);
        assert!(watch.elapsed_us() < SMALL_DURATION_MS * 1000);
    }

    #[test]
    fn test_stopwatch_elapsed_after_sleep() {
        let watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));

        let elapsed_ms = watch.elapsed_ms();
        assert!(elapsed_ms >= SLEEP_DURATION_MS);
        assert!(elapsed_ms < SLEEP_DURATION_MS + SLEEP_MARGIN_MS);

        let secs = watch.elapsed_secs_f64();
        assert!(secs >= SLEEP_DURATION_MS as f64 / 1000.0);
    }

    #[test]
    fn test_lap_measures_since_previous_lap() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));
        let first = watch.lap();
        let second = watch.lap();

        assert!(first >= Duration::from_millis(SLEEP_DURATION_MS));
        assert!(second < first);
        assert!(watch.elapsed() >= first);
    }
}
