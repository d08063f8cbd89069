//! Frame timing utilities

use std::time::{Duration, Instant};

/// Per-frame clock feeding `delta_time` into the editor update
///
/// Scene loads and saves run synchronously on the frame thread, so the frame
/// after one can be very long. `max_delta` caps what the camera and physics
/// stub see for that frame.
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    max_delta: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameClock {
    /// Create a clock whose reported delta never exceeds `max_delta` seconds
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            max_delta,
            frame_count: 0,
        }
    }

    /// Advance one frame and return the clamped delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time = elapsed.min(self.max_delta);
        self.delta_time
    }

    /// Time since the previous tick in seconds (clamped)
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Simple stopwatch for measuring blocking operations such as scene I/O
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Start a new stopwatch
    pub fn start_new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Elapsed time since start
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_clamps_delta() {
        let mut clock = FrameClock::new(0.0);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_frame_clock_reports_elapsed() {
        let mut clock = FrameClock::new(10.0);
        std::thread::sleep(Duration::from_millis(2));
        let delta = clock.tick();
        assert!(delta > 0.0);
        assert_eq!(clock.delta_time(), delta);
    }
}
