use std::thread;
use std::time::{Duration, Instant};

/// Paces the main loop and reports the real time between frames.
pub struct FrameClock {
    last_tick: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock {
            last_tick: Instant::now(),
        }
    }

    /// Sleeps until at least `1 / max_fps` seconds have passed since the
    /// previous tick, then returns the seconds actually elapsed.
    pub fn tick(&mut self, max_fps: f64) -> f64 {
        let frame_time = Duration::from_secs_f64(1.0 / max_fps);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_never_runs_faster_than_the_cap() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            let dt = clock.tick(200.0);
            assert!(dt >= 1.0 / 200.0, "{dt}");
        }
    }
}
