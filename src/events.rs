use log::info;

use crate::constants::STATE_LOG_INTERVAL_FRAMES;

/// Per-frame numbers handed to [`EventSink::log_state`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateSnapshot {
    pub frame: u64,
    pub score: u32,
    pub asteroids: usize,
    pub shots: usize,
    pub player_x: f64,
    pub player_y: f64,
    pub player_rotation: f64,
}

/// Fire-and-forget sink for named game events.
pub trait EventSink {
    fn log_event(&mut self, name: &str);

    fn log_state(&mut self, _state: &StateSnapshot) {}
}

/// Frames whose state is written out by [`LogSink`].
pub fn is_state_sample_frame(frame: u64) -> bool {
    frame % STATE_LOG_INTERVAL_FRAMES == 0
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn log_event(&mut self, name: &str) {
        info!(target: "splitrock::event", "{}", name);
    }

    fn log_state(&mut self, state: &StateSnapshot) {
        if is_state_sample_frame(state.frame) {
            info!(target: "splitrock::state", "{:?}", state);
        }
    }
}

/// Keeps event names in memory, in order.
impl EventSink for Vec<String> {
    fn log_event(&mut self, name: &str) {
        self.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LOG_LEVEL;
    use crate::input::InputSnapshot;
    use crate::simulation::Simulation;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        sampled: Vec<u64>,
    }

    impl EventSink for Recorder {
        fn log_event(&mut self, name: &str) {
            self.events.push(name.to_string());
        }

        fn log_state(&mut self, state: &StateSnapshot) {
            if is_state_sample_frame(state.frame) {
                self.sampled.push(state.frame);
            }
        }
    }

    #[test]
    fn state_is_sampled_on_the_interval() {
        assert!(is_state_sample_frame(0));
        assert!(!is_state_sample_frame(1));
        assert!(!is_state_sample_frame(STATE_LOG_INTERVAL_FRAMES - 1));
        assert!(is_state_sample_frame(STATE_LOG_INTERVAL_FRAMES));
        assert!(is_state_sample_frame(3 * STATE_LOG_INTERVAL_FRAMES));
    }

    #[test]
    fn simulation_reports_state_every_frame() {
        let mut sim = Simulation::with_seed(9);
        let mut recorder = Recorder::default();
        let frames = 2 * STATE_LOG_INTERVAL_FRAMES + 1;
        for _ in 0..frames {
            sim.step(1.0 / 60.0, &InputSnapshot::default(), &mut recorder);
        }
        assert_eq!(recorder.sampled, vec![0, STATE_LOG_INTERVAL_FRAMES, 2 * STATE_LOG_INTERVAL_FRAMES]);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn state_samples_pass_the_file_log_level() {
        assert!(log::Level::Info <= LOG_LEVEL);
    }
}
