use std::collections::HashMap;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::constants::KEY_HOLD_SECONDS;
use crate::input::{Action, InputSnapshot};

pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Action::RotateLeft),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Action::RotateRight),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Action::ThrustForward),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Action::ThrustBackward),
        KeyCode::Char(' ') => Some(Action::Fire),
        _ => None,
    }
}

pub fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// --- KeyboardState: held keys reconstructed from terminal key events ---
//
// Most terminals never report key releases, only the initial press and the
// auto-repeat that follows. An action counts as held while its latest press
// or repeat is younger than KEY_HOLD_SECONDS.
#[derive(Debug, Default)]
pub struct KeyboardState {
    last_seen: HashMap<Action, f64>,
    now: f64,
    quit: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
        let now = self.now;
        self.last_seen.retain(|_, seen| now - *seen <= KEY_HOLD_SECONDS);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        if is_quit(key) {
            self.quit = true;
            return;
        }
        let Some(action) = action_for(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(action, self.now);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&action);
            }
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        let mut input = InputSnapshot {
            quit: self.quit,
            ..InputSnapshot::default()
        };
        for action in Action::ALL {
            input.set(action, self.last_seen.contains_key(&action));
        }
        input
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// Fire a few times, turn, thrust, then quit.
    pub fn scripted() -> Self {
        let key = |code: KeyCode| Event::Key(code.into());
        let mut events = HashMap::new();
        events.insert(1, vec![key(KeyCode::Char(' '))]);
        events.insert(5, vec![key(KeyCode::Char('d'))]);
        events.insert(20, vec![key(KeyCode::Char(' ')), key(KeyCode::Char('w'))]);
        events.insert(40, vec![key(KeyCode::Char('a'))]);
        events.insert(90, vec![key(KeyCode::Char('q'))]);
        SimulatedInput::new(events)
    }

    pub fn events_for(&mut self, frame: u64) -> Vec<Event> {
        self.events.remove(&frame).unwrap_or_default()
    }
}
