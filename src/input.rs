#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    RotateLeft,
    RotateRight,
    ThrustForward,
    ThrustBackward,
    Fire,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::RotateLeft,
        Action::RotateRight,
        Action::ThrustForward,
        Action::ThrustBackward,
        Action::Fire,
    ];
}

/// Which actions are held down during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    pub fire: bool,
    pub quit: bool,
}

impl InputSnapshot {
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::RotateLeft => self.rotate_left = pressed,
            Action::RotateRight => self.rotate_right = pressed,
            Action::ThrustForward => self.thrust_forward = pressed,
            Action::ThrustBackward => self.thrust_backward = pressed,
            Action::Fire => self.fire = pressed,
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::ThrustForward => self.thrust_forward,
            Action::ThrustBackward => self.thrust_backward,
            Action::Fire => self.fire,
        }
    }
}
