//! Abstract input contract
//!
//! The engine only ever asks "is this action held right now?" - it never
//! sees raw key identities. Hosts map their own bindings onto [`Action`]
//! and feed the engine an [`InputSource`].

/// The complete action set the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Shoot,
    /// Rocket
    Skill1,
    /// Smart rocket
    Skill2,
    /// Laser beam
    Skill3,
    Shield,
    Pause,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Shoot,
        Action::Skill1,
        Action::Skill2,
        Action::Skill3,
        Action::Shield,
        Action::Pause,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
            Action::Shoot => 4,
            Action::Skill1 => 5,
            Action::Skill2 => 6,
            Action::Skill3 => 7,
            Action::Shield => 8,
            Action::Pause => 9,
        }
    }
}

/// Boolean-query capability over the abstract action set
pub trait InputSource {
    fn is_pressed(&self, action: Action) -> bool;
}

/// Plain held-action set, for hosts and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: [bool; Action::ALL.len()],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.held[action.index()] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    pub fn set(&mut self, action: Action, held: bool) {
        self.held[action.index()] = held;
    }

    pub fn clear(&mut self) {
        self.held = [false; Action::ALL.len()];
    }
}

impl InputSource for InputState {
    fn is_pressed(&self, action: Action) -> bool {
        self.held[action.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::new();
        assert!(!input.is_pressed(Action::Left));

        input.press(Action::Left);
        input.press(Action::Shoot);
        assert!(input.is_pressed(Action::Left));
        assert!(input.is_pressed(Action::Shoot));
        assert!(!input.is_pressed(Action::Right));

        input.release(Action::Left);
        assert!(!input.is_pressed(Action::Left));
        assert!(input.is_pressed(Action::Shoot));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputState::new();
        for action in Action::ALL {
            input.press(action);
        }
        input.clear();
        for action in Action::ALL {
            assert!(!input.is_pressed(action));
        }
    }
}
