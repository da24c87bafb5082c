//! Keyboard controls
//!
//! Raw key state is kept apart from what the simulation sees. Each frame the
//! held keys are turned into an ordered list of [`Action`]s:
//! - Edge-triggered actions (thrust, brake) fire once per physical press
//! - Level-triggered actions (turning, firing) fire every frame while held
//!
//! Key repeat from the host never re-arms an edge-triggered action; only
//! releasing the key does.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Recognized keys, ordered by their legacy key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Space = 32,
    Left = 37,
    Up = 38,
    Right = 39,
    Down = 40,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            " " | "Spacebar" => Some(Key::Space),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowRight" | "Right" => Some(Key::Right),
            "ArrowDown" | "Down" => Some(Key::Down),
            _ => None,
        }
    }

    /// Map a legacy numeric key code (`KeyboardEvent.which`)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            32 => Some(Key::Space),
            37 => Some(Key::Left),
            38 => Some(Key::Up),
            39 => Some(Key::Right),
            40 => Some(Key::Down),
            _ => None,
        }
    }
}

/// How an action responds to a held key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Once per press
    Edge,
    /// Every frame while held
    Level,
}

/// Something the player asks their ship to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Fire a bullet and stop dead
    Fire,
    /// Rotate counter-clockwise
    RotateLeft,
    /// Add a thrust impulse along the heading
    Thrust,
    /// Rotate clockwise
    RotateRight,
    /// Zero velocity (duel ruleset only)
    Brake,
}

impl Action {
    /// Evaluation order within a frame (ascending key code)
    pub const ORDER: [Action; 5] = [
        Action::Fire,
        Action::RotateLeft,
        Action::Thrust,
        Action::RotateRight,
        Action::Brake,
    ];

    pub fn key(self) -> Key {
        match self {
            Action::Fire => Key::Space,
            Action::RotateLeft => Key::Left,
            Action::Thrust => Key::Up,
            Action::RotateRight => Key::Right,
            Action::Brake => Key::Down,
        }
    }

    pub fn trigger(self) -> Trigger {
        match self {
            Action::Thrust | Action::Brake => Trigger::Edge,
            Action::Fire | Action::RotateLeft | Action::RotateRight => Trigger::Level,
        }
    }
}

/// Held keys plus the edge-trigger latch
#[derive(Debug, Clone, Default)]
pub struct Controls {
    held: BTreeSet<Key>,
    /// Held keys whose edge-triggered action already fired this press
    spent: BTreeSet<Key>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // A repeat for a key already held changes nothing
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
        self.spent.remove(&key);
    }

    /// Drop all keys (e.g. when the page loses focus)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.spent.clear();
    }

    /// Actions for this frame in [`Action::ORDER`], latching edge-triggered ones
    pub fn frame_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        for action in Action::ORDER {
            let key = action.key();
            if !self.held.contains(&key) {
                continue;
            }
            match action.trigger() {
                Trigger::Level => actions.push(action),
                Trigger::Edge => {
                    if self.spent.insert(key) {
                        actions.push(action);
                    }
                }
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom_key(" "), Some(Key::Space));
        assert_eq!(Key::from_dom_key("a"), None);
        assert_eq!(Key::from_code(39), Some(Key::Right));
        assert_eq!(Key::from_code(13), None);
    }

    #[test]
    fn test_thrust_fires_once_per_press() {
        let mut controls = Controls::new();
        controls.key_down(Key::Up);
        assert_eq!(controls.frame_actions(), vec![Action::Thrust]);
        for _ in 0..100 {
            assert!(controls.frame_actions().is_empty());
        }
        // Key repeat while still held does not re-arm
        controls.key_down(Key::Up);
        assert!(controls.frame_actions().is_empty());

        controls.key_up(Key::Up);
        controls.key_down(Key::Up);
        assert_eq!(controls.frame_actions(), vec![Action::Thrust]);
    }

    #[test]
    fn test_brake_fires_once_per_press() {
        let mut controls = Controls::new();
        controls.key_down(Key::Down);
        assert_eq!(controls.frame_actions(), vec![Action::Brake]);
        for _ in 0..10 {
            assert!(controls.frame_actions().is_empty());
        }
        controls.key_down(Key::Down);
        assert!(controls.frame_actions().is_empty());

        controls.key_up(Key::Down);
        controls.key_down(Key::Down);
        assert_eq!(controls.frame_actions(), vec![Action::Brake]);
        assert!(controls.frame_actions().is_empty());
    }

    #[test]
    fn test_level_actions_repeat_while_held() {
        let mut controls = Controls::new();
        controls.key_down(Key::Left);
        controls.key_down(Key::Space);
        for _ in 0..5 {
            assert_eq!(
                controls.frame_actions(),
                vec![Action::Fire, Action::RotateLeft]
            );
        }
        controls.key_up(Key::Space);
        assert_eq!(controls.frame_actions(), vec![Action::RotateLeft]);
    }

    #[test]
    fn test_fixed_order_ignores_press_order() {
        let mut controls = Controls::new();
        controls.key_down(Key::Down);
        controls.key_down(Key::Right);
        controls.key_down(Key::Up);
        controls.key_down(Key::Left);
        controls.key_down(Key::Space);
        assert_eq!(controls.frame_actions(), Action::ORDER.to_vec());
    }

    #[test]
    fn test_release_all() {
        let mut controls = Controls::new();
        controls.key_down(Key::Up);
        controls.frame_actions();
        controls.key_down(Key::Left);
        controls.release_all();
        assert!(controls.frame_actions().is_empty());
        controls.key_down(Key::Up);
        assert_eq!(controls.frame_actions(), vec![Action::Thrust]);
    }
}
