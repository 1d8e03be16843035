//! Keyboard mapping
//!
//! Translates DOM key identifiers into the held-key snapshot the simulation
//! reads each frame.

use crate::sim::Keys;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode` value
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Key::Left),
            38 => Some(Key::Up),
            39 => Some(Key::Right),
            40 => Some(Key::Down),
            32 => Some(Key::Space),
            _ => None,
        }
    }
}

impl Keys {
    /// Record a key press or release
    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Space => self.space = pressed,
        }
    }

    /// Release everything (e.g. when the page loses focus)
    pub fn release_all(&mut self) {
        *self = Keys::default();
    }
}
