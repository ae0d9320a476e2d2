//! Input latching
//!
//! Host events (key down/up, clicks) arrive whenever the platform delivers
//! them. They are latched here and consumed at the start of the next tick,
//! so every tick sees one consistent input snapshot.

use crate::sim::TickInput;

/// Anything the simulation can poll for this tick's input
pub trait InputSource {
    /// Current held state plus edges since the previous poll
    fn poll(&mut self) -> TickInput;
}

/// Logical keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Restart,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Fire),
            "r" | "R" | "Enter" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Pending-input buffer: held directions plus one-shot edges
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    left_held: bool,
    right_held: bool,
    fire_pending: bool,
    restart_pending: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            Key::Fire => self.fire_pending = true,
            Key::Restart => self.restart_pending = true,
        }
    }

    /// Releasing a fire/restart key does not cancel a press not yet consumed
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            Key::Fire | Key::Restart => {}
        }
    }

    pub fn fire(&mut self) {
        self.fire_pending = true;
    }

    pub fn restart(&mut self) {
        self.restart_pending = true;
    }

    /// Forget everything (e.g. window lost focus)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

impl InputSource for InputLatch {
    fn poll(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left_held,
            right: self.right_held,
            fire: self.fire_pending,
            restart: self.restart_pending,
        };
        self.fire_pending = false;
        self.restart_pending = false;
        input
    }
}
