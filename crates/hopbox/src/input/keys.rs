use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::input::queue::{InputEvent, InputQueue};

/// Browser `keyCode` of a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(32);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const W: KeyCode = KeyCode(87);
}

/// The keyboard queries game logic is allowed to make.
pub trait KeyInput {
    /// The key is currently held.
    fn is_key_down(&self, key: KeyCode) -> bool;
    /// The key went down this frame and was not held the frame before.
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// Held and freshly-pressed keys, rebuilt from `InputEvent`s.
#[derive(Debug, Default)]
pub struct KeyState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => {
                // Auto-repeat sends KeyDown for a held key: not a fresh press.
                if self.held.insert(key) {
                    self.pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key } => {
                self.held.remove(&key);
            }
        }
    }

    /// Drain `queue` in arrival order.
    pub fn apply_queue(&mut self, queue: &mut InputQueue) {
        for event in queue.drain() {
            self.apply(&event);
        }
    }

    /// Forget this frame's fresh presses. Held keys stay held.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl KeyInput for KeyState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}
