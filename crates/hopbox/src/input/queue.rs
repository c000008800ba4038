use crate::input::keys::KeyCode;

/// Keyboard events forwarded from the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down (also sent on OS auto-repeat).
    KeyDown { key: KeyCode },
    /// A key was released.
    KeyUp { key: KeyCode },
}

impl InputEvent {
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown { key }
    }

    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp { key }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them at the start of a frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
