use std::collections::HashSet;

use super::types::{InputEvent, Key, PointerMoveEvent};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys, pointer position).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame (repeats excluded).
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Key presses in arrival order, auto-repeats included.
    pub fn key_presses(&self) -> impl Iterator<Item = Key> + '_ {
        self.events.iter().filter_map(InputEvent::key_press)
    }

    /// Pointer positions in arrival order.
    pub fn pointer_moves(&self) -> impl Iterator<Item = PointerMoveEvent> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::PointerMoved(m) => Some(*m),
            _ => None,
        })
    }
}
