use crate::api::types::TreeState;

/// Input events the scene understands.
/// The UI layer may send these at any time; they take effect at the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Head toward a specific arrangement.
    SetTarget(TreeState),
    /// Flip the current target.
    Toggle,
}

impl InputEvent {
    /// Target after applying this event to `current`.
    pub fn apply(self, current: TreeState) -> TreeState {
        match self {
            InputEvent::SetTarget(target) => target,
            InputEvent::Toggle => current.toggled(),
        }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them at the start of each frame,
/// so every controller sees a single target for the whole frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fold all pending events into `current`, clearing the queue.
    pub fn resolve(&mut self, current: TreeState) -> TreeState {
        self.drain().into_iter().fold(current, |state, event| event.apply(state))
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
