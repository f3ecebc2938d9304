//! Held-key tracking.
//!
//! Platforms deliver auto-repeat as a stream of extra presses and can send a
//! release for a key the window never saw go down (for example when focus
//! arrives while the key is held). [`KeyTracker`] filters that stream down
//! to real transitions: per key, emitted events always alternate
//! pressed/released, starting with pressed.

use std::collections::BTreeSet;

use crate::key::Key;

// ---------------------------------------------------------------------------
// KeyState / KeyEvent
// ---------------------------------------------------------------------------

/// Raw state reported by the platform for one key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    pub fn is_pressed(self) -> bool {
        self == KeyState::Pressed
    }
}

/// A press or release edge, as handed to the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyEvent {
    /// Platform scancode of the physical key (`0` if unavailable).
    pub scancode: u32,
    /// The logical key.
    pub key: Key,
    /// `true` for a press edge, `false` for a release edge.
    pub pressed: bool,
}

// ---------------------------------------------------------------------------
// KeyTracker
// ---------------------------------------------------------------------------

/// The set of currently held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    held: BTreeSet<Key>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw key input; returns the edge it produces, if any.
    ///
    /// Repeated presses of a held key and releases of a key that is not
    /// held produce nothing.
    pub fn observe(&mut self, scancode: u32, key: Key, state: KeyState) -> Option<KeyEvent> {
        let changed = match state {
            KeyState::Pressed => self.held.insert(key),
            KeyState::Released => self.held.remove(&key),
        };
        if !changed {
            tracing::trace!(%key, ?state, "ignoring key input with no state change");
            return None;
        }
        Some(KeyEvent {
            scancode,
            key,
            pressed: state.is_pressed(),
        })
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Held keys in ascending code order.
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Forget every held key, returning them in ascending code order.
    ///
    /// No release events are produced.
    pub fn release_all(&mut self) -> Vec<Key> {
        std::mem::take(&mut self.held).into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
