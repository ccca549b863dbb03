//! Per-hook pressed-state tracking.
//!
//! Each hook owns one [`PressedState`]. Only that hook's capture thread
//! mutates it, and it does so before the matching transition is dispatched,
//! so an observer that queries the snapshot always sees the transition it is
//! being told about. Any thread may take a snapshot concurrently.

use crate::keycode::{Key, MouseButton};
use std::collections::HashSet;
use std::sync::Mutex;

/// The set of currently-down keys and buttons for one hook.
#[derive(Debug, Default)]
pub(crate) struct PressedState {
    keys: Mutex<HashSet<Key>>,
    buttons: Mutex<HashSet<MouseButton>>,
}

impl PressedState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Apply a key transition. Repeated downs (OS auto-repeat) are no-ops.
    pub(crate) fn apply_key(&self, key: Key, pressed: bool) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if pressed {
            keys.insert(key);
        } else {
            keys.remove(&key);
        }
    }

    /// Apply a button transition.
    pub(crate) fn apply_button(&self, button: MouseButton, pressed: bool) {
        let mut buttons = self.buttons.lock().unwrap_or_else(|e| e.into_inner());
        if pressed {
            buttons.insert(button);
        } else {
            buttons.remove(&button);
        }
    }

    /// Copy of the currently-down keys. Order is unspecified.
    pub(crate) fn keys_snapshot(&self) -> Vec<Key> {
        self.keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .copied()
            .collect()
    }

    /// Copy of the currently-down buttons. Order is unspecified.
    pub(crate) fn buttons_snapshot(&self) -> Vec<MouseButton> {
        self.buttons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn tracks_down_and_up() {
        let state = PressedState::new();
        state.apply_key(Key::KeyA, true);
        state.apply_key(Key::KeyB, true);

        let mut snapshot = state.keys_snapshot();
        snapshot.sort_by_key(|k| *k as u16);
        assert_eq!(snapshot, vec![Key::KeyA, Key::KeyB]);

        state.apply_key(Key::KeyA, false);
        assert_eq!(state.keys_snapshot(), vec![Key::KeyB]);
    }

    #[test]
    fn auto_repeat_downs_are_idempotent() {
        let state = PressedState::new();
        state.apply_key(Key::Space, true);
        state.apply_key(Key::Space, true);
        state.apply_key(Key::Space, true);
        assert_eq!(state.keys_snapshot(), vec![Key::Space]);

        state.apply_key(Key::Space, false);
        assert!(state.keys_snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_readable_from_another_thread() {
        let state = Arc::new(PressedState::new());
        state.apply_key(Key::KeyA, true);
        state.apply_key(Key::KeyB, true);

        let reader = {
            let state = state.clone();
            std::thread::spawn(move || {
                let mut snapshot = state.keys_snapshot();
                snapshot.sort_by_key(|k| *k as u16);
                snapshot
            })
        };
        assert_eq!(reader.join().unwrap(), vec![Key::KeyA, Key::KeyB]);
    }

    #[test]
    fn buttons_tracked_separately_from_keys() {
        let state = PressedState::new();
        state.apply_button(MouseButton::Left, true);
        state.apply_key(Key::ControlLeft, true);

        assert_eq!(state.buttons_snapshot(), vec![MouseButton::Left]);
        assert_eq!(state.keys_snapshot(), vec![Key::ControlLeft]);

        state.apply_button(MouseButton::Left, false);
        assert!(state.buttons_snapshot().is_empty());
    }
}
