//! Sampling primitives for the polling capture strategy.
//!
//! Where no callback-capable API is available, the capture thread samples
//! full device state at a fixed interval and diffs consecutive samples. The
//! diff logic lives here, platform-free, so it can be tested with synthetic
//! samples; the Linux backend feeds it real `XQueryKeymap`/`XQueryPointer`
//! data.
//!
//! Latency is bounded by the sampling interval, and a press+release that
//! completes within one interval is coalesced away. That loss is inherent to
//! the strategy, not a bug.

#![allow(dead_code)]

use crate::keycode::MouseButton;
use std::time::Duration;

/// Fixed sampling interval (~125 Hz).
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Pause after a failed sample before the loop resumes.
pub(crate) const POLL_FAILURE_BACKOFF: Duration = Duration::from_millis(100);

/// Size of an X11 keymap bit vector: one bit per keycode 0..=255.
pub(crate) const KEYMAP_LEN: usize = 32;

/// Diff two keymap samples.
///
/// Walks the bitmap in ascending keycode order and emits `(keycode, pressed)`
/// once per changed bit: one Down per 0→1 transition, one Up per 1→0.
pub(crate) fn keymap_transitions(
    previous: &[u8; KEYMAP_LEN],
    current: &[u8; KEYMAP_LEN],
) -> Vec<(u32, bool)> {
    let mut transitions = Vec::new();
    for byte in 0..KEYMAP_LEN {
        if previous[byte] == current[byte] {
            continue;
        }
        for bit in 0..8 {
            let was_down = previous[byte] & (1 << bit) != 0;
            let is_down = current[byte] & (1 << bit) != 0;
            if was_down != is_down {
                transitions.push(((byte * 8 + bit) as u32, is_down));
            }
        }
    }
    transitions
}

/// Diff two pointer button masks.
///
/// `bits` pairs each mask bit with its logical button; transitions are
/// emitted in the order the pairs are listed.
pub(crate) fn button_mask_transitions(
    previous: u32,
    current: u32,
    bits: &[(u32, MouseButton)],
) -> Vec<(MouseButton, bool)> {
    let mut transitions = Vec::new();
    for &(mask, button) in bits {
        let was_down = previous & mask != 0;
        let is_down = current & mask != 0;
        if was_down != is_down {
            transitions.push((button, is_down));
        }
    }
    transitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keymap_with(codes: &[u32]) -> [u8; KEYMAP_LEN] {
        let mut map = [0u8; KEYMAP_LEN];
        for &code in codes {
            map[code as usize / 8] |= 1 << (code % 8);
        }
        map
    }

    #[test]
    fn emits_one_down_per_new_bit_in_ascending_order() {
        let previous = keymap_with(&[]);
        let current = keymap_with(&[200, 9, 38]);

        assert_eq!(
            keymap_transitions(&previous, &current),
            vec![(9, true), (38, true), (200, true)]
        );
    }

    #[test]
    fn emits_one_up_per_cleared_bit() {
        let previous = keymap_with(&[9, 38]);
        let current = keymap_with(&[38]);

        assert_eq!(keymap_transitions(&previous, &current), vec![(9, false)]);
    }

    #[test]
    fn mixed_transitions_with_no_duplicates_or_drops() {
        // 38 released, 50 held unchanged, 54 and 56 newly pressed.
        let previous = keymap_with(&[38, 50]);
        let current = keymap_with(&[50, 54, 56]);

        assert_eq!(
            keymap_transitions(&previous, &current),
            vec![(38, false), (54, true), (56, true)]
        );
    }

    #[test]
    fn sample_sequence_yields_exactly_one_event_per_transition() {
        // Faster-than-transition sampling: each edge shows up in exactly one
        // consecutive pair, so replaying the diffs reproduces the edges 1:1.
        let samples = [
            keymap_with(&[]),
            keymap_with(&[38]),
            keymap_with(&[38, 56]),
            keymap_with(&[56]),
            keymap_with(&[]),
        ];

        let mut replay = Vec::new();
        for pair in samples.windows(2) {
            replay.extend(keymap_transitions(&pair[0], &pair[1]));
        }
        assert_eq!(
            replay,
            vec![(38, true), (56, true), (38, false), (56, false)]
        );
    }

    #[test]
    fn press_and_release_within_one_interval_coalesces() {
        // The key went down and back up between samples; both samples agree,
        // so nothing is emitted. Accepted polling limitation.
        let sample = keymap_with(&[120]);
        assert!(keymap_transitions(&sample, &sample).is_empty());
    }

    #[test]
    fn button_mask_diff_tracks_edges() {
        const BUTTON1: u32 = 1 << 8;
        const BUTTON2: u32 = 1 << 9;
        const BUTTON3: u32 = 1 << 10;
        let bits = [
            (BUTTON1, MouseButton::Left),
            (BUTTON2, MouseButton::Middle),
            (BUTTON3, MouseButton::Right),
        ];

        assert_eq!(
            button_mask_transitions(0, BUTTON1 | BUTTON3, &bits),
            vec![(MouseButton::Left, true), (MouseButton::Right, true)]
        );
        assert_eq!(
            button_mask_transitions(BUTTON1 | BUTTON3, BUTTON3, &bits),
            vec![(MouseButton::Left, false)]
        );
        assert!(button_mask_transitions(BUTTON3, BUTTON3, &bits).is_empty());
    }
}
