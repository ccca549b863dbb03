//! Channel-based event receiving for non-blocking event processing.
//!
//! Observers run on the capture thread and must return quickly. When an
//! application would rather pull events at its own pace, this module bridges
//! a hook's four observer lists into a single channel of [`InputEvent`]s.
//! Sends never block the capture thread: if the consumer falls behind a
//! bounded channel, events are dropped rather than stalling input delivery.
//!
//! # Example
//!
//! ```no_run
//! use inputhook::{Hook, InputEvent};
//!
//! let hook = Hook::create().expect("failed to start hook");
//! let rx = inputhook::channel::input_channel(&hook, 100).expect("hook disposed");
//!
//! for event in rx.iter() {
//!     match event {
//!         InputEvent::Key { key, pressed } => println!("{key:?} pressed={pressed}"),
//!         InputEvent::Button { button, pressed } => println!("{button:?} pressed={pressed}"),
//!     }
//! }
//! ```

use crate::error::Result;
use crate::hook::Hook;
use crate::keycode::{Key, MouseButton};
use std::sync::mpsc::{self, Receiver, SyncSender};

/// A key or button transition, as delivered over a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A keyboard transition.
    Key { key: Key, pressed: bool },
    /// A mouse button transition.
    Button { button: MouseButton, pressed: bool },
}

fn forward(sender: &SyncSender<InputEvent>, event: InputEvent) {
    // Drop on a full buffer instead of blocking the capture thread.
    let _ = sender.try_send(event);
}

/// Forward every transition from `hook` into a bounded channel.
///
/// The registered observers live until the hook is disposed, which also ends
/// the event stream. `capacity` bounds how many events may queue while the
/// consumer is busy; overflow is dropped.
pub fn input_channel(hook: &Hook, capacity: usize) -> Result<Receiver<InputEvent>> {
    let (sender, receiver) = mpsc::sync_channel(capacity);

    {
        let sender = sender.clone();
        hook.on_key_down(move |key| forward(&sender, InputEvent::Key { key, pressed: true }))?;
    }
    {
        let sender = sender.clone();
        hook.on_key_up(move |key| forward(&sender, InputEvent::Key { key, pressed: false }))?;
    }
    {
        let sender = sender.clone();
        hook.on_button_down(move |button| {
            forward(
                &sender,
                InputEvent::Button {
                    button,
                    pressed: true,
                },
            )
        })?;
    }
    hook.on_button_up(move |button| {
        forward(
            &sender,
            InputEvent::Button {
                button,
                pressed: false,
            },
        )
    })?;

    Ok(receiver)
}

// ============================================================================
// Tokio async support (behind feature flag)
// ============================================================================

#[cfg(feature = "tokio")]
pub use tokio_channel::*;

#[cfg(feature = "tokio")]
mod tokio_channel {
    use super::*;
    use tokio::sync::mpsc as tokio_mpsc;

    /// Forward every transition from `hook` into a tokio channel.
    ///
    /// Same contract as [`input_channel`], with an async receiver.
    pub fn input_channel_async(
        hook: &Hook,
        capacity: usize,
    ) -> Result<tokio_mpsc::Receiver<InputEvent>> {
        let (sender, receiver) = tokio_mpsc::channel(capacity);

        {
            let sender = sender.clone();
            hook.on_key_down(move |key| {
                let _ = sender.try_send(InputEvent::Key { key, pressed: true });
            })?;
        }
        {
            let sender = sender.clone();
            hook.on_key_up(move |key| {
                let _ = sender.try_send(InputEvent::Key {
                    key,
                    pressed: false,
                });
            })?;
        }
        {
            let sender = sender.clone();
            hook.on_button_down(move |button| {
                let _ = sender.try_send(InputEvent::Button {
                    button,
                    pressed: true,
                });
            })?;
        }
        hook.on_button_up(move |button| {
            let _ = sender.try_send(InputEvent::Button {
                button,
                pressed: false,
            });
        })?;

        Ok(receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_arrive_in_detection_order() {
        let hook = Hook::detached();
        let rx = input_channel(&hook, 16).unwrap();

        hook.test_emit_key(Key::ControlLeft, true);
        hook.test_emit_key(Key::KeyC, true);
        hook.test_emit_key(Key::KeyC, false);
        hook.test_emit_button(MouseButton::Left, true);
        hook.test_emit_button(MouseButton::Left, false);
        hook.test_emit_key(Key::ControlLeft, false);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Key {
                    key: Key::ControlLeft,
                    pressed: true
                },
                InputEvent::Key {
                    key: Key::KeyC,
                    pressed: true
                },
                InputEvent::Key {
                    key: Key::KeyC,
                    pressed: false
                },
                InputEvent::Button {
                    button: MouseButton::Left,
                    pressed: true
                },
                InputEvent::Button {
                    button: MouseButton::Left,
                    pressed: false
                },
                InputEvent::Key {
                    key: Key::ControlLeft,
                    pressed: false
                },
            ]
        );
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let hook = Hook::detached();
        let rx = input_channel(&hook, 2).unwrap();

        for _ in 0..5 {
            hook.test_emit_key(Key::Space, true);
        }

        // Only the buffered two made it; the emitter was never blocked.
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn channel_on_disposed_hook_is_rejected() {
        let hook = Hook::detached();
        hook.dispose();
        assert!(input_channel(&hook, 4).is_err());
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn async_channel_delivers_transitions() {
        let hook = Hook::detached();
        let mut rx = input_channel_async(&hook, 16).unwrap();

        hook.test_emit_key(Key::KeyA, true);
        hook.test_emit_key(Key::KeyA, false);

        assert_eq!(
            rx.recv().await,
            Some(InputEvent::Key {
                key: Key::KeyA,
                pressed: true
            })
        );
        assert_eq!(
            rx.recv().await,
            Some(InputEvent::Key {
                key: Key::KeyA,
                pressed: false
            })
        );
    }
}
