//! # inputhook
//!
//! A cross-platform global keyboard/mouse hook with synthetic input
//! injection.
//!
//! One logical model — [`Key`]/[`MouseButton`] identities, press/release
//! observers, pressed-state snapshots, ordered injection — over three native
//! input subsystems:
//!
//! - **Windows**: `WH_KEYBOARD_LL`/`WH_MOUSE_LL` hooks, `SendInput` injection
//! - **macOS**: `CGEventTap` on a dedicated run loop, `CGEventPost` injection
//! - **Linux**: XRecord callback capture with a keymap-polling fallback,
//!   XTest injection
//!
//! Each [`Hook`] owns one dedicated capture thread and is independent of any
//! other hook in the process; the only shared piece is the read-only
//! [`keymap`] code registry.
//!
//! ## Quick start
//!
//! ```no_run
//! use inputhook::{Hook, Key};
//!
//! let hook = Hook::create().expect("failed to start hook");
//!
//! hook.on_key_down(|key| println!("down: {key:?}")).unwrap();
//! hook.on_key_up(|key| println!("up: {key:?}")).unwrap();
//!
//! // Synthesize Ctrl+L: Control pressed, L pressed, L released, Control released.
//! hook.send_key_combo(&[Key::ControlLeft, Key::KeyL]).unwrap();
//!
//! // Snapshot of what is physically held right now, from any thread.
//! println!("held: {:?}", hook.pressed_keys().unwrap());
//!
//! hook.dispose();
//! ```
//!
//! ## Permissions
//!
//! - **macOS** requires the Accessibility permission; without it hook
//!   creation fails with a [`Error::CaptureInit`] naming the fix.
//! - **Linux** needs a reachable X display (`DISPLAY`); the RECORD extension
//!   enables callback capture, otherwise polling is used.
//! - **Windows** needs no special permission for low-level hooks.

pub mod channel;
pub mod error;
pub mod hook;
pub mod keycode;
pub mod keymap;

mod dispatch;
mod inject;
mod platform;
mod poll;
mod state;

// Re-exports
pub use channel::InputEvent;
pub use error::{Error, Result};
pub use hook::{Hook, Subscription};
pub use keycode::{Key, MouseButton};
pub use keymap::{
    button_from_platform_code, button_to_platform_code, from_platform_code, has_platform_code,
    to_platform_code, Platform, UNMAPPED,
};

/// Create a hook for the host platform and start capturing.
///
/// Equivalent to [`Hook::create`].
pub fn create() -> Result<Hook> {
    Hook::create()
}
