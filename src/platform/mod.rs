//! Platform-specific capture and injection backends.
//!
//! Every backend exposes the same surface to the rest of the crate:
//! `run_capture` (blocking, runs on the hook's dedicated capture thread and
//! signals readiness through the channel once native resources are live),
//! `stop_capture` (callable from any thread, best-effort wakeup of the
//! capture thread), `NativeStop` (whatever the wakeup needs), and the
//! `key_event`/`button_event` injection primitives.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub(crate) use macos::*;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub(crate) use windows::*;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub(crate) use linux::*;

// Ensure at least one platform is supported
#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
compile_error!("inputhook only supports macOS, Windows, and Linux");
