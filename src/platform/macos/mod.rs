//! macOS backend: CGEventTap capture, CGEvent injection.

mod listen;
mod simulate;

pub(crate) use listen::{run_capture, stop_capture, NativeStop};
pub(crate) use simulate::{button_event, key_event};
