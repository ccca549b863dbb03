//! Linux backend (X11).
//!
//! Two capture strategies feed the same hook core:
//!
//! - **XRecord** (callback): the authoritative strategy. The X server pushes
//!   every key/button transition synchronously, with no coalescing.
//! - **Keymap polling** (fallback): used when the RECORD extension is not
//!   available. Samples `XQueryKeymap`/`XQueryPointer` at a fixed interval
//!   and diffs consecutive samples.
//!
//! Injection always goes through XTest.
//!
//! The `x11` feature (default) gates the whole backend; without it the stub
//! reports the platform as unsupported at hook creation.

#[cfg(feature = "x11")]
mod polling;
#[cfg(feature = "x11")]
mod record;
#[cfg(feature = "x11")]
mod simulate;

#[cfg(feature = "x11")]
pub(crate) use simulate::{button_event, key_event};

#[cfg(feature = "x11")]
pub(crate) use imp::{run_capture, stop_capture, NativeStop};

#[cfg(feature = "x11")]
mod imp {
    use super::{polling, record};
    use crate::error::Result;
    use crate::hook::HookCore;
    use std::sync::mpsc::Sender;
    use std::sync::Arc;

    /// Teardown handle for whichever strategy ended up running.
    pub(crate) enum NativeStop {
        Record {
            context: x11::xrecord::XRecordContext,
        },
        Polling,
    }

    /// Run the capture loop. Blocks on this thread until stopped.
    pub(crate) fn run_capture(core: Arc<HookCore>, ready: Sender<Result<()>>) {
        if record::extension_available() {
            record::run(core, ready);
        } else {
            log::warn!("XRecord extension unavailable; falling back to keymap polling");
            polling::run(core, ready);
        }
    }

    /// Wake the capture thread so it can observe the cleared running flag.
    pub(crate) fn stop_capture(core: &HookCore) -> Result<()> {
        match core.take_native() {
            Some(NativeStop::Record { context }) => record::disable(context),
            // The polling loop checks the flag every sampling interval.
            Some(NativeStop::Polling) | None => Ok(()),
        }
    }
}

#[cfg(not(feature = "x11"))]
pub(crate) use stub::{button_event, key_event, run_capture, stop_capture, NativeStop};

// If the X11 feature is disabled there is nothing to capture with; fail at
// hook creation rather than at compile time so downstream crates can build
// feature-less on Linux.
#[cfg(not(feature = "x11"))]
mod stub {
    use crate::error::{Error, Result};
    use crate::hook::HookCore;
    use crate::keycode::{Key, MouseButton};
    use std::sync::mpsc::Sender;
    use std::sync::Arc;

    pub(crate) struct NativeStop;

    pub(crate) fn run_capture(_core: Arc<HookCore>, ready: Sender<Result<()>>) {
        let _ = ready.send(Err(Error::PlatformUnsupported(
            "no Linux capture backend enabled; build with the `x11` feature".into(),
        )));
    }

    pub(crate) fn stop_capture(_core: &HookCore) -> Result<()> {
        Ok(())
    }

    pub(crate) fn key_event(_key: Key, _down: bool) -> Result<()> {
        Err(Error::PlatformUnsupported(
            "no Linux injection backend enabled; build with the `x11` feature".into(),
        ))
    }

    pub(crate) fn button_event(_button: MouseButton, _down: bool) -> Result<()> {
        Err(Error::PlatformUnsupported(
            "no Linux injection backend enabled; build with the `x11` feature".into(),
        ))
    }
}
