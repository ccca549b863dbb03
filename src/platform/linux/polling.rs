//! X11 polling capture: XQueryKeymap + XQueryPointer sampling.
//!
//! Fallback strategy for servers without the RECORD extension. Each tick
//! samples the full keyboard bitmap and the pointer button mask, diffs them
//! against the previous tick, and emits one transition per changed entry.
//! The first sample is diffed against an empty state, so keys already held
//! at startup seed the pressed set with Down transitions.
//!
//! Only buttons with mask bits (left/middle/right) are observable this way;
//! X1/X2 and wheel ticks require the callback strategy.

use super::imp::NativeStop;
use crate::error::{Error, Result};
use crate::hook::HookCore;
use crate::keycode::MouseButton;
use crate::keymap::{self, Platform};
use crate::poll::{self, KEYMAP_LEN, POLL_FAILURE_BACKOFF, POLL_INTERVAL};
use std::os::raw::c_int;
use std::ptr::null;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use x11::xlib;

/// Pointer-mask bits observable through XQueryPointer.
const BUTTON_BITS: &[(u32, MouseButton)] = &[
    (xlib::Button1Mask, MouseButton::Left),
    (xlib::Button2Mask, MouseButton::Middle),
    (xlib::Button3Mask, MouseButton::Right),
];

/// Run the polling loop. Blocks on this thread until stopped.
pub(super) fn run(core: Arc<HookCore>, ready: Sender<Result<()>>) {
    let display = unsafe { xlib::XOpenDisplay(null()) };
    if display.is_null() {
        let _ = ready.send(Err(Error::CaptureInit(
            "cannot open X display; ensure DISPLAY is set".into(),
        )));
        return;
    }
    let root = unsafe { xlib::XRootWindow(display, xlib::XDefaultScreen(display)) };

    core.set_native(NativeStop::Polling);
    let _ = ready.send(Ok(()));

    let mut previous_keys = [0u8; KEYMAP_LEN];
    let mut previous_buttons = 0u32;

    while core.is_running() {
        let mut raw = [0i8; KEYMAP_LEN];
        let status = unsafe { xlib::XQueryKeymap(display, raw.as_mut_ptr()) };
        if status == 0 {
            // One failed sample never kills the loop.
            log::warn!("XQueryKeymap failed; retrying after backoff");
            thread::sleep(POLL_FAILURE_BACKOFF);
            continue;
        }

        let current_keys = raw.map(|byte| byte as u8);
        for (code, pressed) in poll::keymap_transitions(&previous_keys, &current_keys) {
            core.emit_key(keymap::from_platform_code(code, Platform::Linux), pressed);
        }
        previous_keys = current_keys;

        let mut root_return = 0u64;
        let mut child_return = 0u64;
        let mut root_x: c_int = 0;
        let mut root_y: c_int = 0;
        let mut win_x: c_int = 0;
        let mut win_y: c_int = 0;
        let mut mask: u32 = 0;

        let status = unsafe {
            xlib::XQueryPointer(
                display,
                root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };
        if status != 0 {
            for (button, pressed) in
                poll::button_mask_transitions(previous_buttons, mask, BUTTON_BITS)
            {
                core.emit_button(button, pressed);
            }
            previous_buttons = mask;
        } else {
            log::warn!("XQueryPointer failed; keeping previous button state");
        }

        thread::sleep(POLL_INTERVAL);
    }

    unsafe { xlib::XCloseDisplay(display) };
    log::debug!("polling capture loop exited");
}
