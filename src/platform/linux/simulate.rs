//! X11 event injection using XTest.

use crate::error::{Error, Result};
use crate::keycode::{Key, MouseButton};
use crate::keymap::{self, Platform};
use std::os::raw::c_int;
use std::ptr::null;
use x11::xlib;
use x11::xtest;

const TRUE: c_int = 1;
const FALSE: c_int = 0;

/// Open a display connection
fn open_display() -> Result<*mut xlib::Display> {
    let display = unsafe { xlib::XOpenDisplay(null()) };
    if display.is_null() {
        Err(Error::Injection("failed to open X display".into()))
    } else {
        Ok(display)
    }
}

/// Synthesize one key transition.
pub(crate) fn key_event(key: Key, down: bool) -> Result<()> {
    if !keymap::has_platform_code(key, Platform::Linux) {
        return Err(Error::Injection(format!("no X11 keycode for {key:?}")));
    }
    let code = keymap::to_platform_code(key, Platform::Linux);

    let display = open_display()?;
    let result = unsafe {
        xtest::XTestFakeKeyEvent(display, code, if down { TRUE } else { FALSE }, 0)
    };

    unsafe {
        xlib::XFlush(display);
        xlib::XSync(display, 0);
        xlib::XCloseDisplay(display);
    }

    if result == 0 {
        Err(Error::Injection("XTestFakeKeyEvent failed".into()))
    } else {
        Ok(())
    }
}

/// Synthesize one button transition.
///
/// Wheel ticks are real buttons (4/5) on X11, so press and release both
/// travel as fake button events.
pub(crate) fn button_event(button: MouseButton, down: bool) -> Result<()> {
    let code = keymap::button_to_platform_code(button, Platform::Linux);

    let display = open_display()?;
    let result = unsafe {
        xtest::XTestFakeButtonEvent(display, code, if down { TRUE } else { FALSE }, 0)
    };

    unsafe {
        xlib::XFlush(display);
        xlib::XSync(display, 0);
        xlib::XCloseDisplay(display);
    }

    if result == 0 {
        Err(Error::Injection("XTestFakeButtonEvent failed".into()))
    } else {
        Ok(())
    }
}
