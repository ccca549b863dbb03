//! Windows event injection using SendInput.

use crate::error::{Error, Result};
use crate::keycode::{Key, MouseButton};
use crate::keymap::{self, Platform, UNMAPPED};
use std::mem::size_of;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN,
    MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_WHEEL,
    MOUSEEVENTF_XDOWN, MOUSEEVENTF_XUP, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};

const WHEEL_DELTA: i32 = 120;

/// Send a mouse event
fn sim_mouse_event(flags: MOUSE_EVENT_FLAGS, data: u32) -> Result<()> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: data,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    let inputs = [input];
    let result = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };

    if result != 1 {
        Err(Error::Injection("SendInput failed for mouse event".into()))
    } else {
        Ok(())
    }
}

/// Send a keyboard event
fn sim_keyboard_event(vk: u16, down: bool) -> Result<()> {
    let dwflags = if down {
        KEYBD_EVENT_FLAGS(0)
    } else {
        KEYEVENTF_KEYUP
    };

    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: 0,
                dwFlags: dwflags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    let inputs = [input];
    let result = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };

    if result != 1 {
        Err(Error::Injection(
            "SendInput failed for keyboard event".into(),
        ))
    } else {
        Ok(())
    }
}

/// Synthesize one key transition.
pub(crate) fn key_event(key: Key, down: bool) -> Result<()> {
    let vk = keymap::to_platform_code(key, Platform::Windows);
    if vk == UNMAPPED {
        return Err(Error::Injection(format!(
            "no Windows virtual-key code for {key:?}"
        )));
    }
    sim_keyboard_event(vk as u16, down)
}

/// Synthesize one button transition.
///
/// Wheel ticks are flag/delta based on Windows: the press issues one notch
/// and the release is a no-op.
pub(crate) fn button_event(button: MouseButton, down: bool) -> Result<()> {
    match button {
        MouseButton::Left => sim_mouse_event(
            if down {
                MOUSEEVENTF_LEFTDOWN
            } else {
                MOUSEEVENTF_LEFTUP
            },
            0,
        ),
        MouseButton::Right => sim_mouse_event(
            if down {
                MOUSEEVENTF_RIGHTDOWN
            } else {
                MOUSEEVENTF_RIGHTUP
            },
            0,
        ),
        MouseButton::Middle => sim_mouse_event(
            if down {
                MOUSEEVENTF_MIDDLEDOWN
            } else {
                MOUSEEVENTF_MIDDLEUP
            },
            0,
        ),
        MouseButton::X1 => {
            sim_mouse_event(if down { MOUSEEVENTF_XDOWN } else { MOUSEEVENTF_XUP }, 1)
        }
        MouseButton::X2 => {
            sim_mouse_event(if down { MOUSEEVENTF_XDOWN } else { MOUSEEVENTF_XUP }, 2)
        }
        MouseButton::WheelUp => {
            if down {
                sim_mouse_event(MOUSEEVENTF_WHEEL, WHEEL_DELTA as u32)
            } else {
                Ok(())
            }
        }
        MouseButton::WheelDown => {
            if down {
                sim_mouse_event(MOUSEEVENTF_WHEEL, (-WHEEL_DELTA) as u32)
            } else {
                Ok(())
            }
        }
    }
}
