//! Windows input capture using SetWindowsHookEx.
//!
//! `WH_KEYBOARD_LL` and `WH_MOUSE_LL` hooks are installed on the capture
//! thread, which then runs the `GetMessageW` loop low-level hooks require.
//! Both hook procs run on the installing thread, so the active hook core
//! lives in a thread-local: concurrent hooks in one process each get their
//! own capture thread, hooks and context, with no shared globals.

use crate::error::{Error, Result};
use crate::hook::HookCore;
use crate::keycode::MouseButton;
use crate::keymap::{self, Platform};
use std::cell::RefCell;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, GetMessageW, PostThreadMessageW, SetWindowsHookExW, UnhookWindowsHookEx,
    HC_ACTION, KBDLLHOOKSTRUCT, MSG, MSLLHOOKSTRUCT, WH_KEYBOARD_LL, WH_MOUSE_LL, WM_KEYDOWN,
    WM_KEYUP, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSEWHEEL, WM_QUIT,
    WM_RBUTTONDOWN, WM_RBUTTONUP, WM_SYSKEYDOWN, WM_SYSKEYUP, WM_XBUTTONDOWN, WM_XBUTTONUP,
};

thread_local! {
    /// The hook core owned by this capture thread. Hook procs read it; it is
    /// set before the hooks are installed and cleared after they are removed.
    static ACTIVE_CORE: RefCell<Option<Arc<HookCore>>> = RefCell::new(None);
}

/// Wakes the capture thread out of its message loop.
pub(crate) struct NativeStop {
    thread_id: u32,
}

/// Get VK code from KBDLLHOOKSTRUCT
unsafe fn get_vk_code(lpdata: LPARAM) -> u32 {
    let kb = unsafe { *(lpdata.0 as *const KBDLLHOOKSTRUCT) };
    kb.vkCode
}

/// Get the high word of mouseData (wheel delta or X-button index)
unsafe fn get_mouse_data_high(lpdata: LPARAM) -> u16 {
    let mouse = unsafe { *(lpdata.0 as *const MSLLHOOKSTRUCT) };
    ((mouse.mouseData >> 16) & 0xFFFF) as u16
}

fn xbutton_identity(index: u16) -> Option<MouseButton> {
    match index {
        1 => Some(MouseButton::X1),
        2 => Some(MouseButton::X2),
        _ => None,
    }
}

/// Keyboard hook callback
unsafe extern "system" fn keyboard_callback(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        ACTIVE_CORE.with(|cell| {
            if let Some(core) = cell.borrow().as_ref() {
                let vk = unsafe { get_vk_code(lparam) };
                let key = keymap::from_platform_code(vk, Platform::Windows);
                match wparam.0 as u32 {
                    WM_KEYDOWN | WM_SYSKEYDOWN => core.emit_key(key, true),
                    WM_KEYUP | WM_SYSKEYUP => core.emit_key(key, false),
                    _ => {}
                }
            }
        });
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

/// Mouse hook callback
unsafe extern "system" fn mouse_callback(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        ACTIVE_CORE.with(|cell| {
            if let Some(core) = cell.borrow().as_ref() {
                match wparam.0 as u32 {
                    WM_LBUTTONDOWN => core.emit_button(MouseButton::Left, true),
                    WM_LBUTTONUP => core.emit_button(MouseButton::Left, false),
                    WM_RBUTTONDOWN => core.emit_button(MouseButton::Right, true),
                    WM_RBUTTONUP => core.emit_button(MouseButton::Right, false),
                    WM_MBUTTONDOWN => core.emit_button(MouseButton::Middle, true),
                    WM_MBUTTONUP => core.emit_button(MouseButton::Middle, false),
                    WM_XBUTTONDOWN => {
                        let index = unsafe { get_mouse_data_high(lparam) };
                        if let Some(button) = xbutton_identity(index) {
                            core.emit_button(button, true);
                        }
                    }
                    WM_XBUTTONUP => {
                        let index = unsafe { get_mouse_data_high(lparam) };
                        if let Some(button) = xbutton_identity(index) {
                            core.emit_button(button, false);
                        }
                    }
                    WM_MOUSEWHEEL => {
                        // A wheel tick has no release message; surface it as a
                        // press immediately followed by a release.
                        let delta = unsafe { get_mouse_data_high(lparam) } as i16;
                        let tick = if delta > 0 {
                            MouseButton::WheelUp
                        } else {
                            MouseButton::WheelDown
                        };
                        core.emit_button(tick, true);
                        core.emit_button(tick, false);
                    }
                    _ => {}
                }
            }
        });
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

/// Run the capture loop. Blocks on this thread until stopped.
pub(crate) fn run_capture(core: Arc<HookCore>, ready: Sender<Result<()>>) {
    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = Some(core.clone()));

    let keyboard_hook = match unsafe {
        SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_callback), None, 0)
    } {
        Ok(hook) => hook,
        Err(e) => {
            ACTIVE_CORE.with(|cell| *cell.borrow_mut() = None);
            let _ = ready.send(Err(Error::CaptureInit(format!(
                "failed to install keyboard hook: {e}"
            ))));
            return;
        }
    };

    let mouse_hook = match unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_callback), None, 0) }
    {
        Ok(hook) => hook,
        Err(e) => {
            unsafe {
                let _ = UnhookWindowsHookEx(keyboard_hook);
            }
            ACTIVE_CORE.with(|cell| *cell.borrow_mut() = None);
            let _ = ready.send(Err(Error::CaptureInit(format!(
                "failed to install mouse hook: {e}"
            ))));
            return;
        }
    };

    core.set_native(NativeStop {
        thread_id: unsafe { GetCurrentThreadId() },
    });
    let _ = ready.send(Ok(()));

    // Message loop: required for low-level hooks to deliver events. Exits on
    // WM_QUIT (posted by stop_capture) or when the running flag drops.
    let mut msg = MSG::default();
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            if !core.is_running() {
                break;
            }
        }
    }

    unsafe {
        let _ = UnhookWindowsHookEx(keyboard_hook);
        let _ = UnhookWindowsHookEx(mouse_hook);
    }
    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = None);
    log::debug!("windows capture loop exited");
}

/// Ask the capture thread to exit its message loop.
pub(crate) fn stop_capture(core: &HookCore) -> Result<()> {
    if let Some(stop) = core.take_native() {
        unsafe {
            PostThreadMessageW(stop.thread_id, WM_QUIT, WPARAM(0), LPARAM(0))
                .map_err(|e| Error::Thread(format!("failed to post WM_QUIT: {e}")))?;
        }
    }
    Ok(())
}
