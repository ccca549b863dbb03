//! macOS input capture using CGEventTap.
//!
//! The tap is created listen-only on the capture thread and serviced by a
//! CFRunLoop created and driven on that same thread. The tap callback runs
//! on the capture thread as well, so the active hook core lives in a
//! thread-local and concurrent hooks stay fully independent.
//!
//! macOS disables a tap whose callback overruns its time budget (and on some
//! user-input events); the callback detects that and re-enables the tap.

#![allow(improper_ctypes_definitions)]
#![allow(unsafe_op_in_unsafe_fn)]

use crate::error::{Error, Result};
use crate::hook::HookCore;
use crate::keycode::{Key, MouseButton};
use crate::keymap::{self, Platform};
use core::ptr::NonNull;
use objc2_core_foundation::{kCFRunLoopCommonModes, CFMachPort, CFRunLoop};
use objc2_core_graphics::{
    kCGEventMaskForAllEvents, CGEvent, CGEventField, CGEventFlags, CGEventTapCallBack,
    CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement, CGEventTapProxy, CGEventType,
};
use objc2_foundation::NSAutoreleasePool;
use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::ptr::{null, null_mut};
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[link(name = "Cocoa", kind = "framework")]
extern "C" {}

thread_local! {
    /// The hook core owned by this capture thread.
    static ACTIVE_CORE: RefCell<Option<Arc<HookCore>>> = RefCell::new(None);

    /// The tap serviced by this thread, for timeout recovery.
    static ACTIVE_TAP: Cell<*const CFMachPort> = Cell::new(null());

    /// Last seen flags, for deriving modifier press/release from FlagsChanged.
    static LAST_FLAGS: Cell<CGEventFlags> = Cell::new(CGEventFlags(0));
}

/// Stops the capture thread's run loop from another thread.
pub(crate) struct NativeStop {
    run_loop: RunLoopPtr,
}

/// Raw pointer to the capture thread's run loop.
///
/// Safety: the pointee stays alive while the capture thread sits inside
/// `CFRunLoop::run()`, which is the only window in which a stop is issued,
/// and `CFRunLoopStop` is documented as callable from any thread.
struct RunLoopPtr(*const CFRunLoop);
unsafe impl Send for RunLoopPtr {}

/// The CGEventFlags bit that reflects a modifier key's group, if any.
fn modifier_flag(key: Key) -> Option<CGEventFlags> {
    match key {
        Key::ShiftLeft | Key::ShiftRight => Some(CGEventFlags::MaskShift),
        Key::ControlLeft | Key::ControlRight => Some(CGEventFlags::MaskControl),
        Key::AltLeft | Key::AltRight => Some(CGEventFlags::MaskAlternate),
        Key::MetaLeft | Key::MetaRight => Some(CGEventFlags::MaskCommand),
        Key::CapsLock => Some(CGEventFlags::MaskAlphaShift),
        _ => None,
    }
}

unsafe fn keycode_of(cg_event: NonNull<CGEvent>) -> u32 {
    CGEvent::integer_value_field(Some(cg_event.as_ref()), CGEventField::KeyboardEventKeycode)
        as u32
}

/// Translate one tap event into core transitions.
unsafe fn handle_event(core: &HookCore, event_type: CGEventType, cg_event: NonNull<CGEvent>) {
    match event_type {
        CGEventType::KeyDown => {
            let code = keycode_of(cg_event);
            core.emit_key(keymap::from_platform_code(code, Platform::MacOs), true);
        }

        CGEventType::KeyUp => {
            let code = keycode_of(cg_event);
            core.emit_key(keymap::from_platform_code(code, Platform::MacOs), false);
        }

        CGEventType::FlagsChanged => {
            // Modifier keys never produce KeyDown/KeyUp on macOS; derive the
            // edge from the flag bit of the key's modifier group. When both
            // keys of one group are held, releasing only one keeps the group
            // bit set and that edge is unobservable from flags alone.
            let key = keymap::from_platform_code(keycode_of(cg_event), Platform::MacOs);
            let flags = CGEvent::flags(Some(cg_event.as_ref()));
            let previous = LAST_FLAGS.with(|last| last.replace(flags));
            if let Some(mask) = modifier_flag(key) {
                let was_down = previous.contains(mask);
                let is_down = flags.contains(mask);
                if was_down != is_down {
                    core.emit_key(key, is_down);
                }
            }
        }

        CGEventType::LeftMouseDown => core.emit_button(MouseButton::Left, true),
        CGEventType::LeftMouseUp => core.emit_button(MouseButton::Left, false),
        CGEventType::RightMouseDown => core.emit_button(MouseButton::Right, true),
        CGEventType::RightMouseUp => core.emit_button(MouseButton::Right, false),

        CGEventType::OtherMouseDown | CGEventType::OtherMouseUp => {
            let number = CGEvent::integer_value_field(
                Some(cg_event.as_ref()),
                CGEventField::MouseEventButtonNumber,
            );
            if let Some(button) = keymap::button_from_platform_code(number as u32, Platform::MacOs)
            {
                core.emit_button(button, event_type == CGEventType::OtherMouseDown);
            }
        }

        CGEventType::ScrollWheel => {
            let delta = CGEvent::integer_value_field(
                Some(cg_event.as_ref()),
                CGEventField::ScrollWheelEventDeltaAxis1,
            );
            if delta != 0 {
                // A wheel tick has no release event; surface it as a press
                // immediately followed by a release.
                let tick = if delta > 0 {
                    MouseButton::WheelUp
                } else {
                    MouseButton::WheelDown
                };
                core.emit_button(tick, true);
                core.emit_button(tick, false);
            }
        }

        _ => {}
    }
}

/// The CGEventTap callback
unsafe extern "C-unwind" fn event_callback(
    _proxy: CGEventTapProxy,
    event_type: CGEventType,
    cg_event: NonNull<CGEvent>,
    _user_info: *mut c_void,
) -> *mut CGEvent {
    // Re-enable the tap if the OS disabled it, or the hook dies silently.
    if event_type == CGEventType::TapDisabledByTimeout
        || event_type == CGEventType::TapDisabledByUserInput
    {
        ACTIVE_TAP.with(|tap| {
            let ptr = tap.get();
            if !ptr.is_null() {
                log::warn!("event tap was disabled (timeout or user input), re-enabling");
                CGEvent::tap_enable(&*ptr, true);
            }
        });
        return cg_event.as_ptr();
    }

    let keep_running = ACTIVE_CORE.with(|cell| match cell.borrow().as_ref() {
        Some(core) if core.is_running() => {
            handle_event(core, event_type, cg_event);
            true
        }
        _ => false,
    });

    if !keep_running {
        if let Some(run_loop) = CFRunLoop::current() {
            run_loop.stop();
        }
    }

    cg_event.as_ptr()
}

fn fail(ready: &Sender<Result<()>>, error: Error) {
    ACTIVE_TAP.with(|cell| cell.set(null()));
    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = None);
    let _ = ready.send(Err(error));
}

/// Run the capture loop. Blocks on this thread until stopped.
pub(crate) fn run_capture(core: Arc<HookCore>, ready: Sender<Result<()>>) {
    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = Some(core.clone()));
    LAST_FLAGS.with(|last| last.set(CGEventFlags(0)));

    unsafe {
        let _pool = NSAutoreleasePool::new();

        let callback: CGEventTapCallBack = Some(event_callback);
        let tap = match CGEvent::tap_create(
            CGEventTapLocation::HIDEventTap,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::ListenOnly,
            kCGEventMaskForAllEvents.into(),
            callback,
            null_mut(),
        ) {
            Some(tap) => tap,
            None => {
                fail(
                    &ready,
                    Error::CaptureInit(
                        "failed to create event tap; grant Accessibility permission \
                         (System Settings > Privacy & Security > Accessibility) and restart"
                            .into(),
                    ),
                );
                return;
            }
        };

        ACTIVE_TAP.with(|cell| cell.set(&*tap as *const CFMachPort));

        let source = match CFMachPort::new_run_loop_source(None, Some(&tap), 0) {
            Some(source) => source,
            None => {
                fail(
                    &ready,
                    Error::CaptureInit("failed to create run loop source".into()),
                );
                return;
            }
        };

        let current_loop = match CFRunLoop::current() {
            Some(run_loop) => run_loop,
            None => {
                fail(
                    &ready,
                    Error::CaptureInit("failed to get current run loop".into()),
                );
                return;
            }
        };

        current_loop.add_source(Some(&source), kCFRunLoopCommonModes);
        CGEvent::tap_enable(&tap, true);

        core.set_native(NativeStop {
            run_loop: RunLoopPtr(&*current_loop as *const CFRunLoop),
        });
        let _ = ready.send(Ok(()));

        CFRunLoop::run();

        CGEvent::tap_enable(&tap, false);
    }

    ACTIVE_TAP.with(|cell| cell.set(null()));
    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = None);
    log::debug!("macos capture loop exited");
}

/// Ask the capture thread's run loop to stop.
pub(crate) fn stop_capture(core: &HookCore) -> Result<()> {
    if let Some(stop) = core.take_native() {
        if !stop.run_loop.0.is_null() {
            unsafe { (*stop.run_loop.0).stop() };
        }
    }
    Ok(())
}
