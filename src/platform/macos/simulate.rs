//! macOS event injection using CGEvent.

#![allow(unused_unsafe)]

use crate::error::{Error, Result};
use crate::keycode::{Key, MouseButton};
use crate::keymap::{self, Platform};
use objc2_core_foundation::CGPoint;
use objc2_core_graphics::{
    CGEvent, CGEventField, CGEventFlags, CGEventSource, CGEventSourceStateID, CGEventTapLocation,
    CGEventType, CGMouseButton, CGScrollEventUnit,
};
use std::sync::Mutex;

/// Modifier flags accumulated by synthetic presses, so a combo like
/// Command+L carries the Command flag on the L events.
static SIM_FLAGS: Mutex<CGEventFlags> = Mutex::new(CGEventFlags(0));

fn event_source() -> Result<objc2_core_foundation::CFRetained<CGEventSource>> {
    unsafe { CGEventSource::new(CGEventSourceStateID::HIDSystemState) }
        .ok_or_else(|| Error::Injection("failed to create event source".into()))
}

/// Get current mouse location
fn current_mouse_location() -> Result<CGPoint> {
    unsafe {
        let source = event_source()?;
        let event = CGEvent::new(Some(&source))
            .ok_or_else(|| Error::Injection("failed to create event".into()))?;
        Ok(CGEvent::location(Some(&event)))
    }
}

fn update_sim_flags(key: Key, down: bool) -> CGEventFlags {
    let mut flags = SIM_FLAGS.lock().unwrap_or_else(|e| e.into_inner());
    let mask = match key {
        Key::ShiftLeft | Key::ShiftRight => Some(CGEventFlags::MaskShift),
        Key::ControlLeft | Key::ControlRight => Some(CGEventFlags::MaskControl),
        Key::AltLeft | Key::AltRight => Some(CGEventFlags::MaskAlternate),
        Key::MetaLeft | Key::MetaRight => Some(CGEventFlags::MaskCommand),
        _ => None,
    };
    if let Some(mask) = mask {
        if down {
            flags.insert(mask);
        } else {
            flags.remove(mask);
        }
    }
    *flags
}

/// Synthesize one key transition.
///
/// Modifier keys must travel as FlagsChanged events or the system ignores
/// them; regular keys are plain keyboard events carrying the accumulated
/// modifier flags.
pub(crate) fn key_event(key: Key, down: bool) -> Result<()> {
    if !keymap::has_platform_code(key, Platform::MacOs) {
        return Err(Error::Injection(format!("no macOS keycode for {key:?}")));
    }
    let code = keymap::to_platform_code(key, Platform::MacOs) as u16;
    let flags = update_sim_flags(key, down);

    unsafe {
        let source = event_source()?;

        if key.is_modifier() {
            let event = CGEvent::new(Some(&source))
                .ok_or_else(|| Error::Injection("failed to create event".into()))?;
            CGEvent::set_type(Some(&event), CGEventType::FlagsChanged);
            CGEvent::set_integer_value_field(
                Some(&event),
                CGEventField::KeyboardEventKeycode,
                code as i64,
            );
            CGEvent::set_flags(Some(&event), flags);
            CGEvent::post(CGEventTapLocation::HIDEventTap, Some(&event));
        } else {
            let event = CGEvent::new_keyboard_event(Some(&source), code, down)
                .ok_or_else(|| Error::Injection("failed to create keyboard event".into()))?;
            CGEvent::set_flags(Some(&event), flags);
            CGEvent::post(CGEventTapLocation::HIDEventTap, Some(&event));
        }
    }
    Ok(())
}

fn button_event_type(button: MouseButton, down: bool) -> CGEventType {
    match (button, down) {
        (MouseButton::Left, true) => CGEventType::LeftMouseDown,
        (MouseButton::Left, false) => CGEventType::LeftMouseUp,
        (MouseButton::Right, true) => CGEventType::RightMouseDown,
        (MouseButton::Right, false) => CGEventType::RightMouseUp,
        (_, true) => CGEventType::OtherMouseDown,
        (_, false) => CGEventType::OtherMouseUp,
    }
}

fn cg_button(button: MouseButton) -> CGMouseButton {
    match button {
        MouseButton::Left => CGMouseButton::Left,
        MouseButton::Right => CGMouseButton::Right,
        _ => CGMouseButton::Center,
    }
}

/// Synthesize one button transition.
///
/// Wheel ticks are scroll events on macOS: the press posts one line of
/// scroll and the release is a no-op.
pub(crate) fn button_event(button: MouseButton, down: bool) -> Result<()> {
    match button {
        MouseButton::WheelUp => return wheel_tick(1, down),
        MouseButton::WheelDown => return wheel_tick(-1, down),
        _ => {}
    }

    let point = current_mouse_location()?;
    unsafe {
        let source = event_source()?;
        let event = CGEvent::new_mouse_event(
            Some(&source),
            button_event_type(button, down),
            point,
            cg_button(button),
        )
        .ok_or_else(|| Error::Injection("failed to create mouse event".into()))?;

        // OtherMouse events carry the button number explicitly.
        if !matches!(button, MouseButton::Left | MouseButton::Right) {
            CGEvent::set_integer_value_field(
                Some(&event),
                CGEventField::MouseEventButtonNumber,
                keymap::button_to_platform_code(button, Platform::MacOs) as i64,
            );
        }

        CGEvent::post(CGEventTapLocation::HIDEventTap, Some(&event));
    }
    Ok(())
}

fn wheel_tick(delta: i32, down: bool) -> Result<()> {
    if !down {
        return Ok(());
    }
    unsafe {
        let source = event_source()?;
        let event = CGEvent::new_scroll_wheel_event2(
            Some(&source),
            CGScrollEventUnit::Line,
            1,
            delta,
            0,
            0,
        )
        .ok_or_else(|| Error::Injection("failed to create scroll event".into()))?;
        CGEvent::post(CGEventTapLocation::HIDEventTap, Some(&event));
    }
    Ok(())
}
