//! macOS CGKeyCode table.
//!
//! Reference: `kVK_*` constants from Carbon's Events.h (ANSI layout). macOS
//! has no virtual keycodes for media, browser or power keys (those travel as
//! NX system-defined events), so they resolve to the unmapped sentinel here.

use crate::keycode::{Key, MouseButton};

/// Logical key to CGKeyCode, in stable declaration order.
pub(super) const KEY_CODES: &[(Key, u32)] = &[
    // Letters
    (Key::KeyA, 0),
    (Key::KeyB, 11),
    (Key::KeyC, 8),
    (Key::KeyD, 2),
    (Key::KeyE, 14),
    (Key::KeyF, 3),
    (Key::KeyG, 5),
    (Key::KeyH, 4),
    (Key::KeyI, 34),
    (Key::KeyJ, 38),
    (Key::KeyK, 40),
    (Key::KeyL, 37),
    (Key::KeyM, 46),
    (Key::KeyN, 45),
    (Key::KeyO, 31),
    (Key::KeyP, 35),
    (Key::KeyQ, 12),
    (Key::KeyR, 15),
    (Key::KeyS, 1),
    (Key::KeyT, 17),
    (Key::KeyU, 32),
    (Key::KeyV, 9),
    (Key::KeyW, 13),
    (Key::KeyX, 7),
    (Key::KeyY, 16),
    (Key::KeyZ, 6),
    // Numbers (top row)
    (Key::Num0, 29),
    (Key::Num1, 18),
    (Key::Num2, 19),
    (Key::Num3, 20),
    (Key::Num4, 21),
    (Key::Num5, 23),
    (Key::Num6, 22),
    (Key::Num7, 26),
    (Key::Num8, 28),
    (Key::Num9, 25),
    // Function keys
    (Key::F1, 122),
    (Key::F2, 120),
    (Key::F3, 99),
    (Key::F4, 118),
    (Key::F5, 96),
    (Key::F6, 97),
    (Key::F7, 98),
    (Key::F8, 100),
    (Key::F9, 101),
    (Key::F10, 109),
    (Key::F11, 103),
    (Key::F12, 111),
    (Key::F13, 105),
    (Key::F14, 107),
    (Key::F15, 113),
    (Key::F16, 106),
    (Key::F17, 64),
    (Key::F18, 79),
    (Key::F19, 80),
    (Key::F20, 90),
    // Modifiers
    (Key::ShiftLeft, 56),
    (Key::ShiftRight, 60),
    (Key::ControlLeft, 59),
    (Key::ControlRight, 62),
    (Key::AltLeft, 58),
    (Key::AltRight, 61),
    (Key::MetaLeft, 55),
    (Key::MetaRight, 54),
    // Navigation
    (Key::Escape, 53),
    (Key::Tab, 48),
    (Key::CapsLock, 57),
    (Key::Space, 49),
    (Key::Enter, 36),
    (Key::Backspace, 51),
    (Key::Insert, 114), // kVK_Help on older keyboards
    (Key::Delete, 117),
    (Key::Home, 115),
    (Key::End, 119),
    (Key::PageUp, 116),
    (Key::PageDown, 121),
    (Key::ArrowUp, 126),
    (Key::ArrowDown, 125),
    (Key::ArrowLeft, 123),
    (Key::ArrowRight, 124),
    // Lock keys
    (Key::NumLock, 71), // kVK_ANSI_KeypadClear
    // Punctuation
    (Key::Grave, 50),
    (Key::Minus, 27),
    (Key::Equal, 24),
    (Key::BracketLeft, 33),
    (Key::BracketRight, 30),
    (Key::Backslash, 42),
    (Key::Semicolon, 41),
    (Key::Quote, 39),
    (Key::Comma, 43),
    (Key::Period, 47),
    (Key::Slash, 44),
    (Key::IntlBackslash, 10), // kVK_ISO_Section
    // Numpad
    (Key::Numpad0, 82),
    (Key::Numpad1, 83),
    (Key::Numpad2, 84),
    (Key::Numpad3, 85),
    (Key::Numpad4, 86),
    (Key::Numpad5, 87),
    (Key::Numpad6, 88),
    (Key::Numpad7, 89),
    (Key::Numpad8, 91),
    (Key::Numpad9, 92),
    (Key::NumpadAdd, 69),
    (Key::NumpadSubtract, 78),
    (Key::NumpadMultiply, 67),
    (Key::NumpadDivide, 75),
    (Key::NumpadDecimal, 65),
    (Key::NumpadSeparator, 95), // kVK_JIS_KeypadComma
    (Key::NumpadEnter, 76),
    // Media keys with CGKeyCode equivalents
    (Key::VolumeUp, 72),
    (Key::VolumeDown, 73),
    (Key::VolumeMute, 74),
    // Misc
    (Key::ContextMenu, 110),
];

/// CGEvent mouse button numbers. Wheel ticks are scroll events on macOS and
/// have no button number.
pub(super) const BUTTON_CODES: &[(MouseButton, u32)] = &[
    (MouseButton::Left, 0),
    (MouseButton::Right, 1),
    (MouseButton::Middle, 2),
    (MouseButton::X1, 3),
    (MouseButton::X2, 4),
];
