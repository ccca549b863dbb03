//! Logical key and mouse button identities.
//!
//! These enums are the OS-independent vocabulary of the crate. Native codes
//! never cross the public API; the [`crate::keymap`] tables translate at the
//! capture and injection boundaries.

/// OS-independent identity of a keyboard key.
///
/// `Key::None` is the "no mapping" sentinel: reverse lookups of native codes
/// with no logical equivalent produce it, and forward lookups of keys the
/// host platform cannot express map to the unmapped code sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    /// No mapping.
    None,

    // Letters
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,

    // Numbers (top row)
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    MetaLeft, // Windows/Command/Super
    MetaRight,

    // Navigation
    Escape,
    Tab,
    CapsLock,
    Space,
    Enter,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Lock keys
    NumLock,
    ScrollLock,
    PrintScreen,
    Pause,

    // Punctuation and symbols
    Grave,         // ` ~
    Minus,         // - _
    Equal,         // = +
    BracketLeft,   // [ {
    BracketRight,  // ] }
    Backslash,     // \ |
    Semicolon,     // ; :
    Quote,         // ' "
    Comma,         // , <
    Period,        // . >
    Slash,         // / ?
    IntlBackslash, // <> or \ on ISO keyboards

    // Numpad
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadDecimal,
    NumpadSeparator,
    NumpadEnter,

    // Media keys
    VolumeUp,
    VolumeDown,
    VolumeMute,
    MediaPlayPause,
    MediaStop,
    MediaNext,
    MediaPrevious,

    // Browser keys
    BrowserBack,
    BrowserForward,
    BrowserRefresh,
    BrowserStop,
    BrowserSearch,
    BrowserFavorites,
    BrowserHome,

    // Application launch keys
    LaunchMail,
    LaunchMediaSelect,
    LaunchApp1,
    LaunchApp2,

    // Context menu
    ContextMenu,

    // Power management
    Sleep,
    Wake,
}

impl Key {
    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::MetaLeft
                | Key::MetaRight
        )
    }

    /// Check if this is a letter key.
    pub fn is_letter(&self) -> bool {
        matches!(
            self,
            Key::KeyA
                | Key::KeyB
                | Key::KeyC
                | Key::KeyD
                | Key::KeyE
                | Key::KeyF
                | Key::KeyG
                | Key::KeyH
                | Key::KeyI
                | Key::KeyJ
                | Key::KeyK
                | Key::KeyL
                | Key::KeyM
                | Key::KeyN
                | Key::KeyO
                | Key::KeyP
                | Key::KeyQ
                | Key::KeyR
                | Key::KeyS
                | Key::KeyT
                | Key::KeyU
                | Key::KeyV
                | Key::KeyW
                | Key::KeyX
                | Key::KeyY
                | Key::KeyZ
        )
    }

    /// Check if this is a numpad key.
    pub fn is_numpad(&self) -> bool {
        matches!(
            self,
            Key::Numpad0
                | Key::Numpad1
                | Key::Numpad2
                | Key::Numpad3
                | Key::Numpad4
                | Key::Numpad5
                | Key::Numpad6
                | Key::Numpad7
                | Key::Numpad8
                | Key::Numpad9
                | Key::NumpadAdd
                | Key::NumpadSubtract
                | Key::NumpadMultiply
                | Key::NumpadDivide
                | Key::NumpadDecimal
                | Key::NumpadSeparator
                | Key::NumpadEnter
        )
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::None
    }
}

/// OS-independent identity of a mouse button.
///
/// Wheel ticks are modeled as buttons so they can participate in injection
/// like any other button; a captured tick surfaces as a press immediately
/// followed by a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
    /// Extra button 1 (typically back).
    X1,
    /// Extra button 2 (typically forward).
    X2,
    /// One wheel tick away from the user.
    WheelUp,
    /// One wheel tick toward the user.
    WheelDown,
}

impl MouseButton {
    /// Check if this is a wheel tick rather than a physical button.
    pub fn is_wheel(&self) -> bool {
        matches!(self, MouseButton::WheelUp | MouseButton::WheelDown)
    }
}
