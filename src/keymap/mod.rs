//! Native key/button code translation tables.
//!
//! Each platform submodule carries one `const` table per direction-free
//! mapping: an ordered slice of `(logical identity, native code)` pairs.
//! The tables are built at compile time and shared read-only by every hook,
//! so no locking is ever required.
//!
//! Lookup semantics:
//!
//! - Forward ([`to_platform_code`]) is total: a key the platform cannot
//!   express yields [`UNMAPPED`].
//! - Reverse ([`from_platform_code`]) is partial: an unknown native code
//!   yields [`Key::None`] and never fails. The scan walks the table in
//!   declaration order and returns the first match, so when a code is shared
//!   the earliest table entry wins. This matters on macOS, where CGKeyCode 0
//!   (the letter A) collides with the [`UNMAPPED`] sentinel: reverse lookup
//!   of 0 there yields `Key::KeyA`. Known limitation, kept deterministic
//!   rather than hidden.

mod linux_x11;
mod macos_cg;
mod windows_vk;

use crate::keycode::{Key, MouseButton};

/// Sentinel native code for "this platform has no equivalent".
pub const UNMAPPED: u32 = 0;

/// The operating systems the registry carries tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// The platform this process is running on.
    #[cfg(target_os = "windows")]
    pub fn current() -> Platform {
        Platform::Windows
    }

    /// The platform this process is running on.
    #[cfg(target_os = "linux")]
    pub fn current() -> Platform {
        Platform::Linux
    }

    /// The platform this process is running on.
    #[cfg(target_os = "macos")]
    pub fn current() -> Platform {
        Platform::MacOs
    }

    fn key_table(self) -> &'static [(Key, u32)] {
        match self {
            Platform::Windows => windows_vk::KEY_CODES,
            Platform::Linux => linux_x11::KEY_CODES,
            Platform::MacOs => macos_cg::KEY_CODES,
        }
    }

    fn button_table(self) -> &'static [(MouseButton, u32)] {
        match self {
            Platform::Windows => windows_vk::BUTTON_CODES,
            Platform::Linux => linux_x11::BUTTON_CODES,
            Platform::MacOs => macos_cg::BUTTON_CODES,
        }
    }
}

/// Translate a logical key to the platform's native code.
///
/// Returns [`UNMAPPED`] when the platform has no equivalent (including for
/// [`Key::None`] itself).
pub fn to_platform_code(key: Key, platform: Platform) -> u32 {
    platform
        .key_table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, code)| *code)
        .unwrap_or(UNMAPPED)
}

/// Whether the platform has a native code for this key.
///
/// The injection paths use this instead of comparing against [`UNMAPPED`],
/// because on macOS the letter A legitimately maps to code 0.
pub fn has_platform_code(key: Key, platform: Platform) -> bool {
    platform.key_table().iter().any(|(k, _)| *k == key)
}

/// Translate a native code back to a logical key.
///
/// Returns [`Key::None`] for codes with no mapping; never fails.
pub fn from_platform_code(code: u32, platform: Platform) -> Key {
    platform
        .key_table()
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(k, _)| *k)
        .unwrap_or(Key::None)
}

/// Translate a logical mouse button to the platform's native code.
///
/// Returns [`UNMAPPED`] for buttons the platform does not express as codes
/// (e.g. wheel ticks on Windows, which are message/flag based).
pub fn button_to_platform_code(button: MouseButton, platform: Platform) -> u32 {
    platform
        .button_table()
        .iter()
        .find(|(b, _)| *b == button)
        .map(|(_, code)| *code)
        .unwrap_or(UNMAPPED)
}

/// Translate a native button code back to a logical mouse button.
pub fn button_from_platform_code(code: u32, platform: Platform) -> Option<MouseButton> {
    platform
        .button_table()
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(b, _)| *b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PLATFORMS: [Platform; 3] = [Platform::Windows, Platform::Linux, Platform::MacOs];

    #[test]
    fn roundtrip_every_mapped_key() {
        for platform in ALL_PLATFORMS {
            for &(key, code) in platform.key_table() {
                assert_eq!(
                    from_platform_code(code, platform),
                    key,
                    "roundtrip failed for {key:?} (code {code:#x}) on {platform:?}"
                );
                assert_eq!(to_platform_code(key, platform), code);
            }
        }
    }

    #[test]
    fn tables_have_no_duplicate_entries() {
        for platform in ALL_PLATFORMS {
            let table = platform.key_table();
            for (i, &(key, code)) in table.iter().enumerate() {
                for &(other_key, other_code) in &table[i + 1..] {
                    assert_ne!(key, other_key, "{key:?} listed twice on {platform:?}");
                    assert_ne!(
                        code, other_code,
                        "code {code:#x} reused on {platform:?} by {key:?} and {other_key:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn unknown_code_maps_to_none() {
        for platform in ALL_PLATFORMS {
            assert_eq!(from_platform_code(0xDEAD_BEEF, platform), Key::None);
        }
        // Windows and Linux never assign the sentinel value to a real key.
        assert_eq!(from_platform_code(UNMAPPED, Platform::Windows), Key::None);
        assert_eq!(from_platform_code(UNMAPPED, Platform::Linux), Key::None);
    }

    #[test]
    fn macos_sentinel_collision_resolves_to_first_entry() {
        // CGKeyCode 0 is the letter A, which shares the value of UNMAPPED.
        // First-match order makes the resolution deterministic.
        assert_eq!(from_platform_code(0, Platform::MacOs), Key::KeyA);
    }

    #[test]
    fn unmapped_key_yields_sentinel() {
        // Wake has no macOS virtual keycode.
        assert_eq!(to_platform_code(Key::Wake, Platform::MacOs), UNMAPPED);
        assert_eq!(to_platform_code(Key::None, Platform::Windows), UNMAPPED);
        assert!(!has_platform_code(Key::Wake, Platform::MacOs));
        assert!(!has_platform_code(Key::None, Platform::Windows));
        // Letter A maps to the sentinel value on macOS but is genuinely mapped.
        assert!(has_platform_code(Key::KeyA, Platform::MacOs));
    }

    #[test]
    fn windows_vk_0x41_is_letter_a() {
        assert_eq!(from_platform_code(0x41, Platform::Windows), Key::KeyA);
        assert_eq!(to_platform_code(Key::KeyA, Platform::Windows), 0x41);
    }

    #[test]
    fn button_roundtrip() {
        for platform in ALL_PLATFORMS {
            for &(button, code) in platform.button_table() {
                assert_eq!(button_from_platform_code(code, platform), Some(button));
                assert_eq!(button_to_platform_code(button, platform), code);
            }
        }
    }

    #[test]
    fn wheel_has_no_windows_code() {
        assert_eq!(
            button_to_platform_code(MouseButton::WheelUp, Platform::Windows),
            UNMAPPED
        );
        assert_eq!(button_from_platform_code(UNMAPPED, Platform::Windows), None);
    }
}
