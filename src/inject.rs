//! Ordered synthetic-injection sequencing.
//!
//! The press/release ordering contract lives here, independent of any native
//! API: a single send is press-then-release, and a combo presses every
//! identity in the given order, then releases them in exactly reverse order
//! (last pressed, first released) — the natural modifier+key pattern. The
//! platform `simulate` modules supply the sink that issues the native calls.
//!
//! Sequencing is synchronous: the caller blocks until every native call has
//! been issued, and there is no partial-cancel path.

use crate::error::Result;

/// Press and immediately release one identity.
pub(crate) fn tap<T, F>(item: T, mut fire: F) -> Result<()>
where
    T: Copy,
    F: FnMut(T, bool) -> Result<()>,
{
    fire(item, true)?;
    fire(item, false)
}

/// Press every identity in order, then release in reverse order.
pub(crate) fn combo<T, F>(items: &[T], mut fire: F) -> Result<()>
where
    T: Copy,
    F: FnMut(T, bool) -> Result<()>,
{
    for &item in items {
        fire(item, true)?;
    }
    for &item in items.iter().rev() {
        fire(item, false)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::keycode::Key;

    fn recording_sink(log: &mut Vec<(Key, bool)>) -> impl FnMut(Key, bool) -> Result<()> + '_ {
        |key, pressed| {
            log.push((key, pressed));
            Ok(())
        }
    }

    #[test]
    fn tap_is_press_then_release() {
        let mut log = Vec::new();
        tap(Key::KeyA, recording_sink(&mut log)).unwrap();
        assert_eq!(log, vec![(Key::KeyA, true), (Key::KeyA, false)]);
    }

    #[test]
    fn combo_releases_in_reverse_order() {
        let mut log = Vec::new();
        combo(
            &[Key::KeyA, Key::KeyB, Key::KeyC],
            recording_sink(&mut log),
        )
        .unwrap();
        assert_eq!(
            log,
            vec![
                (Key::KeyA, true),
                (Key::KeyB, true),
                (Key::KeyC, true),
                (Key::KeyC, false),
                (Key::KeyB, false),
                (Key::KeyA, false),
            ]
        );
    }

    #[test]
    fn modifier_combo_wraps_the_subject_key() {
        let mut log = Vec::new();
        combo(&[Key::ControlLeft, Key::KeyL], recording_sink(&mut log)).unwrap();
        assert_eq!(
            log,
            vec![
                (Key::ControlLeft, true),
                (Key::KeyL, true),
                (Key::KeyL, false),
                (Key::ControlLeft, false),
            ]
        );
    }

    #[test]
    fn empty_combo_is_a_no_op() {
        let mut log = Vec::new();
        combo(&[], recording_sink(&mut log)).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn sink_error_propagates() {
        let mut calls = 0;
        let result = combo(&[Key::KeyA, Key::KeyB], |_key, _pressed| {
            calls += 1;
            if calls == 2 {
                Err(Error::Injection("native call failed".into()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(Error::Injection(_))));
        assert_eq!(calls, 2);
    }
}
