//! Hook handle: one capture session over keyboard and mouse.
//!
//! A [`Hook`] is created already started. It owns a dedicated capture thread
//! (the sole writer of its pressed state and the only thread driving native
//! blocking primitives), per-handle observer lists, and the native capture
//! resources. Disposal is terminal: a disposed hook cannot be restarted,
//! create a new one instead.

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::inject;
use crate::keycode::{Key, MouseButton};
use crate::platform;
use crate::state::PressedState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long `dispose()` waits for the capture thread before leaking it.
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Which observer list a [`Subscription`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObserverKind {
    KeyDown,
    KeyUp,
    ButtonDown,
    ButtonUp,
}

/// Token returned by observer registration; pass to [`Hook::unsubscribe`].
#[derive(Debug)]
pub struct Subscription {
    kind: ObserverKind,
    id: u64,
}

/// Shared state between a [`Hook`] and its capture thread.
///
/// The capture backends feed transitions in through [`HookCore::emit_key`] /
/// [`HookCore::emit_button`]; both strategies (callback and polling) reduce
/// to exactly these two calls.
pub(crate) struct HookCore {
    pressed: PressedState,
    key_down: Dispatcher<Key>,
    key_up: Dispatcher<Key>,
    button_down: Dispatcher<MouseButton>,
    button_up: Dispatcher<MouseButton>,
    running: AtomicBool,
    disposed: AtomicBool,
    native: Mutex<Option<platform::NativeStop>>,
}

impl HookCore {
    pub(crate) fn new() -> Self {
        Self {
            pressed: PressedState::new(),
            key_down: Dispatcher::new(),
            key_up: Dispatcher::new(),
            button_down: Dispatcher::new(),
            button_up: Dispatcher::new(),
            running: AtomicBool::new(true),
            disposed: AtomicBool::new(false),
            native: Mutex::new(None),
        }
    }

    /// Whether the capture loop should keep going. Checked cooperatively by
    /// every backend.
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Record a key transition: state first, then dispatch, so observers that
    /// query the snapshot already see the transition they are handling.
    pub(crate) fn emit_key(&self, key: Key, pressed: bool) {
        self.pressed.apply_key(key, pressed);
        if pressed {
            self.key_down.emit(key);
        } else {
            self.key_up.emit(key);
        }
    }

    /// Record a button transition; same ordering contract as [`emit_key`].
    ///
    /// [`emit_key`]: HookCore::emit_key
    pub(crate) fn emit_button(&self, button: MouseButton, pressed: bool) {
        self.pressed.apply_button(button, pressed);
        if pressed {
            self.button_down.emit(button);
        } else {
            self.button_up.emit(button);
        }
    }

    /// Store the platform teardown handle. Called once by the capture thread
    /// during setup, before readiness is signaled.
    pub(crate) fn set_native(&self, stop: platform::NativeStop) {
        *self.native.lock().unwrap_or_else(|e| e.into_inner()) = Some(stop);
    }

    /// Take the platform teardown handle, leaving `None`.
    pub(crate) fn take_native(&self) -> Option<platform::NativeStop> {
        self.native.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// Flip the disposed flag; true if this call was the one that flipped it.
    fn mark_disposed(&self) -> bool {
        !self.disposed.swap(true, Ordering::SeqCst)
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

/// An active global input capture session.
pub struct Hook {
    core: Arc<HookCore>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Hook {
    /// Create a hook for the host platform and start capturing.
    ///
    /// Spawns the capture thread and blocks until it has either acquired its
    /// native resources or failed; acquisition failures surface here as
    /// [`Error::CaptureInit`] (with a remediation hint where one is known)
    /// and are never retried.
    pub fn create() -> Result<Hook> {
        let core = Arc::new(HookCore::new());
        let thread_core = core.clone();
        let (ready_tx, ready_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("inputhook-capture".into())
            .spawn(move || platform::run_capture(thread_core, ready_tx))
            .map_err(|e| Error::Thread(format!("failed to spawn capture thread: {e}")))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                log::debug!("input hook started");
                Ok(Hook {
                    core,
                    thread: Mutex::new(Some(handle)),
                })
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(Error::CaptureInit(
                    "capture thread exited before signaling readiness".into(),
                ))
            }
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.core.is_disposed() {
            Err(Error::Disposed)
        } else {
            Ok(())
        }
    }

    /// Observe key presses. Observers run on the capture thread, in
    /// subscription order.
    pub fn on_key_down<F>(&self, observer: F) -> Result<Subscription>
    where
        F: Fn(Key) + Send + Sync + 'static,
    {
        self.ensure_live()?;
        Ok(Subscription {
            kind: ObserverKind::KeyDown,
            id: self.core.key_down.subscribe(Box::new(observer)),
        })
    }

    /// Observe key releases.
    pub fn on_key_up<F>(&self, observer: F) -> Result<Subscription>
    where
        F: Fn(Key) + Send + Sync + 'static,
    {
        self.ensure_live()?;
        Ok(Subscription {
            kind: ObserverKind::KeyUp,
            id: self.core.key_up.subscribe(Box::new(observer)),
        })
    }

    /// Observe mouse button presses.
    pub fn on_button_down<F>(&self, observer: F) -> Result<Subscription>
    where
        F: Fn(MouseButton) + Send + Sync + 'static,
    {
        self.ensure_live()?;
        Ok(Subscription {
            kind: ObserverKind::ButtonDown,
            id: self.core.button_down.subscribe(Box::new(observer)),
        })
    }

    /// Observe mouse button releases.
    pub fn on_button_up<F>(&self, observer: F) -> Result<Subscription>
    where
        F: Fn(MouseButton) + Send + Sync + 'static,
    {
        self.ensure_live()?;
        Ok(Subscription {
            kind: ObserverKind::ButtonUp,
            id: self.core.button_up.subscribe(Box::new(observer)),
        })
    }

    /// Remove an observer. Removing one that is already gone is a no-op.
    pub fn unsubscribe(&self, subscription: Subscription) -> Result<()> {
        self.ensure_live()?;
        let dispatcher_removed = match subscription.kind {
            ObserverKind::KeyDown => self.core.key_down.unsubscribe(subscription.id),
            ObserverKind::KeyUp => self.core.key_up.unsubscribe(subscription.id),
            ObserverKind::ButtonDown => self.core.button_down.unsubscribe(subscription.id),
            ObserverKind::ButtonUp => self.core.button_up.unsubscribe(subscription.id),
        };
        if !dispatcher_removed {
            log::debug!("unsubscribe for observer {} found nothing", subscription.id);
        }
        Ok(())
    }

    /// Snapshot of the currently-down keys. Safe from any thread.
    pub fn pressed_keys(&self) -> Result<Vec<Key>> {
        self.ensure_live()?;
        Ok(self.core.pressed.keys_snapshot())
    }

    /// Snapshot of the currently-down mouse buttons. Safe from any thread.
    pub fn pressed_buttons(&self) -> Result<Vec<MouseButton>> {
        self.ensure_live()?;
        Ok(self.core.pressed.buttons_snapshot())
    }

    /// Synthesize a key press immediately followed by a release.
    pub fn send_key(&self, key: Key) -> Result<()> {
        self.ensure_live()?;
        inject::tap(key, platform::key_event)
    }

    /// Synthesize a key combination: press every key in the given order,
    /// then release them last-pressed-first.
    pub fn send_key_combo(&self, keys: &[Key]) -> Result<()> {
        self.ensure_live()?;
        inject::combo(keys, platform::key_event)
    }

    /// Synthesize a button press immediately followed by a release.
    pub fn send_button(&self, button: MouseButton) -> Result<()> {
        self.ensure_live()?;
        inject::tap(button, platform::button_event)
    }

    /// Synthesize a button combination with the same ordering contract as
    /// [`Hook::send_key_combo`].
    pub fn send_button_combo(&self, buttons: &[MouseButton]) -> Result<()> {
        self.ensure_live()?;
        inject::combo(buttons, platform::button_event)
    }

    /// Whether this hook has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.core.is_disposed()
    }

    /// Tear down the capture thread and native resources.
    ///
    /// Idempotent and infallible: the first call does the work, later calls
    /// are no-ops, and internal failures are logged rather than raised. The
    /// capture thread is asked to exit cooperatively and joined for up to
    /// one second; if it does not exit in time it is leaked, never killed.
    pub fn dispose(&self) {
        if !self.core.mark_disposed() {
            return;
        }
        log::debug!("disposing input hook");
        self.core.running.store(false, Ordering::SeqCst);

        if let Err(e) = platform::stop_capture(&self.core) {
            log::warn!("best-effort capture stop failed: {e}");
        }

        let handle = self
            .thread
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            let deadline = Instant::now() + JOIN_TIMEOUT;
            while !handle.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
            if handle.is_finished() {
                if handle.join().is_err() {
                    log::warn!("capture thread panicked during shutdown");
                }
            } else {
                // Forcibly terminating a thread is unsound; leaking it is the
                // accepted fallback.
                log::warn!("capture thread did not exit within {JOIN_TIMEOUT:?}; leaking it");
            }
        }
    }
}

impl Drop for Hook {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
impl Hook {
    /// A hook with no capture thread, for exercising the platform-free parts.
    pub(crate) fn detached() -> Hook {
        Hook {
            core: Arc::new(HookCore::new()),
            thread: Mutex::new(None),
        }
    }

    pub(crate) fn test_emit_key(&self, key: Key, pressed: bool) {
        self.core.emit_key(key, pressed);
    }

    pub(crate) fn test_emit_button(&self, button: MouseButton, pressed: bool) {
        self.core.emit_button(button, pressed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached_hook() -> Hook {
        Hook::detached()
    }

    #[test]
    fn emit_updates_state_before_dispatch() {
        let core = Arc::new(HookCore::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let observer_core = core.clone();
            let seen = seen.clone();
            core.key_down.subscribe(Box::new(move |key| {
                // The snapshot must already contain the key being delivered.
                let snapshot = observer_core.pressed.keys_snapshot();
                seen.lock().unwrap().push((key, snapshot.contains(&key)));
            }));
        }

        core.emit_key(Key::KeyA, true);
        assert_eq!(*seen.lock().unwrap(), vec![(Key::KeyA, true)]);
    }

    #[test]
    fn key_up_removes_from_snapshot() {
        let core = HookCore::new();
        core.emit_key(Key::KeyA, true);
        core.emit_key(Key::KeyB, true);
        core.emit_key(Key::KeyA, false);
        assert_eq!(core.pressed.keys_snapshot(), vec![Key::KeyB]);
    }

    #[test]
    fn dispose_twice_is_a_no_op() {
        let hook = detached_hook();
        hook.dispose();
        assert!(hook.is_disposed());
        hook.dispose(); // must neither panic nor error
        assert!(hook.is_disposed());
    }

    #[test]
    fn disposed_hook_rejects_usage() {
        let hook = detached_hook();
        hook.dispose();

        assert!(matches!(hook.pressed_keys(), Err(Error::Disposed)));
        assert!(matches!(hook.pressed_buttons(), Err(Error::Disposed)));
        assert!(matches!(hook.send_key(Key::KeyA), Err(Error::Disposed)));
        assert!(matches!(
            hook.send_key_combo(&[Key::ControlLeft, Key::KeyC]),
            Err(Error::Disposed)
        ));
        assert!(matches!(
            hook.send_button(MouseButton::Left),
            Err(Error::Disposed)
        ));
        assert!(matches!(
            hook.on_key_down(|_| {}),
            Err(Error::Disposed)
        ));
    }

    #[test]
    fn subscriptions_route_to_their_own_lists() {
        let hook = detached_hook();
        let downs = Arc::new(Mutex::new(Vec::new()));
        let ups = Arc::new(Mutex::new(Vec::new()));

        {
            let downs = downs.clone();
            hook.on_key_down(move |key| downs.lock().unwrap().push(key))
                .unwrap();
        }
        let up_sub = {
            let ups = ups.clone();
            hook.on_key_up(move |key| ups.lock().unwrap().push(key))
                .unwrap()
        };

        hook.core.emit_key(Key::KeyA, true);
        hook.core.emit_key(Key::KeyA, false);
        assert_eq!(*downs.lock().unwrap(), vec![Key::KeyA]);
        assert_eq!(*ups.lock().unwrap(), vec![Key::KeyA]);

        hook.unsubscribe(up_sub).unwrap();
        hook.core.emit_key(Key::KeyB, true);
        hook.core.emit_key(Key::KeyB, false);
        assert_eq!(*downs.lock().unwrap(), vec![Key::KeyA, Key::KeyB]);
        assert_eq!(*ups.lock().unwrap(), vec![Key::KeyA]);
    }

    #[test]
    fn button_transitions_reach_button_observers() {
        let hook = detached_hook();
        let log = Arc::new(Mutex::new(Vec::new()));
        {
            let log = log.clone();
            hook.on_button_down(move |b| log.lock().unwrap().push((b, true)))
                .unwrap();
        }
        {
            let log = log.clone();
            hook.on_button_up(move |b| log.lock().unwrap().push((b, false)))
                .unwrap();
        }

        hook.core.emit_button(MouseButton::Left, true);
        hook.core.emit_button(MouseButton::Left, false);
        assert_eq!(
            *log.lock().unwrap(),
            vec![(MouseButton::Left, true), (MouseButton::Left, false)]
        );
    }
}
