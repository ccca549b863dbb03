//! Per-hook observer lists with ordered, fault-isolated delivery.
//!
//! Delivery runs synchronously on the capture thread: for callback backends
//! this preserves ordering relative to the native event chain. A panicking
//! observer is caught and logged so it can neither kill the capture thread
//! nor starve the observers registered after it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

/// An ordered list of observers for one kind of transition.
pub(crate) struct Dispatcher<T> {
    observers: Mutex<Vec<(u64, Callback<T>)>>,
}

impl<T: Copy> Dispatcher<T> {
    pub(crate) fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Append an observer and return its removal token.
    pub(crate) fn subscribe(&self, callback: Box<dyn Fn(T) + Send + Sync>) -> u64 {
        let id = NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::from(callback)));
        id
    }

    /// Remove an observer. Returns false if the id is not in this list.
    pub(crate) fn unsubscribe(&self, id: u64) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    /// Deliver one transition to every observer, in subscription order.
    ///
    /// The list is snapshotted before delivery so an observer may subscribe
    /// or unsubscribe from inside its callback without deadlocking; such
    /// changes take effect from the next transition.
    pub(crate) fn emit(&self, value: T) {
        let observers: Vec<(u64, Callback<T>)> = self
            .observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for (id, callback) in observers {
            if panic::catch_unwind(AssertUnwindSafe(|| (*callback)(value))).is_err() {
                log::error!("input observer {id} panicked; continuing delivery");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::Key;
    use std::sync::Arc;

    #[test]
    fn delivery_follows_subscription_order() {
        let dispatcher = Dispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            dispatcher.subscribe(Box::new(move |_key: Key| {
                seen.lock().unwrap().push(tag);
            }));
        }

        dispatcher.emit(Key::KeyA);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn panicking_observer_does_not_stop_delivery() {
        let dispatcher = Dispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        {
            let seen = seen.clone();
            dispatcher.subscribe(Box::new(move |_key: Key| {
                seen.lock().unwrap().push("before");
            }));
        }
        dispatcher.subscribe(Box::new(|_key: Key| panic!("observer bug")));
        {
            let seen = seen.clone();
            dispatcher.subscribe(Box::new(move |_key: Key| {
                seen.lock().unwrap().push("after");
            }));
        }

        dispatcher.emit(Key::Escape);
        dispatcher.emit(Key::Escape);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["before", "after", "before", "after"]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery_and_is_idempotent() {
        let dispatcher = Dispatcher::new();
        let seen = Arc::new(Mutex::new(0u32));

        let id = {
            let seen = seen.clone();
            dispatcher.subscribe(Box::new(move |_key: Key| {
                *seen.lock().unwrap() += 1;
            }))
        };

        dispatcher.emit(Key::KeyA);
        assert!(dispatcher.unsubscribe(id));
        dispatcher.emit(Key::KeyA);
        assert!(!dispatcher.unsubscribe(id));

        assert_eq!(*seen.lock().unwrap(), 1);
    }
}
