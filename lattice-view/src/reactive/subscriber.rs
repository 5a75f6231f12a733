//! Watchers
//!
//! A [`Watcher`] is a live binding between one top-level data key and an
//! update callback. It is the only kind of subscriber in the system: every
//! directive the compiler encounters creates one (or, for templates, one per
//! interpolation marker).
//!
//! # Lifecycle
//!
//! 1. On construction the watcher enters the [`ReactiveContext`] and reads
//!    its key. That read is what registers it with the field's
//!    subscription list. The callback does not run.
//!
//! 2. When the field changes, the field calls [`Watcher::update`], which
//!    re-reads the key and runs the callback if the value is not strictly
//!    equal to the last one seen.
//!
//! Watchers hold the data store weakly. The store owns its watchers through
//! the subscription lists, so a strong handle here would keep the whole
//! store alive forever.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::context::ReactiveContext;
use super::object::{Object, WeakObject};
use super::value::Value;

/// Unique identifier for a watcher.
///
/// Only used to tell watchers apart in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatcherId(u64);

impl WatcherId {
    /// Generate a new unique watcher ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for WatcherId {
    fn default() -> Self {
        Self::new()
    }
}

/// A binding between a data key and an update callback.
pub struct Watcher {
    id: WatcherId,

    /// The top-level key, already trimmed.
    expr: String,

    data: WeakObject,

    callback: Box<dyn Fn(&Value)>,

    /// The value seen by the last read.
    last: RefCell<Value>,
}

impl Watcher {
    /// Bind `callback` to `data[expr]`.
    ///
    /// Whitespace around `expr` is ignored. Nested paths are not supported:
    /// `user.name` is looked up as a single key.
    pub fn new<F>(expr: &str, data: &Object, callback: F) -> Rc<Self>
    where
        F: Fn(&Value) + 'static,
    {
        let watcher = Rc::new(Self {
            id: WatcherId::new(),
            expr: expr.trim().to_string(),
            data: data.downgrade(),
            callback: Box::new(callback),
            last: RefCell::new(Value::Null),
        });

        let initial = {
            let _ctx = ReactiveContext::enter(Rc::clone(&watcher));
            data.get(&watcher.expr)
        };
        *watcher.last.borrow_mut() = initial;

        watcher
    }

    /// Get the watcher's unique ID.
    pub fn id(&self) -> WatcherId {
        self.id
    }

    /// The key this watcher reads.
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// The value seen by the most recent read.
    pub fn value(&self) -> Value {
        self.last.borrow().clone()
    }

    /// Re-read the key and run the callback if the value changed.
    ///
    /// The last-seen value is recorded before the callback runs, so a
    /// callback that writes back into the store observes a consistent
    /// watcher.
    pub fn update(&self) {
        let Some(data) = self.data.upgrade() else {
            return;
        };

        let value = data.peek(&self.expr);
        let previous = self.last.replace(value.clone());
        if previous.strict_eq(&value) {
            return;
        }

        tracing::debug!(watcher = ?self.id, expr = %self.expr, value = %value, "watcher fired");
        (self.callback)(&value);
    }
}

impl std::fmt::Debug for Watcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watcher")
            .field("id", &self.id)
            .field("expr", &self.expr)
            .field("last", &*self.last.borrow())
            .finish()
    }
}
