//! Subscription lists.
//!
//! One [`Dep`] lives inside every reactive field. It only ever grows:
//! watchers are appended when they read the field and are never removed.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use super::context::ReactiveContext;
use super::subscriber::Watcher;

/// Most fields are bound once or twice.
type Subscribers = SmallVec<[Rc<Watcher>; 2]>;

/// The watchers interested in one reactive field.
#[derive(Default)]
pub(crate) struct Dep {
    subscribers: RefCell<Subscribers>,
}

impl Dep {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a watcher. Duplicates are kept and notified once per entry.
    pub(crate) fn add(&self, watcher: Rc<Watcher>) {
        self.subscribers.borrow_mut().push(watcher);
    }

    /// Register the current watcher, if one is collecting dependencies.
    pub(crate) fn depend(&self) {
        if let Some(watcher) = ReactiveContext::current() {
            self.add(watcher);
        }
    }

    /// Update every watcher in registration order.
    ///
    /// Iterates over a snapshot, so watchers registered while notifying are
    /// not updated by this call.
    pub(crate) fn notify(&self) {
        let snapshot: Subscribers = self.subscribers.borrow().clone();
        for watcher in snapshot {
            watcher.update();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
