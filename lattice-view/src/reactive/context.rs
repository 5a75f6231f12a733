//! Reactive Context
//!
//! The reactive context records which watcher is currently reading the data
//! store. This is how a field learns who depends on it: a watcher enters the
//! context, performs its initial read, and leaves. Every reactive field read
//! in between registers that watcher.
//!
//! # Implementation
//!
//! The slot is thread-local and holds at most one watcher. Entering returns
//! a guard; dropping the guard restores whatever the slot held before
//! (normally nothing), so the slot is cleared even if the read panics.
//!
//! Reads performed outside any context, including the re-reads a watcher
//! does while updating, register nothing.

use std::cell::RefCell;
use std::rc::Rc;

use super::subscriber::Watcher;

thread_local! {
    static CURRENT: RefCell<Option<Rc<Watcher>>> = const { RefCell::new(None) };
}

/// Guard that clears the current watcher when dropped.
pub struct ReactiveContext {
    previous: Option<Rc<Watcher>>,
}

impl ReactiveContext {
    /// Make `watcher` the current watcher until the guard is dropped.
    pub fn enter(watcher: Rc<Watcher>) -> Self {
        let previous = CURRENT.with(|slot| slot.replace(Some(watcher)));
        Self { previous }
    }

    /// Check if a watcher is currently collecting dependencies.
    pub fn is_active() -> bool {
        CURRENT.with(|slot| slot.borrow().is_some())
    }

    /// Get the current watcher, if any.
    pub fn current() -> Option<Rc<Watcher>> {
        CURRENT.with(|slot| slot.borrow().clone())
    }
}

impl Drop for ReactiveContext {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| {
            *slot.borrow_mut() = previous;
        });
    }
}
