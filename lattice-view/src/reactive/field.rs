//! Reactive Fields
//!
//! A reactive field is the cell an intercepted object field turns into. It
//! holds the current value together with the field's subscription list.
//!
//! # How Fields Work
//!
//! 1. Reading a field while a watcher is collecting dependencies appends
//!    that watcher to the field's subscription list.
//!
//! 2. Writing a value strictly equal to the current one does nothing.
//!
//! 3. Any other write observes the new value (if it is an object), stores
//!    it, and updates every subscribed watcher before returning.
//!
//! No borrow is held while watchers run, so a watcher callback may read or
//! write this same field.

use std::cell::RefCell;
use std::rc::Rc;

use super::dep::Dep;
use super::hook::AccessHook;
use super::object::observe;
use super::value::Value;

/// An intercepted object field.
pub(crate) struct ReactiveField {
    /// Field name, reported to the access hook.
    key: Rc<str>,

    value: RefCell<Value>,

    dep: Dep,

    hook: Rc<dyn AccessHook>,
}

impl ReactiveField {
    pub(crate) fn new(key: Rc<str>, value: Value, hook: Rc<dyn AccessHook>) -> Self {
        Self {
            key,
            value: RefCell::new(value),
            dep: Dep::new(),
            hook,
        }
    }

    /// Get the current value, registering the current watcher if any.
    pub(crate) fn get(&self) -> Value {
        self.dep.depend();

        let value = self.value.borrow().clone();
        self.hook.on_get(&self.key, &value);
        value
    }

    /// Get the current value without registering anything.
    pub(crate) fn peek(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Store a new value and notify subscribers.
    pub(crate) fn set(&self, value: Value) {
        if self.value.borrow().strict_eq(&value) {
            return;
        }

        observe(&value, &self.hook);
        self.hook.on_set(&self.key, &value);
        *self.value.borrow_mut() = value;

        self.dep.notify();
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.dep.len()
    }
}
