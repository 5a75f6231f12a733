//! Access Hooks
//!
//! Every reactive field reports its reads and writes to an [`AccessHook`].
//! The default hook does nothing; [`TracingHook`] forwards accesses to
//! `tracing` at trace level, which is handy when chasing a binding that does
//! not update.

use super::value::Value;

/// Observer of reactive field accesses.
///
/// Hooks run synchronously inside the accessor. They must not write to the
/// data store.
pub trait AccessHook {
    /// Called after a reactive field is read.
    fn on_get(&self, _key: &str, _value: &Value) {}

    /// Called when a reactive field takes a new value, before subscribers
    /// are notified.
    fn on_set(&self, _key: &str, _value: &Value) {}
}

/// The default hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl AccessHook for NoopHook {}

/// Emits a `tracing` event for every access.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl AccessHook for TracingHook {
    fn on_get(&self, key: &str, value: &Value) {
        tracing::trace!(key, value = %value, "reactive get");
    }

    fn on_set(&self, key: &str, value: &Value) {
        tracing::trace!(key, value = %value, "reactive set");
    }
}
