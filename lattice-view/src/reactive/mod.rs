//! Reactive Data
//!
//! This module implements the data side of the view layer: observed
//! objects, their reactive fields, and the watchers that depend on them.
//!
//! # Concepts
//!
//! ## Objects and fields
//!
//! Data lives in [`Object`]s. An [`Observer`] intercepts every field of an
//! object (recursively), turning each into a reactive cell with its own
//! subscription list.
//!
//! ## Watchers
//!
//! A [`Watcher`] binds one top-level key to a callback. When it is created
//! it reads its key once inside a [`ReactiveContext`]; the field sees the
//! current watcher and subscribes it. From then on every write to that field
//! updates the watcher, and the watcher runs its callback if the value
//! actually changed.
//!
//! # Implementation Notes
//!
//! Everything here is single-threaded and synchronous. A write returns only
//! after every affected watcher (and anything those watchers wrote in turn)
//! has run. Handles are `Rc`-based and not `Send`.

mod value;
mod object;
mod field;
mod dep;
mod context;
mod subscriber;
mod hook;

pub use value::Value;
pub use object::{Object, WeakObject, Observer};
pub use context::ReactiveContext;
pub use subscriber::{Watcher, WatcherId};
pub use hook::{AccessHook, NoopHook, TracingHook};
