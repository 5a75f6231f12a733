//! Lattice View
//!
//! This crate binds a mutable data object to a tree of nodes. Reading a
//! template expression while compiling records which data keys it depends
//! on; writing one of those keys later re-renders exactly the fragments that
//! depend on it, without re-scanning the tree.
//!
//! It implements:
//!
//! - Reactive data objects with dependency tracking
//! - A directive compiler (`v-model`, `v-text`, `v-on:event` / `@event`,
//!   and `{{ }}` interpolation)
//! - An in-memory node tree to mount against
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `reactive`: observed objects, reactive fields, watchers
//! - `compile`: tree walk, directive routines, interpolation templates
//! - `dom`: the host node interface and an in-memory implementation
//! - `app`: mounting, and property access on the mounted app
//!
//! Everything runs synchronously on one thread. A write returns after every
//! affected binding has been updated.
//!
//! # Example
//!
//! ```rust,ignore
//! use lattice_view::{App, AppOptions, MemoryNode, Object};
//!
//! let greeting = MemoryNode::text("Hello {{ name }}!");
//! let root = MemoryNode::element("div").child(greeting.clone());
//!
//! let app = App::new(AppOptions::new(root, Object::from_json(r#"{ "name": "A" }"#)?))?;
//! assert_eq!(greeting.text_content(), "Hello A!");
//!
//! app.set("name", "B")?;
//! assert_eq!(greeting.text_content(), "Hello B!");
//! ```

pub mod app;
pub mod compile;
pub mod config;
pub mod dom;
pub mod error;
pub mod reactive;

pub use app::{App, AppOptions, Mount};
pub use compile::{Compiler, Directive, Methods};
pub use config::Syntax;
pub use dom::{DomNode, Event, MemoryNode};
pub use error::{Result, ViewError};
pub use reactive::{Object, Observer, Value, Watcher};
