//! Host Node Tree
//!
//! The compiler does not own a document model. It talks to whatever tree
//! the host provides through [`DomNode`], which covers exactly what binding
//! needs: reading attributes and text, writing text and form values,
//! listening to events, and moving children in and out of a node.
//!
//! [`MemoryNode`] is an in-memory implementation used as the reference host.

mod memory;

pub use memory::MemoryNode;

use std::rc::Rc;

use crate::error::Result;

/// The kind of a node, as far as the compiler cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Carries attributes and children.
    Element,
    /// Carries text content.
    Text,
    /// Anything else (comments, processing instructions).
    Other,
}

/// An event delivered to a listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event type, such as `input` or `click`.
    pub name: String,

    /// The target's value at dispatch time, for form events.
    ///
    /// Hosts fill this in for `input` events; the model binding writes it
    /// back and ignores events that arrive without one.
    pub value: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// An `input` event carrying the target's new value.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            name: "input".to_string(),
            value: Some(value.into()),
        }
    }
}

/// An event listener. Errors propagate to whoever dispatched the event.
pub type Listener = Rc<dyn Fn(&Event) -> Result<()>>;

/// Box a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&Event) -> Result<()> + 'static,
{
    Rc::new(f)
}

/// A node handle in the host tree.
///
/// Handles are cheap to clone and refer to the same underlying node.
pub trait DomNode: Clone + 'static {
    fn kind(&self) -> NodeKind;

    /// Attribute `(name, value)` pairs in document order. Empty for
    /// non-elements.
    fn attributes(&self) -> Vec<(String, String)>;

    fn text_content(&self) -> String;

    /// Replace the node's text. On an element this replaces its children.
    fn set_text_content(&self, text: &str);

    /// Set the node's editable value slot.
    fn set_value(&self, value: &str);

    fn child_nodes(&self) -> Vec<Self>;

    fn add_event_listener(&self, event: &str, listener: Listener);

    /// Remove and return every child, in order.
    fn detach_children(&self) -> Vec<Self>;

    /// Append `children` after the existing children in one operation.
    fn append_children(&self, children: Vec<Self>);

    /// Find the first descendant matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self>;
}
