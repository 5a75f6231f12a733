//! In-memory node tree.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::{DomNode, Event, Listener, NodeKind};
use crate::error::Result;

enum Content {
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
        value: String,
    },
    Text(String),
    Comment(String),
}

struct NodeData {
    content: Content,
    children: Vec<MemoryNode>,
    listeners: Vec<(String, Listener)>,
}

/// A node in an in-memory tree.
///
/// # Example
///
/// ```rust,ignore
/// let root = MemoryNode::element("div")
///     .child(MemoryNode::element("input").attr("v-model", "msg"))
///     .child(MemoryNode::element("p").child(MemoryNode::text("{{ msg }}")));
/// ```
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl MemoryNode {
    fn from_content(content: Content) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            content,
            children: Vec::new(),
            listeners: Vec::new(),
        })))
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::from_content(Content::Element {
            tag: tag.into(),
            attributes: IndexMap::new(),
            value: String::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::from_content(Content::Text(text.into()))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::from_content(Content::Comment(text.into()))
    }

    /// Builder: set an attribute. Ignored on non-elements.
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Content::Element { attributes, .. } = &mut self.0.borrow_mut().content {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Builder: append a child.
    pub fn child(self, child: MemoryNode) -> Self {
        self.append_child(child);
        self
    }

    pub fn append_child(&self, child: MemoryNode) {
        self.0.borrow_mut().children.push(child);
    }

    /// Tag name for elements.
    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().content {
            Content::Element { tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.borrow().content {
            Content::Element { attributes, .. } => attributes.get(name).cloned(),
            _ => None,
        }
    }

    /// The element's value slot. Empty for non-elements.
    pub fn value(&self) -> String {
        match &self.0.borrow().content {
            Content::Element { value, .. } => value.clone(),
            _ => String::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn listener_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    /// Run every listener registered for `event.name`, in registration
    /// order, stopping at the first error.
    ///
    /// An event dispatched on an element without a value picks up the
    /// element's current value.
    pub fn dispatch(&self, event: &Event) -> Result<()> {
        let targeted;
        let event = match (&event.value, self.kind()) {
            (None, NodeKind::Element) => {
                targeted = Event {
                    value: Some(self.value()),
                    ..event.clone()
                };
                &targeted
            }
            _ => event,
        };

        let listeners: Vec<Listener> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|(name, _)| *name == event.name)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event)?;
        }
        Ok(())
    }

    /// Simulate user input: set the value slot, then dispatch `input`.
    pub fn input(&self, value: &str) -> Result<()> {
        self.set_value(value);
        self.dispatch(&Event::input(value))
    }

    /// Dispatch a bare `click` event.
    pub fn click(&self) -> Result<()> {
        self.dispatch(&Event::new("click"))
    }

    pub fn ptr_eq(&self, other: &MemoryNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.attribute("id").as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.attribute("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
        } else {
            self.tag().is_some_and(|tag| tag.eq_ignore_ascii_case(selector))
        }
    }
}

impl DomNode for MemoryNode {
    fn kind(&self) -> NodeKind {
        match self.0.borrow().content {
            Content::Element { .. } => NodeKind::Element,
            Content::Text(_) => NodeKind::Text,
            Content::Comment(_) => NodeKind::Other,
        }
    }

    fn attributes(&self) -> Vec<(String, String)> {
        match &self.0.borrow().content {
            Content::Element { attributes, .. } => attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.content {
            Content::Text(text) | Content::Comment(text) => text.clone(),
            Content::Element { .. } => data
                .children
                .iter()
                .filter(|child| child.kind() != NodeKind::Other)
                .map(|child| child.text_content())
                .collect(),
        }
    }

    fn set_text_content(&self, text: &str) {
        let mut guard = self.0.borrow_mut();
        let data = &mut *guard;
        match &mut data.content {
            Content::Text(current) | Content::Comment(current) => *current = text.to_string(),
            Content::Element { .. } => {
                data.children.clear();
                if !text.is_empty() {
                    data.children.push(MemoryNode::text(text));
                }
            }
        }
    }

    fn set_value(&self, new_value: &str) {
        if let Content::Element { value, .. } = &mut self.0.borrow_mut().content {
            *value = new_value.to_string();
        }
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    fn add_event_listener(&self, event: &str, listener: Listener) {
        self.0.borrow_mut().listeners.push((event.to_string(), listener));
    }

    fn detach_children(&self) -> Vec<Self> {
        std::mem::take(&mut self.0.borrow_mut().children)
    }

    fn append_children(&self, children: Vec<Self>) {
        self.0.borrow_mut().children.extend(children);
    }

    fn query_selector(&self, selector: &str) -> Option<Self> {
        for child in self.child_nodes() {
            if child.matches(selector) {
                return Some(child);
            }
            if let Some(found) = child.query_selector(selector) {
                return Some(found);
            }
        }
        None
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        match &data.content {
            Content::Element { tag, attributes, value } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attributes", attributes)
                .field("value", value)
                .field("children", &data.children)
                .finish(),
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::Comment(text) => f.debug_tuple("Comment").field(text).finish(),
        }
    }
}
