//! Directive Registry
//!
//! Three binding routines cover everything a template can express:
//!
//! - [`Directive::Model`]: two-way binding between a form control's value
//!   and a data key.
//! - [`Directive::Text`]: a node's text follows a key, or an interpolation
//!   template with any number of markers.
//! - [`Directive::On`]: an event on the node calls a named method.
//!
//! # Attribute Names
//!
//! With the default [`Syntax`], `v-model`, `v-text` and `v-on:click` select a
//! routine by the key after the prefix; the part after `:` parameterizes the
//! event. `@click` is shorthand for `v-on:click`.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::template::Template;
use crate::config::Syntax;
use crate::dom::{listener, DomNode, Event};
use crate::error::{Result, ViewError};
use crate::reactive::{Object, Watcher};

/// A user method callable from an event directive.
///
/// It receives the data object as its context and the triggering event.
pub type Method = Rc<dyn Fn(&Object, &Event) -> Result<()>>;

/// Named methods available to event directives.
#[derive(Clone, Default)]
pub struct Methods {
    methods: IndexMap<String, Method>,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `method` under `name`, replacing any previous entry.
    pub fn insert<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: Fn(&Object, &Event) -> Result<()> + 'static,
    {
        self.methods.insert(name.into(), Rc::new(method));
    }

    /// Builder form of [`Methods::insert`].
    pub fn with<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Object, &Event) -> Result<()> + 'static,
    {
        self.insert(name, method);
        self
    }

    pub fn get(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.methods.keys()).finish()
    }
}

/// What a directive routine gets to work with.
#[derive(Clone, Copy)]
pub struct BindContext<'a> {
    pub data: &'a Object,
    pub methods: &'a Methods,
    pub syntax: &'a Syntax,
}

/// A recognized directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Model,
    Text,
    /// Listen for the named event.
    On(String),
}

impl Directive {
    /// Resolve an attribute name.
    ///
    /// Returns `Ok(None)` for ordinary attributes.
    pub fn parse(name: &str, syntax: &Syntax) -> Result<Option<Self>> {
        if !syntax.directive_prefix.is_empty() {
            if let Some(rest) = name.strip_prefix(syntax.directive_prefix.as_str()) {
                let (key, qualifier) = match rest.split_once(syntax.qualifier_separator.as_str()) {
                    Some((key, qualifier)) => (key, Some(qualifier)),
                    None => (rest, None),
                };

                return match key {
                    "model" => Ok(Some(Directive::Model)),
                    "text" => Ok(Some(Directive::Text)),
                    "on" => match qualifier.filter(|event| !event.is_empty()) {
                        Some(event) => Ok(Some(Directive::On(event.to_string()))),
                        None => Err(ViewError::MissingEventName(name.to_string())),
                    },
                    _ => Err(ViewError::UnknownDirective(name.to_string())),
                };
            }
        }

        if !syntax.event_prefix.is_empty() {
            if let Some(event) = name.strip_prefix(syntax.event_prefix.as_str()) {
                if event.is_empty() {
                    return Err(ViewError::MissingEventName(name.to_string()));
                }
                return Ok(Some(Directive::On(event.to_string())));
            }
        }

        Ok(None)
    }

    /// Apply the directive to `node` with the attribute's value.
    pub fn bind<N: DomNode>(&self, node: &N, expr: &str, cx: BindContext<'_>) {
        match self {
            Directive::Model => model(node, expr, cx.data),
            Directive::Text => text(node, expr, cx.data, cx.syntax),
            Directive::On(event) => on(node, expr, event, cx.data, cx.methods),
        }
    }
}

/// Two-way binding between the node's value slot and `data[expr]`.
fn model<N: DomNode>(node: &N, expr: &str, data: &Object) {
    let key = expr.trim().to_string();
    let initial = data.get(&key);

    let target = node.clone();
    Watcher::new(&key, data, move |value| target.set_value(&value.to_text()));

    let store = data.downgrade();
    node.add_event_listener(
        "input",
        listener(move |event| {
            if let (Some(data), Some(value)) = (store.upgrade(), &event.value) {
                data.set(&key, value.as_str());
            }
            Ok(())
        }),
    );

    node.set_value(&initial.to_text());
}

/// Keep the node's text in sync with a key or an interpolation template.
///
/// Each marker gets its own watcher, and each of them re-renders the whole
/// template.
fn text<N: DomNode>(node: &N, expr: &str, data: &Object, syntax: &Syntax) {
    let template = Template::parse(expr, syntax);

    if !template.has_markers() {
        let target = node.clone();
        let watcher = Watcher::new(expr, data, move |value| {
            target.set_text_content(&value.to_text());
        });
        node.set_text_content(&watcher.value().to_text());
        return;
    }

    let template = Rc::new(template);
    for marker in template.markers() {
        let target = node.clone();
        let store = data.downgrade();
        let template = Rc::clone(&template);
        Watcher::new(marker, data, move |_| {
            if let Some(data) = store.upgrade() {
                target.set_text_content(&template.render(&data));
            }
        });
    }
    node.set_text_content(&template.render(data));
}

/// Call the method named `expr` whenever `event` fires on the node.
///
/// A missing method is reported when the event fires.
fn on<N: DomNode>(node: &N, expr: &str, event: &str, data: &Object, methods: &Methods) {
    let name = expr.trim().to_string();
    let method = methods.get(&name);
    if method.is_none() {
        tracing::warn!(method = %name, event, "event bound to an undefined method");
    }

    let store = data.downgrade();
    node.add_event_listener(
        event,
        listener(move |event| {
            let Some(method) = &method else {
                return Err(ViewError::UnknownMethod(name.clone()));
            };
            match store.upgrade() {
                Some(data) => method(&data, event),
                None => Ok(()),
            }
        }),
    );
}
