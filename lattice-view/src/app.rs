//! Application Mounting
//!
//! [`App`] is the entry point that ties the pieces together:
//!
//! 1. observe the data object, so every field is reactive before anything
//!    reads it
//! 2. compile the tree under the mount point against that data
//! 3. expose every top-level data key as a property of the app
//!
//! # Example
//!
//! ```rust,ignore
//! let root = MemoryNode::element("div")
//!     .child(MemoryNode::element("input").attr("v-model", "msg"))
//!     .child(MemoryNode::text("{{ msg }}"));
//!
//! let app = App::new(AppOptions::new(root, Object::from_json(r#"{ "msg": "hi" }"#)?))?;
//! app.set("msg", "bye")?;
//! ```

use std::rc::Rc;

use crate::compile::{Compiler, Method, Methods};
use crate::config::Syntax;
use crate::dom::{DomNode, Event};
use crate::error::{Result, ViewError};
use crate::reactive::{AccessHook, NoopHook, Object, Observer, Value};

/// Where to mount an app.
#[derive(Debug, Clone)]
pub enum Mount<N> {
    /// A node the caller already holds.
    Node(N),
    /// The first descendant of `document` matching `selector`.
    Selector { document: N, selector: String },
}

impl<N: DomNode> Mount<N> {
    fn resolve(self) -> Result<N> {
        match self {
            Mount::Node(node) => Ok(node),
            Mount::Selector { document, selector } => document
                .query_selector(&selector)
                .ok_or(ViewError::RootNotFound(selector)),
        }
    }
}

/// Everything needed to mount an [`App`].
pub struct AppOptions<N> {
    pub el: Mount<N>,
    pub data: Object,
    pub methods: Methods,
    pub syntax: Syntax,
    pub hook: Rc<dyn AccessHook>,
}

impl<N: DomNode> AppOptions<N> {
    /// Mount on `el`.
    pub fn new(el: N, data: Object) -> Self {
        Self::mount(Mount::Node(el), data)
    }

    /// Mount on the first descendant of `document` matching `selector`.
    pub fn with_selector(document: N, selector: impl Into<String>, data: Object) -> Self {
        let el = Mount::Selector {
            document,
            selector: selector.into(),
        };
        Self::mount(el, data)
    }

    pub fn mount(el: Mount<N>, data: Object) -> Self {
        Self {
            el,
            data,
            methods: Methods::new(),
            syntax: Syntax::default(),
            hook: Rc::new(NoopHook),
        }
    }

    pub fn methods(mut self, methods: Methods) -> Self {
        self.methods = methods;
        self
    }

    /// Register a single method.
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Object, &Event) -> Result<()> + 'static,
    {
        self.methods.insert(name, method);
        self
    }

    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn hook(mut self, hook: Rc<dyn AccessHook>) -> Self {
        self.hook = hook;
        self
    }
}

/// A mounted application.
pub struct App<N> {
    el: N,
    data: Object,
    /// Top-level keys at mount time; the only ones exposed as properties.
    keys: Vec<String>,
    compiler: Compiler,
}

impl<N: DomNode> App<N> {
    /// Observe the data, compile the tree, and expose the data keys.
    pub fn new(options: AppOptions<N>) -> Result<Self> {
        let AppOptions {
            el,
            data,
            methods,
            syntax,
            hook,
        } = options;

        let el = el.resolve()?;

        Observer::with_hook(hook).observe_object(&data);

        let compiler = Compiler::new(syntax, methods);
        compiler.compile(&el, &data)?;

        let keys = data.keys();
        tracing::debug!(keys = ?keys, "app mounted");

        Ok(Self {
            el,
            data,
            keys,
            compiler,
        })
    }

    /// The node the app is mounted on.
    pub fn el(&self) -> &N {
        &self.el
    }

    /// The underlying data object.
    pub fn data(&self) -> &Object {
        &self.data
    }

    /// The data keys exposed as properties.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn method(&self, name: &str) -> Option<Method> {
        self.compiler.methods().get(name)
    }

    /// Read a data property. `None` if `key` was not a top-level data key
    /// at mount time.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.exposes(key).then(|| self.data.get(key))
    }

    /// Write a data property, notifying every binding that depends on it.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        if !self.exposes(key) {
            return Err(ViewError::UnknownProperty(key.to_string()));
        }
        self.data.set(key, value);
        Ok(())
    }

    fn exposes(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }
}

impl<N: DomNode + std::fmt::Debug> std::fmt::Debug for App<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("el", &self.el)
            .field("keys", &self.keys)
            .field("methods", self.compiler.methods())
            .finish()
    }
}
