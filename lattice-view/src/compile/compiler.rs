//! Template Compiler
//!
//! The compiler walks a node tree once and wires every directive and
//! interpolation it finds to the data object.
//!
//! # Algorithm
//!
//! 1. Move the root's children into a detached [`Fragment`], so binding
//!    does not touch the live tree node by node.
//! 2. Visit the fragment depth-first in document order (parent before
//!    children, siblings left to right):
//!    - elements have their directive attributes bound
//!    - text nodes containing a marker are bound as templates
//! 3. Move the fragment back under the root in a single append.
//!
//! The order only decides which watcher is created first; fields notify
//! their watchers independently, so it has no effect on steady-state
//! behavior.

use super::directive::{BindContext, Directive, Methods};
use super::template::Template;
use crate::config::Syntax;
use crate::dom::{DomNode, NodeKind};
use crate::error::Result;
use crate::reactive::Object;

/// Children held off-tree while they are being compiled.
#[derive(Debug)]
pub struct Fragment<N> {
    nodes: Vec<N>,
}

impl<N: DomNode> Fragment<N> {
    /// Take every child of `root`.
    pub fn detach(root: &N) -> Self {
        Self {
            nodes: root.detach_children(),
        }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Give the children back to `root` in one operation.
    pub fn attach(self, root: &N) {
        root.append_children(self.nodes);
    }
}

/// Compiles node trees against a data object.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    syntax: Syntax,
    methods: Methods,
}

impl Compiler {
    pub fn new(syntax: Syntax, methods: Methods) -> Self {
        Self { syntax, methods }
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    pub fn methods(&self) -> &Methods {
        &self.methods
    }

    /// Bind every directive and interpolation below `root` to `data`.
    ///
    /// `data` should already be observed; bindings on plain fields render
    /// once and never update. On error the children are still returned to
    /// `root`, with whatever bindings were made before the failure.
    pub fn compile<N: DomNode>(&self, root: &N, data: &Object) -> Result<()> {
        let fragment = Fragment::detach(root);
        let result = self.compile_nodes(fragment.nodes(), data);
        fragment.attach(root);
        result
    }

    fn compile_nodes<N: DomNode>(&self, nodes: &[N], data: &Object) -> Result<()> {
        for node in nodes {
            match node.kind() {
                NodeKind::Element => self.compile_element(node, data)?,
                NodeKind::Text => self.compile_text(node, data),
                NodeKind::Other => {}
            }

            let children = node.child_nodes();
            if !children.is_empty() {
                self.compile_nodes(&children, data)?;
            }
        }
        Ok(())
    }

    fn compile_element<N: DomNode>(&self, node: &N, data: &Object) -> Result<()> {
        for (name, value) in node.attributes() {
            if let Some(directive) = Directive::parse(&name, &self.syntax)? {
                tracing::debug!(attribute = %name, expr = %value, "binding directive");
                directive.bind(node, &value, self.context(data));
            }
        }
        Ok(())
    }

    fn compile_text<N: DomNode>(&self, node: &N, data: &Object) {
        let content = node.text_content();
        if Template::detect(&content, &self.syntax) {
            tracing::debug!(template = %content, "binding interpolation");
            Directive::Text.bind(node, &content, self.context(data));
        }
    }

    fn context<'a>(&'a self, data: &'a Object) -> BindContext<'a> {
        BindContext {
            data,
            methods: &self.methods,
            syntax: &self.syntax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryNode;
    use crate::error::ViewError;
    use crate::reactive::{Observer, Value};

    fn observed(json: serde_json::Value) -> Object {
        let Value::Object(data) = Value::from(json) else {
            panic!("expected an object");
        };
        Observer::new().observe_object(&data);
        data
    }

    #[test]
    fn compiles_nested_tree() {
        let data = observed(serde_json::json!({ "msg": "hi", "name": "A" }));
        let input = MemoryNode::element("input").attr("v-model", "msg");
        let greeting = MemoryNode::text("Hello {{name}}!");
        let root = MemoryNode::element("div")
            .child(input.clone())
            .child(MemoryNode::element("section").child(MemoryNode::element("p").child(greeting.clone())));

        Compiler::default().compile(&root, &data).unwrap();

        assert_eq!(root.child_count(), 2);
        assert_eq!(input.value(), "hi");
        assert_eq!(greeting.text_content(), "Hello A!");

        data.set("name", "B");
        assert_eq!(greeting.text_content(), "Hello B!");
    }

    #[test]
    fn binds_every_directive_in_the_tree() {
        let data = observed(serde_json::json!({ "k": 0 }));

        let first = MemoryNode::element("p").attr("v-text", "k");
        let nested = MemoryNode::element("b").attr("v-text", "k");
        let last = MemoryNode::text("{{ k }}");
        let root = MemoryNode::element("div")
            .child(first.clone())
            .child(MemoryNode::element("section").child(nested.clone()))
            .child(last.clone());

        Compiler::default().compile(&root, &data).unwrap();
        assert_eq!(data.subscriber_count("k"), 3);

        data.set("k", 1);
        assert_eq!(first.text_content(), "1");
        assert_eq!(nested.text_content(), "1");
        assert_eq!(last.text_content(), "1");
    }

    #[test]
    fn text_directive_replaces_children_before_they_are_visited() {
        let data = observed(serde_json::json!({ "k": "v", "inner": "i" }));
        let root = MemoryNode::element("div").child(
            MemoryNode::element("p")
                .attr("v-text", "k")
                .child(MemoryNode::element("b").attr("v-text", "inner")),
        );

        Compiler::default().compile(&root, &data).unwrap();
        assert_eq!(root.text_content(), "v");
        assert_eq!(data.subscriber_count("inner"), 0);
    }

    #[test]
    fn comments_and_plain_text_are_ignored() {
        let data = observed(serde_json::json!({ "x": 1 }));
        let root = MemoryNode::element("div")
            .child(MemoryNode::comment("{{ x }}"))
            .child(MemoryNode::text("no markers"));

        Compiler::default().compile(&root, &data).unwrap();
        assert_eq!(data.subscriber_count("x"), 0);
        assert_eq!(root.text_content(), "no markers");
    }

    #[test]
    fn error_still_reattaches_children() {
        let data = observed(serde_json::json!({}));
        let root = MemoryNode::element("div")
            .child(MemoryNode::element("p").attr("v-html", "x"))
            .child(MemoryNode::text("tail"));

        let err = Compiler::default().compile(&root, &data).unwrap_err();
        assert!(matches!(err, ViewError::UnknownDirective(name) if name == "v-html"));
        assert_eq!(root.child_count(), 2);
    }

    #[test]
    fn custom_syntax() {
        let data = observed(serde_json::json!({ "n": 1 }));
        let syntax = Syntax::from_json(
            r#"{ "directive_prefix": "x-", "event_prefix": "on-", "open": "${", "close": "}" }"#,
        )
        .unwrap();
        let methods = Methods::new().with("inc", |data, _| {
            let n = data.get("n").as_f64().unwrap_or(0.0);
            data.set("n", n + 1.0);
            Ok(())
        });

        let button = MemoryNode::element("button")
            .attr("on-click", "inc")
            .child(MemoryNode::text("n=${n}"));
        let label = MemoryNode::element("span").attr("x-text", "n");
        let root = MemoryNode::element("div").child(button.clone()).child(label.clone());

        Compiler::new(syntax, methods).compile(&root, &data).unwrap();
        assert_eq!(button.text_content(), "n=1");

        button.click().unwrap();
        assert_eq!(button.text_content(), "n=2");
        assert_eq!(label.text_content(), "2");
    }
}
