//! Parsed two-way SQL nodes

use crate::error::TwoWaySqlResult;
use crate::render::Renderer;
use serde::Serialize;
use serde_json::Value;

/// A node of a parsed two-way SQL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain SQL text, including comments that are not directives
    Sql(String),

    /// `/*pmb.memberName*/'Pixy'`, rendered as a `?` placeholder
    BindVariable {
        expression: String,
        test_value: String,
    },

    /// `/*$pmb.orderBy*/MEMBER_ID`, rendered by inlining the value
    EmbeddedVariable {
        expression: String,
        test_value: String,
    },

    /// `/*IF expr*/ ... -- ELSE ... /*END*/`
    If {
        expression: String,
        children: Vec<Node>,
        else_children: Option<Vec<Node>>,
    },

    /// `/*BEGIN*/ ... /*END*/`, dropped when no inner condition holds
    Begin { children: Vec<Node> },

    /// `/*FOR pmb.list*/ ... /*END*/`
    For {
        expression: String,
        children: Vec<Node>,
    },

    /// `/*NEXT 'or '*/`, emits the separator from the second iteration on
    Next { separator: String },

    /// `/*FIRST*/ ... /*END*/`, rendered on the first iteration only
    First { children: Vec<Node> },

    /// `/*LAST*/ ... /*END*/`, rendered on the last iteration only
    Last { children: Vec<Node> },

    /// `/*#current*/'x'` or `/*#current.name*/'x'`, binds the loop element
    LoopVariable {
        expression: String,
        test_value: String,
    },
}

impl Node {
    fn children(&self) -> impl Iterator<Item = &Node> {
        let (first, second): (&[Node], &[Node]) = match self {
            Node::If {
                children,
                else_children,
                ..
            } => (children, else_children.as_deref().unwrap_or(&[])),
            Node::Begin { children }
            | Node::For { children, .. }
            | Node::First { children }
            | Node::Last { children } => (children, &[]),
            _ => (&[], &[]),
        };
        first.iter().chain(second.iter())
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// SQL ready for execution: `?` placeholders plus their values in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSql {
    pub sql: String,
    pub bind_values: Vec<Value>,
}

/// A parsed two-way SQL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTemplate {
    nodes: Vec<Node>,
}

impl SqlTemplate {
    pub(crate) fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every IF-comment expression, in document order
    pub fn if_expressions(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.walk(|node| {
            if let Node::If { expression, .. } = node {
                found.push(expression.as_str());
            }
        });
        found
    }

    /// Every bind and embedded variable expression, in document order
    pub fn variable_expressions(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.walk(|node| match node {
            Node::BindVariable { expression, .. }
            | Node::EmbeddedVariable { expression, .. }
            | Node::For { expression, .. } => found.push(expression.as_str()),
            _ => {}
        });
        found
    }

    /// Render executable SQL against a parameter bean
    ///
    /// `params` is the bean addressed as `pmb` in expressions.
    pub fn render(&self, params: &Value) -> TwoWaySqlResult<RenderedSql> {
        Renderer::new(params).render(&self.nodes)
    }

    fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Node)) {
        for node in &self.nodes {
            node.walk(&mut visit);
        }
    }
}
