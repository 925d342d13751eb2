//! Rendering a parsed template against a parameter bean

use crate::error::{TwoWaySqlError, TwoWaySqlResult};
use crate::expression::{navigate, IfExpression, JsonParameterResolver};
use crate::node::{Node, RenderedSql};
use serde_json::Value;
use tracing::debug;

/// Rendered SQL text with its bind values
#[derive(Debug, Default)]
struct Fragment {
    sql: String,
    binds: Vec<Value>,
}

impl Fragment {
    fn append(&mut self, other: Fragment) {
        self.sql.push_str(&other.sql);
        self.binds.extend(other.binds);
    }

    fn is_effective(&self) -> bool {
        !self.sql.trim().is_empty()
    }
}

/// Tracks whether any condition inside a BEGIN block held
#[derive(Debug, Default)]
struct BeginState {
    enabled: bool,
}

/// The iteration a FOR block is on
#[derive(Debug, Clone, Copy)]
struct LoopFrame<'p> {
    current: &'p Value,
    index: usize,
    len: usize,
}

pub(crate) struct Renderer<'p> {
    resolver: JsonParameterResolver<'p>,
    loops: Vec<LoopFrame<'p>>,
}

impl<'p> Renderer<'p> {
    pub(crate) fn new(params: &'p Value) -> Self {
        Self {
            resolver: JsonParameterResolver::new(params),
            loops: Vec::new(),
        }
    }

    pub(crate) fn render(mut self, nodes: &[Node]) -> TwoWaySqlResult<RenderedSql> {
        let mut out = Fragment::default();
        self.render_nodes(nodes, &mut out, None)?;
        debug!(
            binds = out.binds.len(),
            "rendered two-way SQL ({} chars)",
            out.sql.len()
        );
        Ok(RenderedSql {
            sql: out.sql,
            bind_values: out.binds,
        })
    }

    fn render_nodes(
        &mut self,
        nodes: &[Node],
        out: &mut Fragment,
        mut begin: Option<&mut BeginState>,
    ) -> TwoWaySqlResult<()> {
        for node in nodes {
            match node {
                Node::Sql(text) => out.sql.push_str(text),
                Node::BindVariable {
                    expression,
                    test_value,
                } => {
                    let value = self.lookup(expression);
                    bind(expression, value, test_value, out)?;
                }
                Node::EmbeddedVariable { expression, .. } => {
                    embed(self.lookup(expression), out);
                }
                Node::LoopVariable {
                    expression,
                    test_value,
                } => {
                    let value = self.current_element(expression);
                    bind(expression, value, test_value, out)?;
                }
                Node::If {
                    expression,
                    children,
                    else_children,
                } => {
                    let holds = IfExpression::parse(expression)?.evaluate(&self.resolver)?;
                    let branch = if holds {
                        Some(children.as_slice())
                    } else {
                        else_children.as_deref()
                    };
                    if let Some(branch) = branch {
                        let mut inner = Fragment::default();
                        self.render_nodes(branch, &mut inner, None)?;
                        push_conditional(inner, out, begin.as_deref_mut());
                    }
                }
                Node::Begin { children } => {
                    let mut state = BeginState::default();
                    let mut inner = Fragment::default();
                    self.render_nodes(children, &mut inner, Some(&mut state))?;
                    if state.enabled {
                        push_conditional(inner, out, begin.as_deref_mut());
                    }
                }
                Node::For {
                    expression,
                    children,
                } => {
                    let mut inner = Fragment::default();
                    self.render_loop(expression, children, &mut inner)?;
                    push_conditional(inner, out, begin.as_deref_mut());
                }
                Node::Next { separator } => {
                    if self.loops.last().is_some_and(|frame| frame.index > 0) {
                        out.sql.push_str(separator);
                    }
                }
                Node::First { children } => {
                    if self.loops.last().is_some_and(|frame| frame.index == 0) {
                        self.render_nodes(children, out, None)?;
                    }
                }
                Node::Last { children } => {
                    if self
                        .loops
                        .last()
                        .is_some_and(|frame| frame.index + 1 == frame.len)
                    {
                        self.render_nodes(children, out, None)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn render_loop(
        &mut self,
        expression: &str,
        children: &[Node],
        out: &mut Fragment,
    ) -> TwoWaySqlResult<()> {
        let items = match self.lookup(expression) {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(TwoWaySqlError::ForCommentNotList {
                    expression: expression.to_string(),
                });
            }
        };
        for (index, current) in items.iter().enumerate() {
            self.loops.push(LoopFrame {
                current,
                index,
                len: items.len(),
            });
            let rendered = self.render_nodes(children, out, None);
            self.loops.pop();
            rendered?;
        }
        Ok(())
    }

    fn lookup(&self, expression: &str) -> Option<&'p Value> {
        let path: Vec<&str> = expression.split('.').collect();
        self.resolver.lookup(&path)
    }

    /// Resolve `current` or `current.name` against the innermost loop
    fn current_element(&self, expression: &str) -> Option<&'p Value> {
        let frame = self.loops.last()?;
        let segments: Vec<&str> = expression.split('.').skip(1).collect();
        navigate(frame.current, &segments)
    }
}

/// Append an IF/BEGIN/FOR result, dropping the leading connector of the
/// first effective condition in a BEGIN block
fn push_conditional(mut inner: Fragment, out: &mut Fragment, begin: Option<&mut BeginState>) {
    if let Some(state) = begin {
        if inner.is_effective() {
            if !state.enabled {
                inner.sql = strip_leading_connector(&inner.sql);
            }
            state.enabled = true;
        }
    }
    out.append(inner);
}

/// Remove a leading `AND`/`OR` (any case) and the whitespace after it
fn strip_leading_connector(sql: &str) -> String {
    let body = sql.trim_start();
    let indent = &sql[..sql.len() - body.len()];
    for connector in ["and", "or"] {
        let Some(head) = body.get(..connector.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(connector) {
            continue;
        }
        let rest = &body[connector.len()..];
        if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
            return format!("{indent}{}", rest.trim_start());
        }
    }
    sql.to_string()
}

fn bind(
    expression: &str,
    value: Option<&Value>,
    test_value: &str,
    out: &mut Fragment,
) -> TwoWaySqlResult<()> {
    match value {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                return Err(TwoWaySqlError::BindListEmpty {
                    expression: expression.to_string(),
                });
            }
            let placeholders = vec!["?"; items.len()].join(", ");
            out.sql.push_str(&format!("({placeholders})"));
            out.binds.extend(items.iter().cloned());
        }
        other => {
            if test_value.starts_with('(') {
                out.sql.push_str("(?)");
            } else {
                out.sql.push('?');
            }
            out.binds.push(other.cloned().unwrap_or(Value::Null));
        }
    }
    Ok(())
}

fn embed(value: Option<&Value>, out: &mut Fragment) {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .map(embedded_text)
                .collect::<Vec<_>>()
                .join(", ");
            out.sql.push_str(&joined);
        }
        Some(other) => out.sql.push_str(&embedded_text(other)),
    }
}

fn embedded_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
