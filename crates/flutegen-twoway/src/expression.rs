//! IF-comment expressions
//!
//! Grammar (loosest binding first):
//!
//! ```text
//! or         := and ( "||" and )*
//! and        := unary ( "&&" unary )*
//! unary      := "!" unary | comparison
//! comparison := operand ( ( "==" | "!=" | "<" | "<=" | ">" | ">=" ) operand )?
//! operand    := "(" or ")" | "null" | "true" | "false" | number | 'string'
//!             | name ( "." name )* ( "." ( "size" | "isEmpty" ) "()" )?
//! ```
//!
//! Evaluation is null-safe: a null property is false in boolean position and
//! never satisfies an ordering comparison. [`NullResolver`] resolves every
//! property to null, so evaluating against it only checks well-formedness.

use crate::error::{IfExpressionError, IfExpressionResult};
use serde_json::Value;
use std::cmp::Ordering;

/// Looks up property paths referenced by an expression
pub trait ParameterResolver {
    /// Resolve a path such as `["pmb", "memberName"]`; `None` means null
    fn resolve(&self, path: &[String]) -> Option<Value>;
}

/// Resolves every property to null
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl ParameterResolver for NullResolver {
    fn resolve(&self, _path: &[String]) -> Option<Value> {
        None
    }
}

/// Resolves properties against a JSON parameter bean
///
/// A leading `pmb` segment names the bean itself; paths without it are
/// resolved from the bean as well. Numeric segments index into arrays.
#[derive(Debug, Clone, Copy)]
pub struct JsonParameterResolver<'a> {
    root: &'a Value,
}

impl<'a> JsonParameterResolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Borrowing variant of [`ParameterResolver::resolve`]
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&'a Value> {
        let segments = match path.first() {
            Some(first) if first.as_ref() == "pmb" => &path[1..],
            _ => path,
        };
        navigate(self.root, segments)
    }
}

impl ParameterResolver for JsonParameterResolver<'_> {
    fn resolve(&self, path: &[String]) -> Option<Value> {
        self.lookup(path).filter(|v| !v.is_null()).cloned()
    }
}

/// Walk `segments` down from `value`
pub(crate) fn navigate<'v, S: AsRef<str>>(value: &'v Value, segments: &[S]) -> Option<&'v Value> {
    segments
        .iter()
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment.as_ref()),
            Value::Array(items) => segment
                .as_ref()
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i)),
            _ => None,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Size,
    IsEmpty,
}

impl Method {
    fn name(self) -> &'static str {
        match self {
            Method::Size => "size",
            Method::IsEmpty => "isEmpty",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Operand),
    Property {
        path: Vec<String>,
        method: Option<Method>,
    },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Runtime value of an operand
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Other(Value),
}

impl Operand {
    fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Operand::Null,
            Some(Value::Bool(b)) => Operand::Bool(b),
            Some(Value::Number(n)) => n.as_f64().map_or(Operand::Null, Operand::Number),
            Some(Value::String(s)) => Operand::Str(s),
            Some(other) => Operand::Other(other),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Operand::Null => "null",
            Operand::Bool(_) => "boolean",
            Operand::Number(_) => "number",
            Operand::Str(_) => "string",
            Operand::Other(Value::Array(_)) => "list",
            Operand::Other(_) => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Dot,
    LParen,
    RParen,
    Not,
    And,
    Or,
    Compare(CompareOp),
    Number(f64),
    Str(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Name(name) => name.clone(),
            Token::Dot => ".".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Not => "!".to_string(),
            Token::And => "&&".to_string(),
            Token::Or => "||".to_string(),
            Token::Compare(op) => match op {
                CompareOp::Eq => "==",
                CompareOp::Ne => "!=",
                CompareOp::Lt => "<",
                CompareOp::Le => "<=",
                CompareOp::Gt => ">",
                CompareOp::Ge => ">=",
            }
            .to_string(),
            Token::Number(n) => n.to_string(),
            Token::Str(s) => format!("'{s}'"),
        }
    }
}

/// Deepest nesting of `!`, parentheses and chained `&&`/`||` accepted
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// A parsed IF-comment expression
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    source: String,
    root: Expr,
}

impl IfExpression {
    /// Parse an expression such as `pmb.memberId != null && pmb.paging`
    pub fn parse(source: &str) -> IfExpressionResult<Self> {
        let tokens = lex(source)?;
        let mut parser = Parser {
            source,
            tokens,
            index: 0,
            depth: 0,
        };
        let root = parser.parse_or()?;
        if let Some((position, token)) = parser.tokens.get(parser.index) {
            return Err(IfExpressionError::UnexpectedToken {
                expression: source.to_string(),
                position: *position,
                found: token.describe(),
            });
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// The expression text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Property paths referenced by the expression, joined with `.`
    pub fn property_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.root, &mut paths);
        paths
    }

    /// Evaluate against the given resolver
    pub fn evaluate(&self, resolver: &dyn ParameterResolver) -> IfExpressionResult<bool> {
        Evaluator {
            source: &self.source,
            resolver,
        }
        .eval_bool(&self.root)
    }
}

fn collect_paths(expr: &Expr, paths: &mut Vec<String>) {
    match expr {
        Expr::Property { path, .. } => paths.push(path.join(".")),
        Expr::Not(inner) => collect_paths(inner, paths),
        Expr::And(left, right) | Expr::Or(left, right) => {
            collect_paths(left, paths);
            collect_paths(right, paths);
        }
        Expr::Compare { left, right, .. } => {
            collect_paths(left, paths);
            collect_paths(right, paths);
        }
        Expr::Literal(_) => {}
    }
}

fn lex(source: &str) -> IfExpressionResult<Vec<(usize, Token)>> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let unexpected = |position: usize, found: char| IfExpressionError::UnexpectedCharacter {
        expression: source.to_string(),
        position,
        found,
    };
    let peek_is = |i: usize, expected: char| chars.get(i).is_some_and(|(_, c)| *c == expected);

    while i < chars.len() {
        let (position, c) = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push((position, Token::LParen));
                i += 1;
            }
            ')' => {
                tokens.push((position, Token::RParen));
                i += 1;
            }
            '.' => {
                tokens.push((position, Token::Dot));
                i += 1;
            }
            '&' | '|' => {
                if !peek_is(i + 1, c) {
                    return Err(unexpected(position, c));
                }
                let token = if c == '&' { Token::And } else { Token::Or };
                tokens.push((position, token));
                i += 2;
            }
            '!' | '=' | '<' | '>' => {
                let followed_by_eq = peek_is(i + 1, '=');
                let token = match (c, followed_by_eq) {
                    ('!', true) => Token::Compare(CompareOp::Ne),
                    ('!', false) => Token::Not,
                    ('=', true) => Token::Compare(CompareOp::Eq),
                    ('=', false) => return Err(unexpected(position, c)),
                    ('<', true) => Token::Compare(CompareOp::Le),
                    ('<', false) => Token::Compare(CompareOp::Lt),
                    ('>', true) => Token::Compare(CompareOp::Ge),
                    _ => Token::Compare(CompareOp::Gt),
                };
                tokens.push((position, token));
                i += if followed_by_eq { 2 } else { 1 };
            }
            '\'' => {
                let mut text = String::new();
                let mut j = i + 1;
                loop {
                    match chars.get(j) {
                        None => {
                            return Err(IfExpressionError::UnterminatedString {
                                expression: source.to_string(),
                                position,
                            });
                        }
                        Some((_, '\'')) if peek_is(j + 1, '\'') => {
                            text.push('\'');
                            j += 2;
                        }
                        Some((_, '\'')) => break,
                        Some((_, ch)) => {
                            text.push(*ch);
                            j += 1;
                        }
                    }
                }
                tokens.push((position, Token::Str(text)));
                i = j + 1;
            }
            // array index segment, e.g. pmb.idList.0
            c if c.is_ascii_digit() && matches!(tokens.last(), Some((_, Token::Dot))) => {
                let mut j = i + 1;
                while chars.get(j).is_some_and(|(_, d)| d.is_ascii_digit()) {
                    j += 1;
                }
                let end = chars.get(j).map_or(source.len(), |(p, _)| *p);
                tokens.push((position, Token::Name(source[position..end].to_string())));
                i = j;
            }
            c if c.is_ascii_digit()
                || (c == '-' && chars.get(i + 1).is_some_and(|(_, d)| d.is_ascii_digit())) =>
            {
                let mut j = i + 1;
                while chars
                    .get(j)
                    .is_some_and(|(_, d)| d.is_ascii_digit() || *d == '.')
                {
                    j += 1;
                }
                let end = chars.get(j).map_or(source.len(), |(p, _)| *p);
                let number = source[position..end]
                    .parse::<f64>()
                    .map_err(|_| unexpected(position, c))?;
                tokens.push((position, Token::Number(number)));
                i = j;
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut j = i + 1;
                while chars
                    .get(j)
                    .is_some_and(|(_, d)| d.is_alphanumeric() || *d == '_')
                {
                    j += 1;
                }
                let end = chars.get(j).map_or(source.len(), |(p, _)| *p);
                tokens.push((position, Token::Name(source[position..end].to_string())));
                i = j;
            }
            other => return Err(unexpected(position, other)),
        }
    }
    Ok(tokens)
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<(usize, Token)>,
    index: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(_, t)| t)
    }

    fn next(&mut self) -> IfExpressionResult<(usize, Token)> {
        let token = self
            .tokens
            .get(self.index)
            .cloned()
            .ok_or_else(|| IfExpressionError::UnexpectedEnd {
                expression: self.source.to_string(),
            })?;
        self.index += 1;
        Ok(token)
    }

    fn unexpected(&self, position: usize, token: &Token) -> IfExpressionError {
        IfExpressionError::UnexpectedToken {
            expression: self.source.to_string(),
            position,
            found: token.describe(),
        }
    }

    /// One level deeper in the expression tree
    fn descend(&mut self) -> IfExpressionResult<()> {
        if self.depth >= MAX_EXPRESSION_DEPTH {
            return Err(IfExpressionError::NestingTooDeep {
                expression: self.source.to_string(),
                limit: MAX_EXPRESSION_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    // each chained operand nests the tree one level, so chains count too
    fn parse_or(&mut self) -> IfExpressionResult<Expr> {
        let mut left = self.parse_and()?;
        let mut levels = 0;
        while self.peek() == Some(&Token::Or) {
            self.index += 1;
            self.descend()?;
            levels += 1;
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        self.depth -= levels;
        Ok(left)
    }

    fn parse_and(&mut self) -> IfExpressionResult<Expr> {
        let mut left = self.parse_unary()?;
        let mut levels = 0;
        while self.peek() == Some(&Token::And) {
            self.index += 1;
            self.descend()?;
            levels += 1;
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        self.depth -= levels;
        Ok(left)
    }

    fn parse_unary(&mut self) -> IfExpressionResult<Expr> {
        if self.peek() == Some(&Token::Not) {
            self.index += 1;
            self.descend()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> IfExpressionResult<Expr> {
        let left = self.parse_operand()?;
        if let Some(Token::Compare(op)) = self.peek() {
            let op = *op;
            self.index += 1;
            let right = self.parse_operand()?;
            return Ok(Expr::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_operand(&mut self) -> IfExpressionResult<Expr> {
        let (position, token) = self.next()?;
        match token {
            Token::LParen => {
                self.descend()?;
                let inner = self.parse_or()?;
                self.depth -= 1;
                match self.next()? {
                    (_, Token::RParen) => Ok(inner),
                    (position, other) => Err(self.unexpected(position, &other)),
                }
            }
            Token::Number(n) => Ok(Expr::Literal(Operand::Number(n))),
            Token::Str(s) => Ok(Expr::Literal(Operand::Str(s))),
            Token::Name(name) if self.peek() != Some(&Token::Dot) => match name.as_str() {
                "null" => Ok(Expr::Literal(Operand::Null)),
                "true" => Ok(Expr::Literal(Operand::Bool(true))),
                "false" => Ok(Expr::Literal(Operand::Bool(false))),
                _ => Ok(Expr::Property {
                    path: vec![name],
                    method: None,
                }),
            },
            Token::Name(name) => self.parse_path(name),
            other => Err(self.unexpected(position, &other)),
        }
    }

    fn parse_path(&mut self, first: String) -> IfExpressionResult<Expr> {
        let mut path = vec![first];
        while self.peek() == Some(&Token::Dot) {
            self.index += 1;
            let segment = match self.next()? {
                (_, Token::Name(segment)) => segment,
                (position, other) => return Err(self.unexpected(position, &other)),
            };
            if self.peek() == Some(&Token::LParen) {
                self.index += 1;
                match self.next()? {
                    (_, Token::RParen) => {}
                    (position, other) => return Err(self.unexpected(position, &other)),
                }
                let method = match segment.as_str() {
                    "size" => Method::Size,
                    "isEmpty" => Method::IsEmpty,
                    _ => {
                        return Err(IfExpressionError::UnknownMethod {
                            expression: self.source.to_string(),
                            method: segment,
                        });
                    }
                };
                return Ok(Expr::Property {
                    path,
                    method: Some(method),
                });
            }
            path.push(segment);
        }
        Ok(Expr::Property { path, method: None })
    }
}

struct Evaluator<'e> {
    source: &'e str,
    resolver: &'e dyn ParameterResolver,
}

impl Evaluator<'_> {
    fn eval_bool(&self, expr: &Expr) -> IfExpressionResult<bool> {
        match expr {
            Expr::And(left, right) => Ok(self.eval_bool(left)? && self.eval_bool(right)?),
            Expr::Or(left, right) => Ok(self.eval_bool(left)? || self.eval_bool(right)?),
            Expr::Not(inner) => Ok(!self.eval_bool(inner)?),
            Expr::Compare { op, left, right } => {
                let left = self.eval_operand(left)?;
                let right = self.eval_operand(right)?;
                self.compare(*op, &left, &right)
            }
            other => match self.eval_operand(other)? {
                Operand::Bool(b) => Ok(b),
                Operand::Null => Ok(false),
                value => Err(IfExpressionError::NotBoolean {
                    expression: self.source.to_string(),
                    found: value.type_name().to_string(),
                }),
            },
        }
    }

    fn eval_operand(&self, expr: &Expr) -> IfExpressionResult<Operand> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Property { path, method } => {
                let value = Operand::from_value(self.resolver.resolve(path));
                match method {
                    None => Ok(value),
                    Some(method) => self.apply(*method, value),
                }
            }
            other => self.eval_bool(other).map(Operand::Bool),
        }
    }

    fn apply(&self, method: Method, value: Operand) -> IfExpressionResult<Operand> {
        let size = match &value {
            Operand::Null => return Ok(Operand::Null),
            Operand::Str(s) => s.chars().count(),
            Operand::Other(Value::Array(items)) => items.len(),
            Operand::Other(Value::Object(map)) => map.len(),
            other => {
                return Err(IfExpressionError::MethodNotApplicable {
                    expression: self.source.to_string(),
                    method: method.name().to_string(),
                    found: other.type_name().to_string(),
                });
            }
        };
        Ok(match method {
            Method::Size => Operand::Number(size as f64),
            Method::IsEmpty => Operand::Bool(size == 0),
        })
    }

    fn compare(&self, op: CompareOp, left: &Operand, right: &Operand) -> IfExpressionResult<bool> {
        match op {
            CompareOp::Eq => return Ok(equals(left, right)),
            CompareOp::Ne => return Ok(!equals(left, right)),
            _ => {}
        }
        let ordering = match (left, right) {
            (Operand::Null, _) | (_, Operand::Null) => return Ok(false),
            (Operand::Number(a), Operand::Number(b)) => a.partial_cmp(b),
            (Operand::Str(a), Operand::Str(b)) => Some(a.cmp(b)),
            _ => {
                return Err(IfExpressionError::Incomparable {
                    expression: self.source.to_string(),
                    left: left.type_name().to_string(),
                    right: right.type_name().to_string(),
                });
            }
        };
        Ok(match (op, ordering) {
            (_, None) => false,
            (CompareOp::Lt, Some(o)) => o == Ordering::Less,
            (CompareOp::Le, Some(o)) => o != Ordering::Greater,
            (CompareOp::Gt, Some(o)) => o == Ordering::Greater,
            (_, Some(o)) => o != Ordering::Less,
        })
    }
}

fn equals(left: &Operand, right: &Operand) -> bool {
    match (left, right) {
        (Operand::Number(a), Operand::Number(b)) => a == b,
        _ => left == right,
    }
}
