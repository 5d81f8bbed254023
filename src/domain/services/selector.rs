//! Model node selector
//!
//! A small XPath-like path language addressing nodes of a `ModelNode` tree:
//!
//! - `/` the root, `/database/table` absolute child steps
//! - `table/column` relative to a context node
//! - `//column` descendants at any depth
//! - `*`, `.`, `..`
//! - predicates `[@name]`, `[@name='book']`, `[2]` (1-based position)
//!
//! Results come back in document order without duplicates.

use std::collections::BTreeSet;

use crate::domain::entities::{ModelNode, ModelPath};
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Name(String),
    Any,
    SelfNode,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    HasAttribute(String),
    AttributeEquals(String, String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

/// Parsed selector expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    expression: String,
    absolute: bool,
    steps: Vec<Step>,
}

impl Selector {
    pub fn parse(expression: &str) -> Result<Self, ConfigurationError> {
        Parser::new(expression).parse()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Paths of all nodes addressed from `context`, in document order.
    pub fn select(&self, root: &ModelNode, context: &ModelPath) -> Vec<ModelPath> {
        // `None` stands for the document node above the root element.
        let mut current: Vec<Option<ModelPath>> = if self.absolute {
            vec![None]
        } else {
            vec![Some(context.clone())]
        };
        if self.absolute && self.steps.is_empty() {
            return vec![ModelPath::root()];
        }

        for step in &self.steps {
            let mut next = BTreeSet::new();
            for ctx in &current {
                for path in apply_step(root, ctx.as_ref(), step) {
                    next.insert(path);
                }
            }
            current = next.into_iter().map(Some).collect();
        }

        current.into_iter().flatten().collect()
    }

    /// Forward-only iteration over the addressed nodes.
    pub fn iter(&self, root: &ModelNode, context: &ModelPath) -> std::vec::IntoIter<ModelPath> {
        self.select(root, context).into_iter()
    }
}

fn apply_step(root: &ModelNode, ctx: Option<&ModelPath>, step: &Step) -> Vec<ModelPath> {
    let candidates: Vec<ModelPath> = match (&step.test, step.axis) {
        (NodeTest::SelfNode, Axis::Child) => ctx.cloned().into_iter().collect(),
        (NodeTest::SelfNode, Axis::Descendant) => {
            let mut all: Vec<ModelPath> = ctx.cloned().into_iter().collect();
            all.extend(descendants(root, ctx));
            all
        }
        (NodeTest::Parent, _) => ctx.and_then(ModelPath::parent).into_iter().collect(),
        (_, Axis::Child) => children(root, ctx),
        (_, Axis::Descendant) => descendants(root, ctx),
    };

    let mut matched: Vec<ModelPath> = candidates
        .into_iter()
        .filter(|path| match &step.test {
            NodeTest::Name(name) => root.node_at(path).is_some_and(|n| n.name() == name),
            _ => true,
        })
        .collect();

    for predicate in &step.predicates {
        matched = match predicate {
            Predicate::Position(position) => matched
                .into_iter()
                .nth(position - 1)
                .into_iter()
                .collect(),
            Predicate::HasAttribute(attr) => matched
                .into_iter()
                .filter(|p| root.node_at(p).is_some_and(|n| n.attribute(attr).is_some()))
                .collect(),
            Predicate::AttributeEquals(attr, value) => matched
                .into_iter()
                .filter(|p| {
                    root.node_at(p)
                        .is_some_and(|n| n.attribute(attr) == Some(value.as_str()))
                })
                .collect(),
        };
    }
    matched
}

fn children(root: &ModelNode, ctx: Option<&ModelPath>) -> Vec<ModelPath> {
    match ctx {
        None => vec![ModelPath::root()],
        Some(path) => root
            .node_at(path)
            .map(|node| (0..node.children().len()).map(|i| path.child(i)).collect())
            .unwrap_or_default(),
    }
}

fn descendants(root: &ModelNode, ctx: Option<&ModelPath>) -> Vec<ModelPath> {
    let mut out = Vec::new();
    let mut stack = children(root, ctx);
    stack.reverse();
    while let Some(path) = stack.pop() {
        let mut kids = children(root, Some(&path));
        kids.reverse();
        out.push(path);
        stack.extend(kids);
    }
    out
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> ConfigurationError {
        ConfigurationError::Selector {
            expression: self.input.to_string(),
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `/` or `//` and returns the axis of the following step.
    fn separator(&mut self) -> Option<Axis> {
        if self.eat('/') {
            if self.eat('/') {
                Some(Axis::Descendant)
            } else {
                Some(Axis::Child)
            }
        } else {
            None
        }
    }

    fn parse(mut self) -> Result<Selector, ConfigurationError> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return Err(self.error("empty expression"));
        }
        self.chars = trimmed.chars().collect();

        let mut steps = Vec::new();
        let first_axis = self.separator();
        let absolute = first_axis.is_some();
        if absolute && self.peek().is_none() {
            if first_axis == Some(Axis::Descendant) {
                return Err(self.error("'//' must be followed by a step"));
            }
            return Ok(Selector {
                expression: trimmed.to_string(),
                absolute,
                steps,
            });
        }

        let mut axis = first_axis.unwrap_or(Axis::Child);
        loop {
            steps.push(self.step(axis)?);
            if self.peek().is_none() {
                break;
            }
            axis = self
                .separator()
                .ok_or_else(|| self.error(format!("unexpected '{}'", self.chars[self.pos])))?;
            if self.peek().is_none() {
                return Err(self.error("trailing '/'"));
            }
        }

        Ok(Selector {
            expression: trimmed.to_string(),
            absolute,
            steps,
        })
    }

    fn step(&mut self, axis: Axis) -> Result<Step, ConfigurationError> {
        let test = if self.eat('*') {
            NodeTest::Any
        } else if self.eat('.') {
            if self.eat('.') {
                NodeTest::Parent
            } else {
                NodeTest::SelfNode
            }
        } else {
            let name = self.name();
            if name.is_empty() {
                return Err(self.error("expected a name, '*', '.' or '..'"));
            }
            NodeTest::Name(name)
        };

        let mut predicates = Vec::new();
        while self.eat('[') {
            predicates.push(self.predicate()?);
            if !self.eat(']') {
                return Err(self.error("missing ']'"));
            }
        }
        Ok(Step {
            axis,
            test,
            predicates,
        })
    }

    fn name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == ':' || (c == '.' && self.pos > start) {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn predicate(&mut self) -> Result<Predicate, ConfigurationError> {
        if self.eat('@') {
            let attr = self.name();
            if attr.is_empty() {
                return Err(self.error("expected attribute name after '@'"));
            }
            if !self.eat('=') {
                return Ok(Predicate::HasAttribute(attr));
            }
            let quote = match self.peek() {
                Some(q @ ('\'' | '"')) => q,
                _ => return Err(self.error("expected quoted value")),
            };
            self.pos += 1;
            let start = self.pos;
            while self.peek().is_some_and(|c| c != quote) {
                self.pos += 1;
            }
            if !self.eat(quote) {
                return Err(self.error("unterminated string"));
            }
            let value: String = self.chars[start..self.pos - 1].iter().collect();
            return Ok(Predicate::AttributeEquals(attr, value));
        }

        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        match digits.parse::<usize>() {
            Ok(position) if position > 0 => Ok(Predicate::Position(position)),
            _ => Err(self.error("expected '@attribute' or a position >= 1")),
        }
    }
}
