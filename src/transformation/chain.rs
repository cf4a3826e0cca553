//! Transformation chains

use std::fmt;

use super::action::Action;
use super::compiler;

/// One element of a chain: an action or a whole nested chain
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Action(Action),
    Transformation(Transformation),
}

impl From<Action> for Node {
    fn from(action: Action) -> Self {
        Node::Action(action)
    }
}

impl From<Transformation> for Node {
    fn from(transformation: Transformation) -> Self {
        Node::Transformation(transformation)
    }
}

/// An ordered chain of actions, rendered as `/`-joined segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transformation {
    nodes: Vec<Node>,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action or another chain
    pub fn chain(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Canonical string; empty when nothing renders
    pub fn render(&self) -> String {
        compiler::compile(self)
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromIterator<Action> for Transformation {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(Node::Action).collect(),
        }
    }
}

impl From<Action> for Transformation {
    fn from(action: Action) -> Self {
        Self::new().chain(action)
    }
}
