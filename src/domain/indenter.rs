//! Row indentation strategies for rendering a flattened tree.

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::NodeRef;

/// One line of a flattened tree: a view and how deep it sits.
///
/// Top-level views have depth 0.
#[derive(Debug, Clone)]
pub struct Row {
    pub node: NodeRef,
    pub depth: usize,
}

/// Deepest indentation a row is ever given.
pub const MAX_INDENT_DEPTH: usize = 256;

/// Decides how far a row is indented.
pub trait Indenter: Send + Sync {
    fn nest_level(&self, row: &Row) -> usize;

    /// Two spaces per nesting level, capped at `MAX_INDENT_DEPTH`.
    fn indent(&self, row: &Row) -> String {
        "  ".repeat(self.nest_level(row).min(MAX_INDENT_DEPTH))
    }
}

/// Same indentation for every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndenter {
    depth: usize,
}

impl FixedIndenter {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Parse the depth from user input, e.g. a query or CLI argument.
    ///
    /// Depths above `MAX_INDENT_DEPTH` are rejected.
    pub fn parse(depth: &str) -> DomainResult<Self> {
        match depth.trim().parse::<usize>() {
            Ok(n) if n <= MAX_INDENT_DEPTH => Ok(Self::new(n)),
            _ => Err(DomainError::InvalidDepth(depth.to_string())),
        }
    }
}

impl Indenter for FixedIndenter {
    fn nest_level(&self, _row: &Row) -> usize {
        self.depth
    }
}

/// Indentation follows the row's real position in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeDepthIndenter;

impl Indenter for TreeDepthIndenter {
    fn nest_level(&self, row: &Row) -> usize {
        row.depth
    }
}

/// Configured choice of indenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum IndentStrategy {
    Fixed { depth: usize },
    TreeDepth,
}

impl Default for IndentStrategy {
    fn default() -> Self {
        IndentStrategy::Fixed { depth: 0 }
    }
}

impl IndentStrategy {
    pub fn indenter(&self) -> Box<dyn Indenter> {
        match *self {
            IndentStrategy::Fixed { depth } => Box::new(FixedIndenter::new(depth)),
            IndentStrategy::TreeDepth => Box::new(TreeDepthIndenter),
        }
    }
}
