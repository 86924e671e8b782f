//! Domain layer: view nodes, name bookkeeping and indentation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod children;
pub mod entities;
pub mod error;
pub mod indenter;
pub mod name_set;
pub mod node;

pub use children::ChildList;
pub use entities::*;
pub use error::{AccessDenied, DomainError, DomainResult};
pub use indenter::{
    FixedIndenter, IndentStrategy, Indenter, Row, TreeDepthIndenter, MAX_INDENT_DEPTH,
};
pub use name_set::NameSet;
pub use node::{validate_name, NodeKind, NodeRef, ViewNode};
