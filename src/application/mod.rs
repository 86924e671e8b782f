//! Application layer: the view tree and its default collaborators
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod factory;
pub mod render;
pub mod tree;

pub use error::{ApplicationError, ApplicationResult, CollaboratorError};
pub use factory::RequestNodeFactory;
pub use render::TreeNodeConvert;
pub use tree::{RowIter, TreeDeps, ViewTree};
