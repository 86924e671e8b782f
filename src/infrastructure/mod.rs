//! Infrastructure layer: boundary traits, real adapters and DI container
//!
//! This layer implements I/O boundary traits and wires up the tree.

pub mod di;
pub mod error;
pub mod permissions;
pub mod store;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use permissions::StaticPermissions;
pub use store::{StoreDocument, TomlStore};
