//! Hierarchical registry of named views over a collection of items.
//!
//! A [`ViewTree`](application::ViewTree) holds top-level views; container views nest
//! further views. Names resolve top-level first, then through containers left to right.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
