//! In-memory translation data model.
//!
//! The model is built incrementally by one parser run, then treated as
//! read-only input by the writers. Nothing here persists between runs; only
//! the serialized module/catalog forms do.
//!
//! Containers are insertion-ordered on purpose: file-then-message traversal
//! order decides which duplicate occurrence the duplicate-text validator
//! reports and which fallback translation the catalog writer picks.

mod file;
mod message;
mod package;
mod translation;
mod tree;

pub use file::{File, ParsedFileName};
pub use message::Message;
pub use package::Package;
pub use translation::Translation;
pub use tree::Node;
