//! Domain logic - pure version rules independent of git operations

pub mod tag;
pub mod version;

pub use version::{BumpKind, SemanticVersion};
