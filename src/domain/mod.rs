//! Domain logic - pure version rules independent of git operations

pub mod bump;
pub mod version;

pub use bump::{bump_tag, BumpKind};
pub use version::{Version, BASELINE_TAG, TAG_PREFIX};
