//! Foundational data structures for the gravel build-graph generator:
//! an insertion-ordered deduplicating collection and the two-root
//! directory/file path value types used as keys throughout the graph.

pub mod collections;
pub mod paths;

// Re-export commonly used types for easier access
pub use collections::OrderedSet;
pub use paths::{Blame, DirPath, DriveStyle, FilePath, ResolveError, ResolveErrorKind};
