//! Core transformation engine for marktags: split a markdown document into
//! frontmatter and body, mutate the `tags`/`aliases` fields, and rebuild the
//! document deterministically.
//!
//! The engine is pure text-in/text-out: no I/O happens inside
//! [`transform`], and a call that produces no semantic change returns its
//! input byte-for-byte so callers can detect no-ops by string equality.
//! YAML comments inside the frontmatter block are not preserved across a
//! rewrite; documents the engine does not change keep them untouched.

pub mod frontmatter;
pub mod io;
pub mod ordering;
pub mod tags;
pub mod transform;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use frontmatter::{FrontmatterError, SplitDocument};
pub use ordering::{Order, OrderParseError};
pub use tags::TagDelta;
pub use transform::{Mode, ModeParseError, TransformError, transform};
