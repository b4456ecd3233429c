//! Error types for pipeline compilation, tree parsing and guarded access.
//!
//! All of these are local, synchronous failures. Reference-table misses are
//! not errors: lookups return `None` instead.

use thiserror::Error;

/// Errors raised while flattening an annotator graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A step depends (directly or transitively) on a step with its own name.
    #[error("annotator dependency cycle: `{step}` reached again via {}", path.join(" -> "))]
    Cycle { step: String, path: Vec<String> },

    /// A step key that the standard catalog does not know.
    #[error("unknown annotator `{key}`")]
    UnknownAnnotator { key: String },
}

/// Errors raised while building or binding a constituency tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Input was empty or contained only whitespace.
    #[error("empty tree notation")]
    Empty,

    /// A `)` appeared with no open group.
    #[error("unbalanced `)` at byte {position}")]
    UnbalancedClose { position: usize },

    /// Input ended while groups were still open.
    #[error("{open} unclosed group(s) at end of input")]
    Unclosed { open: usize },

    /// More than one top-level group.
    #[error("expected a single root group, found {count}")]
    MultipleRoots { count: usize },

    /// Non-whitespace text outside of any group.
    #[error("text outside of any group at byte {position}")]
    StrayText { position: usize },

    /// Leaves cannot be bound to tokens by position.
    #[error("tree has {leaves} leaves but the sentence has {tokens} tokens")]
    LeafTokenMismatch { leaves: usize, tokens: usize },
}

/// Errors raised by guarded accessors on annotated units of text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The step producing this data has not been satisfied.
    #[error("asked for {what}, but the `{step}` annotator has not been run")]
    MissingAnnotator { what: &'static str, step: String },

    /// Index past the end of the available items.
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

/// Errors raised while loading reference tables.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The RON source could not be parsed into tables.
    #[error("malformed reference tables: {0}")]
    Malformed(#[from] ron::error::SpannedError),
}
