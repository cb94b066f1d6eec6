//! Suffix tree error types.

use thiserror::Error;

use crate::tree::{NodeId, SequenceId};

/// Result type for suffix tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors reported by the suffix tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A sequence was indexed without terminator, so its implicit suffixes
    /// can no longer be extended.
    #[error("sequence {sequence} was added without terminator; no further sequence can follow")]
    Unterminated { sequence: SequenceId },

    /// Every terminator id is taken, so no terminator can be synthesized.
    #[error("terminator ids exhausted; pass explicit terminators instead")]
    TerminatorsExhausted,

    /// A structural invariant does not hold.
    #[error("invariant violated at node {node}: {reason}")]
    Invariant { node: NodeId, reason: String },
}
