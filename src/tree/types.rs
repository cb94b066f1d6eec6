//! Types for suffix tree construction
//!
//! This module defines the core types shared by the text buffer, the node
//! arena, the traversal routines and the extension loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Position in the text buffer
pub type TextPosition = usize;

/// Index of a sequence in insertion order
pub type SequenceId = usize;

/// Identifier carried by a terminator token
pub type TerminatorId = u32;

/// Anything the tree can index: only equality and hashing are required.
pub trait Symbol: Copy + Eq + Hash + fmt::Debug {}

impl<T: Copy + Eq + Hash + fmt::Debug> Symbol for T {}

/// Element of the text buffer.
///
/// Terminators are a separate variant, so they can never collide with a
/// real alphabet symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<S> {
    Symbol(S),
    Terminator(TerminatorId),
}

impl<S> Token<S> {
    #[inline]
    pub fn is_terminator(&self) -> bool {
        matches!(self, Token::Terminator(_))
    }

    #[inline]
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Token::Symbol(s) => Some(s),
            Token::Terminator(_) => None,
        }
    }
}

impl<S: fmt::Display> fmt::Display for Token<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Terminator(0) => write!(f, "$"),
            Token::Terminator(id) => write!(f, "${}", id),
        }
    }
}

/// Index of a node in the node store (arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root is always the first node allocated
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// End of a node's path label.
///
/// Leaves are created `Open` and follow the global end `e` until the
/// insertion that created them is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelEnd {
    Fixed(TextPosition),
    Open,
}

impl LabelEnd {
    /// Resolve against the current global end
    #[inline]
    pub fn resolve(self, e: TextPosition) -> TextPosition {
        match self {
            LabelEnd::Fixed(end) => end,
            LabelEnd::Open => e,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Internal,
    Leaf,
}

/// How a walk down the tree ended.
///
/// The numbering follows the classic presentation of Ukkonen's extension
/// rules, with rule 5 split out of rule 4 for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// 1: the whole string was consumed exactly at a leaf
    Leaf,
    /// 2: no outgoing edge of the reached node starts with the next token
    NoChild,
    /// 3: the string diverges from the edge label partway along the edge
    Diverged,
    /// 4: the string ends partway along an edge
    MidEdge,
    /// 5: the string ends exactly at an internal node (or the root)
    AtInternal,
}

impl Rule {
    /// Whether the walked string is present in the tree
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, Rule::Leaf | Rule::MidEdge | Rule::AtInternal)
    }

    pub fn number(self) -> u8 {
        match self {
            Rule::Leaf => 1,
            Rule::NoChild => 2,
            Rule::Diverged => 3,
            Rule::MidEdge => 4,
            Rule::AtInternal => 5,
        }
    }
}

/// How terminators are assigned to inserted sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerminatorPolicy {
    /// Every sequence gets its own terminator; no two suffixes of different
    /// sequences ever share a leaf.
    #[default]
    Unique,
    /// All sequences share one terminator; identical terminated suffixes
    /// collapse onto one leaf which records every start offset.
    Shared,
}

/// Configuration for suffix tree building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Terminator assignment (default: unique per sequence)
    #[serde(default)]
    pub terminators: TerminatorPolicy,
    /// Run the full invariant check after every insertion (default: false)
    #[serde(default = "default_verify_after_insert")]
    pub verify_after_insert: bool,
}

fn default_verify_after_insert() -> bool {
    false
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            terminators: TerminatorPolicy::default(),
            verify_after_insert: default_verify_after_insert(),
        }
    }
}

/// A start offset of a matched pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Occurrence {
    /// Global position in the text buffer
    pub offset: TextPosition,
    /// Sequence the position belongs to
    pub sequence: SequenceId,
    /// Position within that sequence
    pub position: usize,
}

/// Work counters collected during construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConstructionStats {
    /// Tokens consumed (one phase each)
    pub phases: u64,
    /// Extensions that did explicit work, including the terminating one
    pub extensions: u64,
    /// Edges descended by the skip/count walk
    pub edge_hops: u64,
    /// Suffix links followed
    pub link_jumps: u64,
    /// Edge splits (rule 3)
    pub splits: u64,
}

/// Summary of a tree, as printed by the `stats` command
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub sequences: usize,
    pub text_len: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub internal_nodes: usize,
    pub terminators: TerminatorPolicy,
    pub construction: ConstructionStats,
}
