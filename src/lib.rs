//! # stree - Online Generalized Suffix Trees
//!
//! `stree` builds a suffix tree incrementally with Ukkonen's algorithm: each
//! appended symbol extends the tree in amortized constant time, and several
//! sequences can share one tree. Once built, substring queries run in time
//! proportional to the query length, independent of the indexed text.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Text buffer, node arena, construction and queries
//! - [`error`] - Error types
//! - [`output`] - Result formatting for the command line
//! - [`utils`] - Config loading, input splitting, progress reporting
//!
//! ## Quick Start
//!
//! ```
//! use stree::SuffixTree;
//!
//! let mut tree = SuffixTree::new();
//! tree.add_str("BANANA").unwrap();
//! tree.add_str("ANANAS").unwrap();
//!
//! assert!(tree.contains_str("NANA"));
//! assert!(!tree.contains_str("NANAB"));
//! assert_eq!(tree.count_occurrences(&['A', 'N', 'A']), 4);
//! ```
//!
//! ## Sequences and terminators
//!
//! By default every sequence is closed with its own terminator, so suffixes
//! of different sequences never merge and every match can be traced back to
//! the sequence it came from. [`TerminatorPolicy::Shared`] uses a single
//! terminator instead and records collapsed suffixes on the shared leaf.

pub mod error;
pub mod output;
pub mod tree;
pub mod utils;

pub use error::{Result, TreeError};
pub use tree::{
    ConstructionStats, NodeId, Occurrence, SuffixTree, Symbol, TerminatorPolicy, Token,
    TreeConfig, TreeSummary,
};
