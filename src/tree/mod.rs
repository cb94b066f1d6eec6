//! Online suffix tree
//!
//! This module builds a generalized suffix tree with Ukkonen's algorithm and
//! answers substring queries over it.
//!
//! ## Architecture
//!
//! - `text`: Append-only buffer holding every inserted token
//! - `node`: Arena owning all nodes, addressed by [`NodeId`]
//! - `traverse`: Skip/count and token-by-token descents
//! - `extend`: The phase/extension loop
//! - `query`: Substring, occurrence and motif queries
//! - `verify`: Structural invariant checks
//! - `types`: Core type definitions
//!
//! ## Sequences and terminators
//!
//! Every sequence normally ends with a [`Token::Terminator`], so each of its
//! suffixes ends at a leaf. Sequences are indexed one after another into the
//! same tree; a sequence inserted without terminator leaves the tree
//! implicit and must be the last one.

pub mod extend;
pub mod node;
pub mod query;
pub mod render;
pub mod text;
pub mod traverse;
pub mod types;
pub mod verify;

pub use node::{Node, NodeStore};
pub use text::TextBuffer;
pub use traverse::Walk;
pub use types::*;

use crate::error::{Result, TreeError};
use std::ops::Range;
use tracing::debug;

/// Generalized suffix tree over symbols of type `S`
#[derive(Debug, Clone)]
pub struct SuffixTree<S> {
    config: TreeConfig,
    text: TextBuffer<S>,
    nodes: NodeStore<S>,
    /// End of the text visible to the tree
    e: TextPosition,
    /// Leaves created by the insertion in progress
    open_leaves: Vec<NodeId>,
    /// Next terminator id handed out under [`TerminatorPolicy::Unique`],
    /// past `TerminatorId::MAX` once every id is taken
    next_terminator: u64,
    /// Set once a sequence was indexed without terminator
    unterminated: Option<SequenceId>,
    stats: ConstructionStats,
}

impl<S: Symbol> Default for SuffixTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> SuffixTree<S> {
    /// Create an empty tree with default configuration
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config,
            text: TextBuffer::new(),
            nodes: NodeStore::new(),
            e: 0,
            open_leaves: Vec::new(),
            next_terminator: 1,
            unterminated: None,
            stats: ConstructionStats::default(),
        }
    }

    /// Add a sequence of symbols.
    ///
    /// With `auto_terminate` a terminator is appended, so every suffix of
    /// the sequence ends at a leaf. Without it the tree stays implicit and no
    /// further sequence can be added.
    ///
    /// Returns the text offsets occupied by the sequence (empty for an empty
    /// input, which is a no-op).
    pub fn add_sequence(&mut self, symbols: &[S], auto_terminate: bool) -> Result<Range<TextPosition>> {
        let tokens: Vec<Token<S>> = symbols.iter().copied().map(Token::Symbol).collect();
        self.add_tokens(&tokens, auto_terminate)
    }

    /// Add tokens that may already carry terminators.
    ///
    /// The input is split after every terminator and each piece is indexed
    /// as its own sequence. A trailing unterminated piece gets a synthesized
    /// terminator when `auto_terminate` is set.
    pub fn add_tokens(&mut self, tokens: &[Token<S>], auto_terminate: bool) -> Result<Range<TextPosition>> {
        let start = self.text.len();
        if tokens.is_empty() {
            return Ok(start..start);
        }
        if let Some(sequence) = self.unterminated {
            return Err(TreeError::Unterminated { sequence });
        }

        // Reserve the trailing terminator before touching the text buffer
        let floor = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Terminator(id) => Some(u64::from(*id) + 1),
                Token::Symbol(_) => None,
            })
            .fold(self.next_terminator, u64::max);
        let ends_terminated = tokens.last().is_some_and(Token::is_terminator);
        let tail = if auto_terminate && !ends_terminated {
            Some(self.synthesize_terminator(floor)?)
        } else {
            None
        };
        self.next_terminator = self.next_terminator.max(floor);

        let mut pieces = tokens.split_inclusive(|t| t.is_terminator()).peekable();
        while let Some(piece) = pieces.next() {
            let terminated = piece.last().is_some_and(Token::is_terminator);
            // Only the last piece can lack a terminator
            let terminator = if terminated { None } else { tail };

            let range = self.text.append(piece.iter().copied().chain(terminator));
            let sequence = self.text.push_span(range.clone());
            self.index_range(range.clone());

            if !terminated && terminator.is_none() {
                self.unterminated = Some(sequence);
                debug_assert!(pieces.peek().is_none());
            }

            debug!(
                sequence,
                len = range.len(),
                nodes = self.nodes.len(),
                leaves = self.nodes.leaf_count(),
                terminated = self.unterminated.is_none(),
                "indexed sequence"
            );

            if self.config.verify_after_insert {
                if let Err(err) = self.check_invariants() {
                    panic!("suffix tree corrupted by sequence {}: {}", sequence, err);
                }
            }
        }

        Ok(start..self.text.len())
    }

    /// Hand out a terminator id no lower than `floor`
    fn synthesize_terminator(&mut self, floor: u64) -> Result<Token<S>> {
        match self.config.terminators {
            TerminatorPolicy::Shared => Ok(Token::Terminator(0)),
            TerminatorPolicy::Unique => {
                let next = self.next_terminator.max(floor);
                let id = TerminatorId::try_from(next).map_err(|_| TreeError::TerminatorsExhausted)?;
                self.next_terminator = next + 1;
                Ok(Token::Terminator(id))
            }
        }
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.leaf_count()
    }

    /// Number of sequences indexed so far
    pub fn sequence_count(&self) -> usize {
        self.text.spans().len()
    }

    /// Total tokens indexed, terminators included
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    pub fn text(&self) -> &TextBuffer<S> {
        &self.text
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Whether every inserted sequence was terminated
    pub fn is_explicit(&self) -> bool {
        self.unterminated.is_none()
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node<S> {
        self.nodes.get(id)
    }

    pub fn child(&self, node: NodeId, token: Token<S>) -> Option<NodeId> {
        self.nodes.get_child(node, token)
    }

    pub fn construction_stats(&self) -> ConstructionStats {
        self.stats
    }

    /// Counts describing the tree and how it was built
    pub fn stats(&self) -> TreeSummary {
        TreeSummary {
            sequences: self.sequence_count(),
            text_len: self.text_len(),
            nodes: self.node_count(),
            leaves: self.leaf_count(),
            internal_nodes: self.node_count() - self.leaf_count() - 1,
            terminators: self.config.terminators,
            construction: self.stats,
        }
    }
}

impl SuffixTree<char> {
    /// Build a tree over one terminated string
    pub fn from_text(text: &str) -> Self {
        let mut tree = Self::new();
        tree.add_str(text)
            .expect("a fresh tree accepts any sequence");
        tree
    }

    /// Add a string as one terminated sequence
    pub fn add_str(&mut self, text: &str) -> Result<Range<TextPosition>> {
        let tokens: Vec<Token<char>> = text.chars().map(Token::Symbol).collect();
        self.add_tokens(&tokens, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_is_noop() {
        let mut tree: SuffixTree<char> = SuffixTree::new();
        let range = tree.add_sequence(&[], true).unwrap();
        assert!(range.is_empty());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.sequence_count(), 0);
    }

    #[test]
    fn test_leaf_count_is_length_plus_one() {
        let mut tree = SuffixTree::new();
        let seq: Vec<char> = "GATTACA".chars().collect();
        let range = tree.add_sequence(&seq, true).unwrap();
        assert_eq!(range, 0..8);
        assert_eq!(tree.leaf_count(), seq.len() + 1);
    }

    #[test]
    fn test_unique_terminators_per_sequence() {
        let mut tree = SuffixTree::new();
        tree.add_str("AB").unwrap();
        tree.add_str("AB").unwrap();
        let t1 = tree.text().token_at(2);
        let t2 = tree.text().token_at(5);
        assert!(t1.is_terminator() && t2.is_terminator());
        assert_ne!(t1, t2);
        // No suffix of one copy collapses onto the other
        assert_eq!(tree.leaf_count(), 6);
    }

    #[test]
    fn test_explicit_terminators_split_sequences() {
        let mut tree = SuffixTree::new();
        let tokens = [
            Token::Symbol('x'),
            Token::Terminator(7),
            Token::Symbol('y'),
            Token::Symbol('x'),
            Token::Terminator(8),
        ];
        tree.add_tokens(&tokens, false).unwrap();
        assert_eq!(tree.sequence_count(), 2);
        assert_eq!(tree.leaf_count(), 5);
        assert!(tree.is_explicit());

        // Synthesized terminators never reuse caller ids
        tree.add_str("z").unwrap();
        assert_eq!(tree.text().token_at(6), Token::Terminator(9));
    }

    #[test]
    fn test_terminator_ids_exhausted() {
        let mut tree = SuffixTree::new();
        tree.add_tokens(&[Token::Symbol('a'), Token::Terminator(u32::MAX - 1)], false)
            .unwrap();
        // The last free id still goes out
        tree.add_str("b").unwrap();
        assert_eq!(tree.text().token_at(3), Token::Terminator(u32::MAX));

        let before = (tree.text_len(), tree.node_count(), tree.sequence_count());
        let err = tree.add_str("c").unwrap_err();
        assert_eq!(err, TreeError::TerminatorsExhausted);
        assert_eq!(
            (tree.text_len(), tree.node_count(), tree.sequence_count()),
            before
        );

        // Caller terminators and unterminated input are still accepted
        tree.add_tokens(&[Token::Symbol('c'), Token::Terminator(5)], false)
            .unwrap();
        tree.add_sequence(&['d'], false).unwrap();
        assert!(tree.contains_str("c"));
        assert!(tree.contains_str("d"));
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_caller_max_terminator_then_auto_terminate() {
        let mut tree = SuffixTree::new();
        tree.add_tokens(&[Token::Symbol('a'), Token::Terminator(u32::MAX)], false)
            .unwrap();
        assert_eq!(tree.add_str("b"), Err(TreeError::TerminatorsExhausted));
        assert_eq!(tree.text_len(), 2);
        assert_eq!(tree.sequence_count(), 1);

        // Shared terminators never run out
        let mut shared = SuffixTree::with_config(TreeConfig {
            terminators: TerminatorPolicy::Shared,
            ..Default::default()
        });
        shared.add_tokens(&[Token::Symbol('a'), Token::Terminator(u32::MAX)], false)
            .unwrap();
        shared.add_str("b").unwrap();
        assert_eq!(shared.sequence_count(), 2);
    }

    #[test]
    fn test_unterminated_sequence_must_be_last() {
        let mut tree = SuffixTree::new();
        let seq: Vec<char> = "ABAB".chars().collect();
        tree.add_sequence(&seq, false).unwrap();
        assert!(!tree.is_explicit());
        assert!(tree.contains_substring(&['B', 'A', 'B']));

        let err = tree.add_sequence(&['C'], true).unwrap_err();
        assert_eq!(err, TreeError::Unterminated { sequence: 0 });
        // Empty input stays a no-op even then
        assert!(tree.add_sequence(&[], true).unwrap().is_empty());
    }

    #[test]
    fn test_stats_counts() {
        let tree = SuffixTree::from_text("AAGT");
        let summary = tree.stats();
        assert_eq!(summary.sequences, 1);
        assert_eq!(summary.text_len, 5);
        assert_eq!(summary.leaves, 5);
        assert_eq!(summary.internal_nodes, 1);
        assert_eq!(summary.construction.phases, 5);
    }
}
