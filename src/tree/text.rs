//! Append-only text buffer
//!
//! All sequences are concatenated into one token vector. Edge labels are
//! offset pairs into this buffer, so offsets handed out once stay valid for
//! the life of the tree.

use super::types::*;
use std::ops::Range;

/// Concatenated tokens of every inserted sequence
#[derive(Debug, Clone)]
pub struct TextBuffer<S> {
    tokens: Vec<Token<S>>,
    /// Span of each inserted sequence, in insertion order
    spans: Vec<Range<TextPosition>>,
}

impl<S: Symbol> Default for TextBuffer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> TextBuffer<S> {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Append tokens, returning the offsets just added
    pub fn append<I>(&mut self, tokens: I) -> Range<TextPosition>
    where
        I: IntoIterator<Item = Token<S>>,
    {
        let start = self.tokens.len();
        self.tokens.extend(tokens);
        start..self.tokens.len()
    }

    /// Record that `range` holds one inserted sequence
    pub fn push_span(&mut self, range: Range<TextPosition>) -> SequenceId {
        debug_assert!(range.end <= self.tokens.len());
        debug_assert!(self.spans.last().is_none_or(|last| last.end <= range.start));
        self.spans.push(range);
        self.spans.len() - 1
    }

    #[inline]
    pub fn token_at(&self, offset: TextPosition) -> Token<S> {
        self.tokens[offset]
    }

    #[inline]
    pub fn slice(&self, range: Range<TextPosition>) -> &[Token<S>] {
        &self.tokens[range]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn spans(&self) -> &[Range<TextPosition>] {
        &self.spans
    }

    /// Find the sequence containing a global position using binary search
    pub fn sequence_of(&self, pos: TextPosition) -> Option<SequenceId> {
        self.spans
            .binary_search_by(|span| {
                if pos < span.start {
                    std::cmp::Ordering::Greater
                } else if pos >= span.end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()
    }

    /// Map a global position to an [`Occurrence`]
    pub fn occurrence(&self, offset: TextPosition) -> Option<Occurrence> {
        let sequence = self.sequence_of(offset)?;
        Some(Occurrence {
            offset,
            sequence,
            position: offset - self.spans[sequence].start,
        })
    }
}
