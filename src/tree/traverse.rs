//! Walking down the tree
//!
//! Two descents share the same outcome classification ([`Rule`]):
//!
//! - [`SuffixTree::jump_to`] is the skip/count walk used during
//!   construction. It hops whole edges by their length and only compares the
//!   last token of the final edge, which is what keeps construction linear.
//! - [`SuffixTree::walk_to`] compares every token and works for arbitrary
//!   queries once the tree is built.
//!
//! Edge lengths are derived from path lengths rather than stored, so open
//! leaves grow as the global end `e` advances without being touched.

use super::types::*;
use super::SuffixTree;

/// Where a walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walk {
    /// For [`Rule::NoChild`] the node whose children were searched; for
    /// [`Rule::Diverged`] and [`Rule::MidEdge`] the child below the edge the
    /// walk stopped on; otherwise the node the walk ended at.
    pub node: NodeId,
    pub rule: Rule,
    /// Query tokens matched before the walk stopped (slow walk only)
    pub matched: usize,
    /// Edges descended
    pub hops: u64,
}

impl<S: Symbol> SuffixTree<S> {
    /// Length of the path label from the root to `node`
    #[inline]
    pub(crate) fn path_length(&self, node: NodeId) -> usize {
        let n = self.nodes.get(node);
        n.label_end.resolve(self.e) - n.label_start
    }

    /// Length of the edge entering `node` (0 for the root)
    pub(crate) fn edge_length(&self, node: NodeId) -> usize {
        let Some(parent) = self.nodes.get(node).parent else {
            return 0;
        };
        let child_len = self.path_length(node);
        let parent_len = self.path_length(parent);
        assert!(
            child_len > parent_len,
            "non-positive edge length {} into {} (path {}, parent {} path {})",
            child_len as isize - parent_len as isize,
            node,
            child_len,
            parent,
            parent_len
        );
        child_len - parent_len
    }

    /// Text offset where the edge entering `node` starts
    #[inline]
    pub(crate) fn edge_start(&self, node: NodeId) -> TextPosition {
        let n = self.nodes.get(node);
        match n.parent {
            Some(parent) => n.label_start + self.path_length(parent),
            None => n.label_start,
        }
    }

    /// Tokens on the edge entering `node`
    pub fn edge_label(&self, node: NodeId) -> &[Token<S>] {
        if node == NodeId::ROOT {
            return &[];
        }
        let start = self.edge_start(node);
        let end = self.nodes.get(node).label_end.resolve(self.e);
        self.text.slice(start..end)
    }

    /// Tokens on the whole path from the root to `node`
    pub fn path_label(&self, node: NodeId) -> &[Token<S>] {
        let n = self.nodes.get(node);
        self.text
            .slice(n.label_start..n.label_end.resolve(self.e))
    }

    /// Skip/count descent from `start` along `text[from..to)`.
    ///
    /// Everything but the last token of the range must already be spelled
    /// out below `start`; only the final token is compared.
    pub(crate) fn jump_to(&self, start: NodeId, from: TextPosition, to: TextPosition) -> Walk {
        if from == to {
            return Walk {
                node: start,
                rule: Rule::AtInternal,
                matched: 0,
                hops: 0,
            };
        }

        let mut current = start;
        let mut from = from;
        let mut hops = 0;

        loop {
            assert!(
                !self.nodes.get(current).is_leaf(),
                "skip/count walk descended through leaf {} (from {} to {}, started at {})",
                current,
                from,
                to,
                start
            );

            let Some(child) = self.nodes.get_child(current, self.text.token_at(from)) else {
                assert!(
                    from + 1 == to,
                    "skip/count walk left the tree at {} with {} tokens to go",
                    current,
                    to - from
                );
                return Walk {
                    node: current,
                    rule: Rule::NoChild,
                    matched: 0,
                    hops,
                };
            };
            hops += 1;

            let edge_len = self.edge_length(child);
            let remaining = to - from;
            if edge_len >= remaining {
                let last = self.edge_start(child) + remaining - 1;
                let rule = if self.text.token_at(last) == self.text.token_at(to - 1) {
                    if edge_len == remaining {
                        if self.nodes.get(child).is_leaf() {
                            Rule::Leaf
                        } else {
                            Rule::AtInternal
                        }
                    } else {
                        Rule::MidEdge
                    }
                } else {
                    Rule::Diverged
                };
                return Walk {
                    node: child,
                    rule,
                    matched: 0,
                    hops,
                };
            }

            from += edge_len;
            current = child;
        }
    }

    /// Token-by-token descent from `start` along `query`.
    ///
    /// `lift` turns query items into tokens, so symbol slices can be walked
    /// without copying them into a token vector first.
    pub(crate) fn walk_to<T: Copy>(
        &self,
        start: NodeId,
        query: &[T],
        lift: impl Fn(T) -> Token<S>,
    ) -> Walk {
        let mut current = start;
        let mut pos = 0;
        let mut hops = 0;

        if query.is_empty() {
            let rule = if self.nodes.get(start).is_leaf() {
                Rule::Leaf
            } else {
                Rule::AtInternal
            };
            return Walk {
                node: start,
                rule,
                matched: 0,
                hops,
            };
        }

        loop {
            let Some(child) = self.nodes.get_child(current, lift(query[pos])) else {
                return Walk {
                    node: current,
                    rule: Rule::NoChild,
                    matched: pos,
                    hops,
                };
            };
            hops += 1;

            let label = self.edge_label(child);
            let remaining = query.len() - pos;
            let n = label.len().min(remaining);

            // First token already matched through the child key
            let mut k = 1;
            while k < n && label[k] == lift(query[pos + k]) {
                k += 1;
            }
            if k < n {
                return Walk {
                    node: child,
                    rule: Rule::Diverged,
                    matched: pos + k,
                    hops,
                };
            }

            pos += n;
            if remaining < label.len() {
                return Walk {
                    node: child,
                    rule: Rule::MidEdge,
                    matched: pos,
                    hops,
                };
            }

            let is_leaf = self.nodes.get(child).is_leaf();
            if remaining == label.len() {
                let rule = if is_leaf { Rule::Leaf } else { Rule::AtInternal };
                return Walk {
                    node: child,
                    rule,
                    matched: pos,
                    hops,
                };
            }
            if is_leaf {
                // Query runs past the end of a suffix
                return Walk {
                    node: child,
                    rule: Rule::NoChild,
                    matched: pos,
                    hops,
                };
            }
            current = child;
        }
    }
}
