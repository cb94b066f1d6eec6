//! Ukkonen's phase/extension loop
//!
//! Each appended token is one phase. Within a phase, extensions `j..=i`
//! make sure every suffix `text[j..=i]` is spelled out in the tree. The
//! cursor carried between extensions lets each one start from a suffix link
//! instead of the root, and a phase stops at the first suffix that is
//! already present: every shorter one is then present too. Together with
//! the skip/count walk this bounds total work by the text length.

use super::types::*;
use super::traverse::Walk;
use super::SuffixTree;
use std::ops::Range;
use tracing::trace;

/// State threaded from one extension to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExtensionCursor {
    /// Next suffix start needing explicit work
    pub j: TextPosition,
    /// Node at or above where the previous extension ended
    pub node: NodeId,
    /// Whether the previous extension lets the next one follow a suffix link
    pub can_link_jump: bool,
    /// Internal node created by the previous extension, waiting for its link
    pub pending_link: Option<NodeId>,
}

impl ExtensionCursor {
    pub fn new(start: TextPosition) -> Self {
        Self {
            j: start,
            node: NodeId::ROOT,
            can_link_jump: false,
            pending_link: None,
        }
    }
}

impl<S: Symbol> SuffixTree<S> {
    /// Run one phase per token of `range`, then close the leaves opened on
    /// the way. The tokens must already be in the text buffer.
    pub(crate) fn index_range(&mut self, range: Range<TextPosition>) {
        assert_eq!(
            self.e, range.start,
            "indexing must resume at the end of the indexed text"
        );

        let mut cursor = ExtensionCursor::new(range.start);
        for i in range {
            self.e += 1;
            self.stats.phases += 1;
            self.phase(i, &mut cursor);
        }
        debug_assert!(cursor.pending_link.is_none());

        self.freeze_open_leaves();
    }

    /// Extensions `cursor.j..=i` of phase `i`
    pub(crate) fn phase(&mut self, i: TextPosition, cursor: &mut ExtensionCursor) {
        while cursor.j <= i {
            let j = cursor.j;
            let walk = self.locate(cursor, i);
            self.stats.extensions += 1;

            let mut created = None;
            let (reached, stop) = match walk.rule {
                Rule::Leaf => {
                    // Same terminated suffix seen in an earlier sequence. Keep
                    // going: the shorter suffixes collapse too and need their offsets.
                    self.nodes.get_mut(walk.node).extra_occurrences.push(j);
                    (self.parent_of(walk.node), false)
                }
                Rule::NoChild => {
                    self.attach_leaf(walk.node, i, j);
                    (walk.node, false)
                }
                Rule::Diverged => {
                    let middle = self.split_edge(walk.node, i, j);
                    created = Some(middle);
                    (middle, false)
                }
                Rule::MidEdge | Rule::AtInternal => (self.parent_of(walk.node), true),
            };

            if let Some(prev) = cursor.pending_link.take() {
                self.nodes.set_suffix_link(prev, reached);
            }
            cursor.node = reached;

            if stop {
                cursor.can_link_jump = false;
                return;
            }

            cursor.pending_link = created;
            cursor.can_link_jump = true;
            cursor.j += 1;
        }
    }

    /// Find where `text[cursor.j..=i]` ends, starting from the cursor node
    fn locate(&mut self, cursor: &mut ExtensionCursor, i: TextPosition) -> Walk {
        if cursor.can_link_jump {
            while cursor.node != NodeId::ROOT && self.nodes.get(cursor.node).suffix_link.is_none() {
                cursor.node = self.parent_of(cursor.node);
            }
        }

        let walk = if cursor.node == NodeId::ROOT {
            self.jump_to(NodeId::ROOT, cursor.j, i + 1)
        } else {
            if cursor.can_link_jump {
                let from = cursor.node;
                cursor.node = self
                    .nodes
                    .get(from)
                    .suffix_link
                    .unwrap_or_else(|| panic!("missing suffix link on {}", from));
                self.stats.link_jumps += 1;
            }
            let gamma_start = cursor.j + self.path_length(cursor.node);
            self.jump_to(cursor.node, gamma_start, i + 1)
        };

        self.stats.edge_hops += walk.hops;
        walk
    }

    fn parent_of(&self, node: NodeId) -> NodeId {
        self.nodes
            .get(node)
            .parent
            .unwrap_or_else(|| panic!("{} has no parent", node))
    }

    /// Rule 2: hang a new open leaf for suffix `j` under `parent`
    fn attach_leaf(&mut self, parent: NodeId, i: TextPosition, j: TextPosition) -> NodeId {
        let leaf = self.nodes.new_leaf(parent, j);
        self.nodes.set_child(parent, self.text.token_at(i), leaf);
        self.open_leaves.push(leaf);
        leaf
    }

    /// Rule 3: the walk for `text[j..=i]` diverged on the edge into `child`
    /// at token `i`. Insert an internal node for `text[j..i)` above `child`
    /// and hang a leaf for suffix `j` from it.
    fn split_edge(&mut self, child: NodeId, i: TextPosition, j: TextPosition) -> NodeId {
        let parent = self.parent_of(child);
        let edge_start = self.edge_start(child);
        let parent_len = self.path_length(parent);

        let middle = self.nodes.new_internal(parent, j, i);
        let first = self.text.token_at(edge_start);
        let below = self.text.token_at(edge_start + (i - j - parent_len));

        self.nodes.set_child(parent, first, middle);
        self.nodes.set_child(middle, below, child);
        self.attach_leaf(middle, i, j);
        self.stats.splits += 1;

        trace!(
            node = %middle,
            depth = i - j,
            suffix = j,
            "split edge"
        );
        middle
    }

    /// Close every leaf opened since the last freeze at the current end
    fn freeze_open_leaves(&mut self) {
        let e = self.e;
        for leaf in self.open_leaves.drain(..) {
            let node = self.nodes.get_mut(leaf);
            if node.label_end == LabelEnd::Open {
                node.label_end = LabelEnd::Fixed(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_root() {
        let cursor = ExtensionCursor::new(7);
        assert_eq!(cursor.j, 7);
        assert_eq!(cursor.node, NodeId::ROOT);
        assert!(!cursor.can_link_jump);
        assert!(cursor.pending_link.is_none());
    }

    #[test]
    fn test_aagt_structure() {
        let tree = SuffixTree::from_text("AAGT");

        // AAGT$, AGT$, GT$, T$, $
        assert_eq!(tree.leaf_count(), 5);
        // root, the internal node for "A" and the five leaves
        assert_eq!(tree.node_count(), 7);

        let a = tree.child(NodeId::ROOT, Token::Symbol('A')).unwrap();
        assert!(!tree.node(a).is_leaf());
        assert_eq!(tree.edge_label(a), &[Token::Symbol('A')]);
        assert_eq!(tree.node(a).suffix_link, Some(NodeId::ROOT));

        let aagt = tree.child(a, Token::Symbol('A')).unwrap();
        let agt = tree.child(a, Token::Symbol('G')).unwrap();
        assert!(tree.node(aagt).is_leaf());
        assert!(tree.node(agt).is_leaf());
        assert_eq!(tree.node(aagt).label_start, 0);
        assert_eq!(tree.node(agt).label_start, 1);
        assert_eq!(tree.edge_label(agt).len(), 3); // GT$

        for first in ['G', 'T'] {
            let leaf = tree.child(NodeId::ROOT, Token::Symbol(first)).unwrap();
            assert!(tree.node(leaf).is_leaf());
        }
    }

    #[test]
    fn test_phases_stop_early_on_repeats() {
        let tree = SuffixTree::from_text("AAAA");
        let stats = tree.construction_stats();
        assert_eq!(stats.phases, 5);
        // Four early stops plus one extension per suffix of the last phase
        assert!(stats.extensions <= 2 * 5, "{:?}", stats);
        assert_eq!(tree.leaf_count(), 5);
    }

    #[test]
    fn test_leaves_closed_after_insertion() {
        let tree = SuffixTree::from_text("BANANA");
        for (_, node) in tree.nodes.iter() {
            assert_ne!(node.label_end, LabelEnd::Open);
        }
        assert!(tree.open_leaves.is_empty());
    }

    #[test]
    fn test_internal_nodes_all_linked() {
        let tree = SuffixTree::from_text("MISSISSIPPI");
        for (id, node) in tree.nodes.iter() {
            if node.kind == NodeKind::Internal {
                let target = node.suffix_link.unwrap_or_else(|| panic!("{} unlinked", id));
                assert_eq!(tree.path_length(target) + 1, tree.path_length(id));
            }
        }
    }
}
