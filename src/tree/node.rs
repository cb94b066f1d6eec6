//! Node arena
//!
//! The store owns every node. Parents and suffix links are plain
//! [`NodeId`]s, so back-references never imply ownership.

use super::types::*;
use rustc_hash::FxHashMap;

/// A node of the suffix tree.
///
/// `label_start..label_end` is the *path* label from the root (the suffix
/// start for leaves), not just the incoming edge; the edge is derived from
/// the parent's path length.
#[derive(Debug, Clone)]
pub struct Node<S> {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub label_start: TextPosition,
    pub label_end: LabelEnd,
    pub children: FxHashMap<Token<S>, NodeId>,
    pub suffix_link: Option<NodeId>,
    /// Further suffix starts sharing this leaf (shared terminators only)
    pub extra_occurrences: Vec<TextPosition>,
}

impl<S: Symbol> Node<S> {
    fn new(
        kind: NodeKind,
        parent: Option<NodeId>,
        label_start: TextPosition,
        label_end: LabelEnd,
    ) -> Self {
        Self {
            kind,
            parent,
            label_start,
            label_end,
            children: FxHashMap::default(),
            suffix_link: None,
            extra_occurrences: Vec::new(),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    /// Start offsets of every suffix ending at this leaf
    pub fn occurrences(&self) -> impl Iterator<Item = TextPosition> + '_ {
        debug_assert!(self.is_leaf());
        std::iter::once(self.label_start).chain(self.extra_occurrences.iter().copied())
    }
}

/// Arena of all tree nodes
#[derive(Debug, Clone)]
pub struct NodeStore<S> {
    nodes: Vec<Node<S>>,
    leaves: usize,
}

impl<S: Symbol> Default for NodeStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> NodeStore<S> {
    /// Create a store holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None, 0, LabelEnd::Fixed(0))],
            leaves: 0,
        }
    }

    fn push(&mut self, node: Node<S>) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("node store exceeds u32::MAX nodes");
        self.nodes.push(node);
        NodeId(id)
    }

    /// Create an open leaf for the suffix starting at `label_start`.
    /// The caller attaches it with [`NodeStore::set_child`].
    pub fn new_leaf(&mut self, parent: NodeId, label_start: TextPosition) -> NodeId {
        self.leaves += 1;
        self.push(Node::new(
            NodeKind::Leaf,
            Some(parent),
            label_start,
            LabelEnd::Open,
        ))
    }

    pub fn new_internal(
        &mut self,
        parent: NodeId,
        label_start: TextPosition,
        label_end: TextPosition,
    ) -> NodeId {
        assert!(
            label_end > label_start,
            "internal node with empty path label {}..{}",
            label_start,
            label_end
        );
        self.push(Node::new(
            NodeKind::Internal,
            Some(parent),
            label_start,
            LabelEnd::Fixed(label_end),
        ))
    }

    /// Attach `child` under `node` for edges starting with `token`,
    /// replacing any previous child for that token.
    pub fn set_child(&mut self, node: NodeId, token: Token<S>, child: NodeId) {
        let parent = &mut self.nodes[node.index()];
        assert!(!parent.is_leaf(), "leaf {} cannot have children", node);
        parent.children.insert(token, child);
        self.nodes[child.index()].parent = Some(node);
    }

    #[inline]
    pub fn get_child(&self, node: NodeId, token: Token<S>) -> Option<NodeId> {
        self.nodes[node.index()].children.get(&token).copied()
    }

    pub fn set_suffix_link(&mut self, node: NodeId, target: NodeId) {
        assert!(
            !self.nodes[target.index()].is_leaf(),
            "suffix link from {} points at leaf {}",
            node,
            target
        );
        assert!(
            self.nodes[node.index()].kind == NodeKind::Internal,
            "suffix link set on non-internal node {}",
            node
        );
        self.nodes[node.index()].suffix_link = Some(target);
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included; never zero
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_with_root() {
        let store: NodeStore<char> = NodeStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.leaf_count(), 0);
        let root = store.get(store.root());
        assert!(root.is_root());
        assert_eq!(root.label_start, 0);
        assert_eq!(root.label_end, LabelEnd::Fixed(0));
    }

    #[test]
    fn test_children_keyed_by_first_token() {
        let mut store: NodeStore<char> = NodeStore::new();
        let root = store.root();
        let a = store.new_leaf(root, 0);
        store.set_child(root, Token::Symbol('a'), a);
        let b = store.new_leaf(root, 1);
        store.set_child(root, Token::Symbol('b'), b);

        assert_eq!(store.get_child(root, Token::Symbol('a')), Some(a));
        assert_eq!(store.get_child(root, Token::Symbol('b')), Some(b));
        assert_eq!(store.get_child(root, Token::Symbol('c')), None);
        assert_eq!(store.get(a).parent, Some(root));
        assert_eq!(store.leaf_count(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot have children")]
    fn test_leaf_rejects_children() {
        let mut store: NodeStore<char> = NodeStore::new();
        let root = store.root();
        let leaf = store.new_leaf(root, 0);
        store.set_child(root, Token::Symbol('a'), leaf);
        let other = store.new_leaf(root, 1);
        store.set_child(leaf, Token::Symbol('b'), other);
    }

    #[test]
    #[should_panic(expected = "points at leaf")]
    fn test_suffix_link_to_leaf_panics() {
        let mut store: NodeStore<char> = NodeStore::new();
        let root = store.root();
        let inner = store.new_internal(root, 0, 2);
        store.set_child(root, Token::Symbol('a'), inner);
        let leaf = store.new_leaf(inner, 0);
        store.set_child(inner, Token::Symbol('c'), leaf);
        store.set_suffix_link(inner, leaf);
    }
}
