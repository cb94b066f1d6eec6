//! Structural invariant checks
//!
//! Construction panics as soon as it notices a broken invariant. This module
//! checks the whole tree at once, for tests and for
//! [`TreeConfig::verify_after_insert`].

use super::types::*;
use super::SuffixTree;
use crate::error::{Result, TreeError};

fn violation(node: NodeId, reason: impl Into<String>) -> TreeError {
    TreeError::Invariant {
        node,
        reason: reason.into(),
    }
}

impl<S: Symbol> SuffixTree<S> {
    /// Check every structural invariant of the tree
    pub fn check_invariants(&self) -> Result<()> {
        let root = self.nodes.get(NodeId::ROOT);
        if !root.is_root() || root.parent.is_some() {
            return Err(violation(NodeId::ROOT, "root is not a parentless root node"));
        }
        if root.label_start != 0 || root.label_end != LabelEnd::Fixed(0) {
            return Err(violation(NodeId::ROOT, "root label is not 0..0"));
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut leaves = 0;
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(violation(id, "reachable along two paths"));
            }
            let node = self.nodes.get(id);

            match node.kind {
                NodeKind::Leaf => {
                    leaves += 1;
                    if !node.children.is_empty() {
                        return Err(violation(id, "leaf has children"));
                    }
                    if node.suffix_link.is_some() {
                        return Err(violation(id, "leaf has a suffix link"));
                    }
                    if node.label_end == LabelEnd::Open && self.open_leaves.is_empty() {
                        return Err(violation(id, "leaf left open after insertion"));
                    }
                }
                NodeKind::Internal => {
                    if node.children.len() < 2 {
                        return Err(violation(id, "internal node with fewer than two children"));
                    }
                    self.check_suffix_link(id)?;
                }
                NodeKind::Root => {
                    if id != NodeId::ROOT {
                        return Err(violation(id, "second root"));
                    }
                }
            }

            if let Some(parent) = node.parent {
                if self.path_length(id) <= self.path_length(parent) {
                    return Err(violation(id, "edge of non-positive length"));
                }
                let parent_path = self.path_label(parent);
                if !self.path_label(id).starts_with(parent_path) {
                    return Err(violation(id, "path label does not extend the parent's"));
                }
            }

            for (&first, &child) in &node.children {
                if self.nodes.get(child).parent != Some(id) {
                    return Err(violation(child, format!("parent pointer does not name {}", id)));
                }
                if self.edge_label(child).first() != Some(&first) {
                    return Err(violation(child, "edge does not start with its child key"));
                }
                stack.push(child);
            }
        }

        if let Some(pos) = seen.iter().position(|reached| !reached) {
            return Err(violation(NodeId(pos as u32), "unreachable from the root"));
        }
        if leaves != self.nodes.leaf_count() {
            return Err(violation(
                NodeId::ROOT,
                format!("{} leaves reachable, {} recorded", leaves, self.nodes.leaf_count()),
            ));
        }

        Ok(())
    }

    /// An internal node for `xα` must link to the node for `α`
    fn check_suffix_link(&self, id: NodeId) -> Result<()> {
        let Some(target) = self.nodes.get(id).suffix_link else {
            return Err(violation(id, "internal node without suffix link"));
        };
        if self.nodes.get(target).is_leaf() {
            return Err(violation(id, format!("suffix link points at leaf {}", target)));
        }
        let path = self.path_label(id);
        if self.path_label(target) != &path[1..] {
            return Err(violation(
                id,
                format!("suffix link to {} does not drop exactly one token", target),
            ));
        }
        Ok(())
    }
}
