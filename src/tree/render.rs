//! Plain-text dump of the tree shape

use super::types::*;
use super::SuffixTree;
use std::fmt::{self, Display, Write};

impl<S: Symbol + Display> SuffixTree<S> {
    /// One edge per line, indented by depth, children in creation order.
    ///
    /// ```text
    /// #0
    ///   A #2
    ///     AGT$1 #1 [0]
    ///     GT$1 #3 [1]
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render_into(&mut out);
        out
    }

    pub fn render_into(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "{}", NodeId::ROOT)?;
        let mut stack: Vec<(NodeId, usize)> = self
            .sorted_children(NodeId::ROOT)
            .into_iter()
            .rev()
            .map(|c| (c, 1))
            .collect();

        while let Some((id, depth)) = stack.pop() {
            let node = self.nodes.get(id);
            write!(out, "{:width$}", "", width = depth * 2)?;
            for token in self.edge_label(id) {
                write!(out, "{}", token)?;
            }
            write!(out, " {}", id)?;
            if node.is_leaf() {
                write!(out, " [{}", node.label_start)?;
                for extra in &node.extra_occurrences {
                    write!(out, ",{}", extra)?;
                }
                write!(out, "]")?;
            }
            writeln!(out)?;

            stack.extend(
                self.sorted_children(id)
                    .into_iter()
                    .rev()
                    .map(|c| (c, depth + 1)),
            );
        }
        Ok(())
    }

    fn sorted_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self.nodes.get(id).children.values().copied().collect();
        children.sort_unstable();
        children
    }
}
