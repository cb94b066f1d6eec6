//! Read-only queries over a built tree
//!
//! All queries walk from the root with the token-by-token descent and never
//! mutate the tree, so a finished tree can be shared between threads.

use super::types::*;
use super::SuffixTree;
use ahash::AHashMap;
use rayon::prelude::*;

impl<S: Symbol> SuffixTree<S> {
    /// Whether `query` occurs in any inserted sequence.
    ///
    /// The empty query is always contained.
    pub fn contains_substring(&self, query: &[S]) -> bool {
        self.walk_to(NodeId::ROOT, query, Token::Symbol).rule.is_match()
    }

    /// Like [`SuffixTree::contains_substring`] but the query may include
    /// terminators.
    pub fn contains_tokens(&self, query: &[Token<S>]) -> bool {
        self.walk_to(NodeId::ROOT, query, |t| t).rule.is_match()
    }

    /// Every place `query` starts, sorted by text offset.
    ///
    /// Returns nothing for the empty query.
    pub fn find_occurrences(&self, query: &[S]) -> Vec<Occurrence> {
        let mut offsets = Vec::new();
        if let Some(below) = self.match_subtree(query) {
            self.for_each_leaf(below, |leaf| {
                offsets.extend(self.nodes.get(leaf).occurrences());
            });
        }
        offsets.sort_unstable();
        offsets
            .into_iter()
            .filter_map(|offset| self.text.occurrence(offset))
            .collect()
    }

    /// Number of places `query` starts
    pub fn count_occurrences(&self, query: &[S]) -> usize {
        let mut count = 0;
        if let Some(below) = self.match_subtree(query) {
            self.for_each_leaf(below, |leaf| {
                count += 1 + self.nodes.get(leaf).extra_occurrences.len();
            });
        }
        count
    }

    /// Check many queries in parallel
    pub fn contains_all<Q>(&self, queries: &[Q]) -> Vec<bool>
    where
        Q: AsRef<[S]> + Sync,
        S: Send + Sync,
    {
        queries
            .par_iter()
            .map(|q| self.contains_substring(q.as_ref()))
            .collect()
    }

    /// Count every distinct motif of exactly `len` symbols.
    ///
    /// Motifs never span a terminator.
    pub fn motif_counts(&self, len: usize) -> AHashMap<Vec<S>, usize> {
        let mut motifs = AHashMap::new();
        if len == 0 {
            return motifs;
        }

        let counts = self.subtree_occurrences();
        // (node, symbols spelled so far); depth is bounded by `len`
        let mut stack: Vec<(NodeId, Vec<S>)> = vec![(NodeId::ROOT, Vec::with_capacity(len))];

        while let Some((node, path)) = stack.pop() {
            for &child in self.nodes.get(node).children.values() {
                let mut spelled = path.clone();
                let mut blocked = false;
                for token in self.edge_label(child) {
                    if spelled.len() == len {
                        break;
                    }
                    match token {
                        Token::Symbol(s) => spelled.push(*s),
                        Token::Terminator(_) => {
                            blocked = true;
                            break;
                        }
                    }
                }

                if spelled.len() == len {
                    *motifs.entry(spelled).or_insert(0) += counts[child.index()];
                } else if !blocked {
                    stack.push((child, spelled));
                }
            }
        }

        motifs
    }

    /// Occurrence totals per motif length.
    ///
    /// Element `k - 1` is how many times some motif of `k` symbols occurs,
    /// for `k` in `1..=max_len`.
    pub fn count_prefixes_of_length(&self, max_len: usize) -> Vec<usize> {
        let counts = self.subtree_occurrences();
        // Difference array over depths 1..=max_len
        let mut diff = vec![0isize; max_len + 2];

        for (id, node) in self.nodes.iter() {
            let Some(parent) = node.parent else {
                continue;
            };
            let label = self.edge_label(id);
            let symbols = label
                .iter()
                .position(Token::is_terminator)
                .unwrap_or(label.len());
            let lo = self.path_length(parent) + 1;
            let hi = (self.path_length(parent) + symbols).min(max_len);
            if symbols == 0 || lo > hi {
                continue;
            }
            let weight = counts[id.index()] as isize;
            diff[lo] += weight;
            diff[hi + 1] -= weight;
        }

        let mut totals = Vec::with_capacity(max_len);
        let mut running = 0isize;
        for d in diff.iter().take(max_len + 1).skip(1) {
            running += d;
            totals.push(running as usize);
        }
        totals
    }

    /// Where the subtree of all suffixes starting with `query` hangs
    fn match_subtree(&self, query: &[S]) -> Option<NodeId> {
        if query.is_empty() {
            return None;
        }
        let walk = self.walk_to(NodeId::ROOT, query, Token::Symbol);
        walk.rule.is_match().then_some(walk.node)
    }

    fn for_each_leaf(&self, start: NodeId, mut f: impl FnMut(NodeId)) {
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            let n = self.nodes.get(node);
            if n.is_leaf() {
                f(node);
            } else {
                stack.extend(n.children.values().copied());
            }
        }
    }

    /// Suffix starts below every node, indexed by node
    pub(crate) fn subtree_occurrences(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.nodes.len()];
        // Post-order without recursion: children are summed on the way out
        let mut stack = vec![(NodeId::ROOT, false)];
        while let Some((node, expanded)) = stack.pop() {
            let n = self.nodes.get(node);
            if n.is_leaf() {
                counts[node.index()] = 1 + n.extra_occurrences.len();
            } else if expanded {
                counts[node.index()] = n.children.values().map(|c| counts[c.index()]).sum();
            } else {
                stack.push((node, true));
                stack.extend(n.children.values().map(|&c| (c, false)));
            }
        }
        counts
    }
}

impl SuffixTree<char> {
    pub fn contains_str(&self, query: &str) -> bool {
        let symbols: Vec<char> = query.chars().collect();
        self.contains_substring(&symbols)
    }
}
