//! compression/tree.rs
//!
//! Deterministic greedy Huffman merge.
//!
//! Design notes:
//! - Nodes rank by `(weight, min_symbol)`. Subtrees are disjoint, so no two live
//!   nodes ever share a min symbol and the order is total: the same multiset of
//!   counts always yields the same tree, on both the compress and decompress side.
//! - The lower-ranked node of each merged pair becomes the left child.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use crate::compression::types::{FrequencyTable, Symbol};
use crate::types::HuffError;

/// Huffman tree node. Internal nodes own their children exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Combine two nodes; `left` should be the lower-ranked one.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Smallest symbol in this subtree.
    pub fn min_symbol(&self) -> Symbol {
        match self {
            Node::Leaf { symbol, .. } => *symbol,
            Node::Internal { left, right, .. } => left.min_symbol().min(right.min_symbol()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Deepest leaf as `(symbol, depth)`; the leftmost one wins ties.
    pub fn deepest_leaf(&self) -> (Symbol, u32) {
        match self {
            Node::Leaf { symbol, .. } => (*symbol, 0),
            Node::Internal { left, right, .. } => {
                let (ls, ld) = left.deepest_leaf();
                let (rs, rd) = right.deepest_leaf();
                if rd > ld {
                    (rs, rd + 1)
                } else {
                    (ls, ld + 1)
                }
            }
        }
    }

    /// Leaf weights keyed by symbol; the inverse of `build_tree`.
    pub fn frequencies(&self) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        self.collect_frequencies(&mut table);
        table
    }

    fn collect_frequencies(&self, table: &mut FrequencyTable) {
        match self {
            Node::Leaf { symbol, weight } => {
                table.insert(*symbol, *weight);
            }
            Node::Internal { left, right, .. } => {
                left.collect_frequencies(table);
                right.collect_frequencies(table);
            }
        }
    }
}

/// Heap entry: a node plus its cached rank key.
struct Ranked {
    weight: u64,
    key: Symbol,
    node: Node,
}

impl Ranked {
    fn new(node: Node) -> Self {
        Self { weight: node.weight(), key: node.min_symbol(), node }
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.key == other.key
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Build the tree for `table`. A single symbol yields a lone leaf.
pub fn build_tree(table: &FrequencyTable) -> Result<Node, HuffError> {
    let mut heap: BinaryHeap<Reverse<Ranked>> = table
        .iter()
        .map(|(symbol, count)| Reverse(Ranked::new(Node::leaf(symbol, count))))
        .collect();

    let root = loop {
        match (heap.pop(), heap.pop()) {
            (Some(Reverse(lo)), Some(Reverse(hi))) => {
                let key = lo.key.min(hi.key);
                let node = Node::merge(lo.node, hi.node);
                heap.push(Reverse(Ranked { weight: node.weight(), key, node }));
            }
            (Some(Reverse(last)), None) => break last.node,
            (None, _) => return Err(HuffError::EmptyTree),
        }
    };
    debug!(leaves = root.leaf_count(), weight = root.weight(), "built tree");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_symbol_is_lone_leaf() {
        let table: FrequencyTable = [(b'a', 4)].into_iter().collect();
        assert_eq!(build_tree(&table).unwrap(), Node::leaf(b'a', 4));
    }

    #[test]
    fn lower_rank_goes_left() {
        let table: FrequencyTable = [(b'x', 3), (b'y', 1)].into_iter().collect();
        let root = build_tree(&table).unwrap();
        assert_eq!(root, Node::merge(Node::leaf(b'y', 1), Node::leaf(b'x', 3)));
    }

    #[test]
    fn equal_weights_break_on_symbol() {
        let table: FrequencyTable = [(9, 2), (4, 2)].into_iter().collect();
        let root = build_tree(&table).unwrap();
        assert_eq!(root, Node::merge(Node::leaf(4, 2), Node::leaf(9, 2)));
    }

    #[test]
    fn frequencies_round_trip() {
        let table: FrequencyTable = [(1, 10), (2, 10), (3, 10), (4, 5), (6, 2), (7, 1)]
            .into_iter()
            .collect();
        assert_eq!(build_tree(&table).unwrap().frequencies(), table);
    }
}
