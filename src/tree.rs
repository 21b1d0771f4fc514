//! Huffman tree construction.
//!
//! The tree is built greedily: every present symbol starts as a leaf weighted
//! by its count, and the two lightest nodes are repeatedly merged under a new
//! internal node until one root remains.
//!
//! Weights only matter while building. Once built, a [`Node`] holds nothing but
//! shape and symbols, which is exactly what [`crate::tree_codec`] persists.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single symbol.
    Leaf {
        /// The byte value this leaf decodes to.
        symbol: u8,
    },
    /// A branch: bit `0` descends left, bit `1` descends right.
    Internal {
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Combine two subtrees under a new internal node.
    pub fn internal(left: Node, right: Node) -> Self {
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Number of leaves under (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Heap entry carrying the construction-only weight.
///
/// `order` makes equal weights resolve the same way on every build: leaves
/// use their symbol value, merged nodes take increasing numbers from 256 on,
/// so among equal weights leaves come out first, lowest symbol first, then
/// older merges before newer ones.
#[derive(Debug)]
struct Weighted {
    weight: u64,
    order: u32,
    node: Node,
}

impl PartialEq for Weighted {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weighted {}

impl Ord for Weighted {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        (other.weight, other.order).cmp(&(self.weight, self.order))
    }
}

impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree; empty when built from an empty input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<Node>,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// An empty table yields an empty tree. A table with one symbol yields a
    /// tree whose root is that symbol's leaf, with no merge performed.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let mut pq: BinaryHeap<Weighted> = frequencies
            .iter()
            .map(|(symbol, weight)| Weighted {
                weight,
                order: symbol as u32,
                node: Node::Leaf { symbol },
            })
            .collect();

        let mut next_order = 256;
        while pq.len() > 1 {
            let (Some(left), Some(right)) = (pq.pop(), pq.pop()) else {
                break;
            };
            pq.push(Weighted {
                weight: left.weight + right.weight,
                order: next_order,
                node: Node::internal(left.node, right.node),
            });
            next_order += 1;
        }

        Self {
            root: pq.pop().map(|w| w.node),
        }
    }

    /// Count `data` and build its tree.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::build(&FrequencyTable::from_bytes(data))
    }

    /// Wrap an existing root, e.g. one read back by the tree codec.
    pub fn from_root(root: Option<Node>) -> Self {
        Self { root }
    }

    /// The root node, if the tree is not empty.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Whether the tree has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8) -> Node {
        Node::Leaf { symbol }
    }

    #[test]
    fn test_empty_input_builds_empty_tree() {
        let tree = HuffmanTree::from_bytes(b"");
        assert!(tree.is_empty());
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_single_symbol_root_is_leaf() {
        let tree = HuffmanTree::from_bytes(b"aaaa");
        assert_eq!(tree.root(), Some(&leaf(b'a')));
    }

    #[test]
    fn test_abacabad_shape() {
        // c and d (1 each) merge first; b (2) beats that merge on the tie;
        // a (4) beats the second merge on the tie.
        let tree = HuffmanTree::from_bytes(b"abacabad");
        let expected = Node::internal(
            leaf(b'a'),
            Node::internal(leaf(b'b'), Node::internal(leaf(b'c'), leaf(b'd'))),
        );
        assert_eq!(tree.root(), Some(&expected));
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(expected.depth(), 3);
    }

    #[test]
    fn test_equal_weights_build_identically() {
        let data: Vec<u8> = (0..=255).collect();
        let a = HuffmanTree::from_bytes(&data);
        let b = HuffmanTree::from_bytes(&data);
        assert_eq!(a, b);
        // 256 equal weights give a perfectly balanced tree.
        assert_eq!(a.root().map(Node::depth), Some(8));
        assert_eq!(a.leaf_count(), 256);
    }
}
