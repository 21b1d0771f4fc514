//! Tree blob serialization.
//!
//! The blob is a pre-order walk of the tree. A leaf is written as
//! [`LEAF_MARKER`] followed by its symbol byte; an internal node is written as
//! [`INTERNAL_MARKER`] followed by its left and then its right subtree. An
//! empty tree is an empty blob. The grammar is self-delimiting, so no lengths
//! are stored:
//!
//! ```text
//! node := '1' symbol
//!       | '0' node node
//! ```

use std::collections::HashSet;

use crate::error::{Corruption, Result};
use crate::tree::{HuffmanTree, Node};

/// Marks a leaf; the next byte is its symbol.
pub const LEAF_MARKER: u8 = b'1';

/// Marks an internal node; its two children follow.
pub const INTERNAL_MARKER: u8 = b'0';

/// Upper bound on internal nodes in any tree over a byte alphabet.
const MAX_INTERNAL: usize = 255;

/// Serialize `tree` into a new blob.
pub fn serialize(tree: &HuffmanTree) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(root) = tree.root() {
        write_node(root, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut Vec<u8>) {
    match node {
        Node::Leaf { symbol } => {
            out.push(LEAF_MARKER);
            out.push(*symbol);
        }
        Node::Internal { left, right } => {
            out.push(INTERNAL_MARKER);
            write_node(left, out);
            write_node(right, out);
        }
    }
}

/// Rebuild a tree from a blob written by [`serialize`].
///
/// # Errors
/// Returns `Error::SourceCorrupt` if the blob ends mid-node, contains an
/// unknown marker, repeats a symbol, has more internal nodes than a byte
/// alphabet allows, or has bytes left over after the root.
pub fn deserialize(blob: &[u8]) -> Result<HuffmanTree> {
    if blob.is_empty() {
        return Ok(HuffmanTree::default());
    }

    let mut reader = TreeReader {
        blob,
        pos: 0,
        internal: 0,
        seen: HashSet::new(),
    };
    let root = reader.read_node()?;

    let trailing = blob.len() - reader.pos;
    if trailing > 0 {
        return Err(Corruption::TrailingTreeBytes(trailing).into());
    }
    Ok(HuffmanTree::from_root(Some(root)))
}

struct TreeReader<'a> {
    blob: &'a [u8],
    pos: usize,
    internal: usize,
    seen: HashSet<u8>,
}

impl TreeReader<'_> {
    fn next_byte(&mut self) -> Result<u8> {
        let b = *self.blob.get(self.pos).ok_or(Corruption::TruncatedTree)?;
        self.pos += 1;
        Ok(b)
    }

    fn read_node(&mut self) -> Result<Node> {
        match self.next_byte()? {
            LEAF_MARKER => {
                let symbol = self.next_byte()?;
                if !self.seen.insert(symbol) {
                    return Err(Corruption::DuplicateSymbol(symbol).into());
                }
                Ok(Node::Leaf { symbol })
            }
            INTERNAL_MARKER => {
                // Bounds recursion depth as well as node count.
                self.internal += 1;
                if self.internal > MAX_INTERNAL {
                    return Err(Corruption::TooManyInternalNodes.into());
                }
                let left = self.read_node()?;
                let right = self.read_node()?;
                Ok(Node::internal(left, right))
            }
            other => Err(Corruption::InvalidMarker(other).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corruption(blob: &[u8]) -> Option<Corruption> {
        deserialize(blob).err().and_then(|e| e.corruption())
    }

    #[test]
    fn test_empty_tree_is_empty_blob() {
        assert!(serialize(&HuffmanTree::default()).is_empty());
        assert!(deserialize(b"").unwrap().is_empty());
    }

    #[test]
    fn test_single_leaf_blob() {
        let tree = HuffmanTree::from_bytes(b"aaaa");
        assert_eq!(serialize(&tree), b"1a");
    }

    #[test]
    fn test_abacabad_blob() {
        let tree = HuffmanTree::from_bytes(b"abacabad");
        let blob = serialize(&tree);
        assert_eq!(blob, b"01a01b01c1d");
        // 4 leaves * 2 bytes + 3 internal * 1 byte
        assert_eq!(blob.len(), 11);
        assert_eq!(deserialize(&blob).unwrap(), tree);
    }

    #[test]
    fn test_truncated_blob_is_rejected() {
        assert_eq!(corruption(b"0"), Some(Corruption::TruncatedTree));
        assert_eq!(corruption(b"01a"), Some(Corruption::TruncatedTree));
        assert_eq!(corruption(b"1"), Some(Corruption::TruncatedTree));
    }

    #[test]
    fn test_malformed_blobs_are_rejected() {
        assert_eq!(corruption(b"x"), Some(Corruption::InvalidMarker(b'x')));
        assert_eq!(corruption(b"01a1a"), Some(Corruption::DuplicateSymbol(b'a')));
        assert_eq!(corruption(b"1a1b"), Some(Corruption::TrailingTreeBytes(2)));
    }

    #[test]
    fn test_too_many_internal_nodes_rejected() {
        let blob = vec![INTERNAL_MARKER; 100_000];
        assert_eq!(corruption(&blob), Some(Corruption::TooManyInternalNodes));
    }

    #[test]
    fn test_full_alphabet_fits() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::from_bytes(&data);
        let blob = serialize(&tree);
        assert_eq!(blob.len(), 256 * 2 + 255);
        assert_eq!(deserialize(&blob).unwrap(), tree);
    }
}
