//! In-memory encoding and decoding.
//!
//! Encoding produces two blobs: the serialized tree and the packed data. The
//! data blob cannot be decoded without its tree.

use log::{debug, warn};

use crate::bits::{self, BitWriter};
use crate::code::CodeTable;
use crate::error::{Corruption, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use crate::tree_codec;

/// The two artifacts of one compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Serialized tree, see [`crate::tree_codec`].
    pub tree: Vec<u8>,
    /// Padding byte followed by packed code bits, see [`crate::bits`].
    pub data: Vec<u8>,
}

/// Huffman encoder.
///
/// Borrows the input it was built from, so the code table always covers
/// every byte it encodes.
pub struct HuffmanEncoder<'a> {
    input: &'a [u8],
    tree: HuffmanTree,
    codes: CodeTable,
    frequencies: FrequencyTable,
}

impl<'a> HuffmanEncoder<'a> {
    /// Build the tree and code table for `input`.
    pub fn new(input: &'a [u8]) -> Self {
        let frequencies = FrequencyTable::from_bytes(input);
        let tree = HuffmanTree::build(&frequencies);
        let codes = CodeTable::from_tree(&tree);
        debug!(
            "built tree: {} distinct symbols from {} bytes",
            frequencies.len(),
            input.len()
        );
        Self {
            input,
            tree,
            codes,
            frequencies,
        }
    }

    /// The tree built for the input.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The code table derived from the tree.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// The counts the tree was built from.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Exact number of code bits the input encodes to.
    pub fn encoded_bits(&self) -> u64 {
        self.frequencies
            .iter()
            .map(|(s, n)| n * self.codes.get(s).map_or(0, |c| c.len() as u64))
            .sum()
    }

    /// Encode the input into its tree and data blobs.
    pub fn finish(&self) -> Encoded {
        let mut writer = BitWriter::with_capacity(self.encoded_bits().div_ceil(8) as usize);
        // Every input byte was counted, so every one has a code.
        for code in self.input.iter().filter_map(|&s| self.codes.get(s)) {
            writer.push_code(code);
        }
        debug_assert_eq!(writer.bit_count(), self.encoded_bits());
        debug!(
            "packed {} bits with {} padding",
            writer.bit_count(),
            bits::padding_for(writer.bit_count())
        );

        Encoded {
            tree: tree_codec::serialize(&self.tree),
            data: writer.finish(),
        }
    }
}

/// Huffman decoder.
pub struct HuffmanDecoder {
    tree: HuffmanTree,
}

impl HuffmanDecoder {
    /// Create a decoder for an already built tree.
    pub fn new(tree: HuffmanTree) -> Self {
        Self { tree }
    }

    /// Create a decoder from a serialized tree blob.
    ///
    /// # Errors
    /// Returns `Error::SourceCorrupt` if the blob is not a valid tree.
    pub fn from_blob(tree_blob: &[u8]) -> Result<Self> {
        Ok(Self::new(tree_codec::deserialize(tree_blob)?))
    }

    /// The tree this decoder walks.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Decode a packed data blob.
    ///
    /// Each bit moves one step down from the current node; reaching a leaf
    /// emits its symbol and returns to the root. The bits must run out exactly
    /// at the root. An empty tree decodes to nothing without reading any bits.
    ///
    /// # Errors
    /// Returns `Error::SourceCorrupt` for an invalid padding byte, for bits
    /// that end part way through a code, or for a `1` bit under a leaf root.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let bits = bits::unpack(data)?;

        let Some(root) = self.tree.root() else {
            if !bits.is_empty() {
                warn!("empty tree paired with {} data bits, ignoring them", bits.len());
            }
            return Ok(Vec::new());
        };

        let mut out = Vec::with_capacity(bits.len() as usize / 2);
        let mut curr = root;

        for bit in bits.iter() {
            let next: &Node = match curr {
                Node::Internal { left, right } => {
                    if bit {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
                // Only a leaf root gets here: one `0` bit per symbol.
                Node::Leaf { symbol } => {
                    if bit {
                        return Err(Corruption::UnexpectedBit.into());
                    }
                    out.push(*symbol);
                    continue;
                }
            };

            if let Node::Leaf { symbol } = next {
                out.push(*symbol);
                curr = root;
            } else {
                curr = next;
            }
        }

        if !std::ptr::eq(curr, root) {
            return Err(Corruption::TruncatedCode.into());
        }
        Ok(out)
    }
}

/// Compress `data` into a tree blob and a data blob.
pub fn encode(data: &[u8]) -> Encoded {
    HuffmanEncoder::new(data).finish()
}

/// Reconstruct the original bytes from a tree blob and its data blob.
///
/// # Errors
/// Returns `Error::SourceCorrupt` if either blob is malformed or they do not
/// belong together.
pub fn decode(tree: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::from_blob(tree)?.decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(data: &[u8]) {
        let encoded = encode(data);
        assert_eq!(decode(&encoded.tree, &encoded.data).unwrap(), data);
    }

    #[test]
    fn test_huffman_roundtrip() {
        roundtrip(b"abracadabra");
        roundtrip(b"abacabad");
        roundtrip(b"x");
        roundtrip(&(0..=255).collect::<Vec<u8>>());
    }

    #[test]
    fn test_empty_input() {
        let encoded = encode(b"");
        assert!(encoded.tree.is_empty());
        assert_eq!(encoded.data, vec![0]);
        assert!(decode(&encoded.tree, &encoded.data).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_costs_one_bit_each() {
        let encoded = encode(b"aaaa");
        assert_eq!(encoded.tree, b"1a");
        // four `0` bits plus four padding bits
        assert_eq!(encoded.data, vec![4, 0]);
        assert_eq!(decode(&encoded.tree, &encoded.data).unwrap(), b"aaaa");
    }

    #[test]
    fn test_abacabad_encoding() {
        // a=0 b=10 c=110 d=111
        // 0 10 0 110 0 10 0 111 -> 01001100 10011100 (+2 padding)
        let encoded = encode(b"abacabad");
        assert_eq!(encoded.data, vec![2, 0b0100_1100, 0b1001_1100]);
        roundtrip(b"abacabad");
    }

    #[test]
    fn test_encoded_bits_match_packed_length() {
        let data = b"mississippi river";
        let encoder = HuffmanEncoder::new(data);
        let encoded = encoder.finish();
        let unpacked = bits::unpack(&encoded.data).unwrap();
        assert_eq!(unpacked.len(), encoder.encoded_bits());
    }

    #[test]
    fn test_encoder_covers_its_whole_input() {
        let encoder = HuffmanEncoder::new(b"abc");
        assert_eq!(encoder.frequencies().total(), 3);
        assert!(b"abc".iter().all(|&s| encoder.codes().get(s).is_some()));

        let encoded = encoder.finish();
        assert_eq!(decode(&encoded.tree, &encoded.data).unwrap(), b"abc");
    }

    #[test]
    fn test_truncated_code_is_rejected() {
        let encoded = encode(b"abacabad");
        // "0 10 0 11" ends inside c's code
        let data = bits::pack([false, true, false, false, true, true]);
        let err = decode(&encoded.tree, &data).unwrap_err();
        assert_eq!(err.corruption(), Some(Corruption::TruncatedCode));
    }

    #[test]
    fn test_one_bit_under_leaf_root_is_rejected() {
        let data = bits::pack([false, true]);
        let err = decode(b"1a", &data).unwrap_err();
        assert_eq!(err.corruption(), Some(Corruption::UnexpectedBit));
    }

    #[test]
    fn test_empty_tree_ignores_bits() {
        assert!(decode(b"", &[0, 0xff]).unwrap().is_empty());
    }

    #[test]
    fn test_bad_padding_is_rejected() {
        let err = decode(b"1a", &[9, 0]).unwrap_err();
        assert_eq!(err.corruption(), Some(Corruption::InvalidPadding(9)));
    }
}
