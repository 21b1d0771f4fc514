//! # Huffman file compression
//!
//! *Lossless compression with optimal prefix codes.*
//!
//! ## Intuition First
//!
//! Plain bytes spend eight bits on every symbol, whether it appears once or
//! a million times. Huffman coding spends few bits on common symbols and many
//! on rare ones. The codes are the paths to the leaves of a binary tree, so no
//! code is a prefix of another and the bitstream needs no separators.
//!
//! ## The Pipeline
//!
//! ```text
//! encode:  bytes -> FrequencyTable -> HuffmanTree -> CodeTable -> BitWriter -> data blob
//!                                          \-> tree_codec::serialize ---------> tree blob
//!
//! decode:  tree blob -> tree_codec::deserialize -> HuffmanTree --\
//!          data blob -> bits::unpack ----------------------------> tree walk -> bytes
//! ```
//!
//! The tree itself is persisted next to the data, not the frequencies, so the
//! decoder never has to rebuild it and never depends on how ties were broken.
//!
//! ## Artifacts
//!
//! - **Tree blob**: pre-order markers, `'1' symbol` for a leaf and `'0'` for an
//!   internal node followed by both children. Empty for an empty input.
//! - **Data blob**: one padding byte `p` in `0..=7`, then the code bits packed
//!   most significant bit first, with the final byte's low `p` bits unused.
//!
//! By default the tree lives at the data path with [`config::TREE_SUFFIX`]
//! appended.
//!
//! ## Single-Symbol Inputs
//!
//! With one distinct byte the tree is a lone leaf and its path is empty.
//! That symbol is coded as the single bit `0`, so the data blob still records
//! how many times it occurred.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(n + k \log k)$ to encode `n` bytes over `k` distinct symbols;
//!   $O(\text{bits})$ to decode.
//! - **Space**: the whole input and output are held in memory.
//!
//! ## Example
//!
//! ```
//! let encoded = huffpack::encode(b"abacabad");
//! assert_eq!(encoded.tree, b"01a01b01c1d");
//!
//! let decoded = huffpack::decode(&encoded.tree, &encoded.data)?;
//! assert_eq!(decoded, b"abacabad");
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code;
pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod frequency;
pub mod store;
pub mod tree;
pub mod tree_codec;

pub use code::{Code, CodeTable};
pub use codec::{decode, encode, Encoded, HuffmanDecoder, HuffmanEncoder};
pub use config::Config;
pub use error::{Corruption, Error, Result};
pub use file::{analyze_file, compress_file, decompress_file, Analysis, Direction, Report};
pub use frequency::FrequencyTable;
pub use store::{ByteSink, ByteSource, FsStore, MemoryStore};
pub use tree::{HuffmanTree, Node};
