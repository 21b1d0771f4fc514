//! Code generation: symbol -> bit path in the tree.

use std::fmt;

use crate::tree::{HuffmanTree, Node};

/// A non-empty prefix code word, most significant (first emitted) bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// The bits of this code in emission order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; generated codes have at least one bit.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code words for every leaf of a tree, indexed by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>, // symbol -> bit sequence
}

impl CodeTable {
    /// Walk `tree` depth first, `0` to the left and `1` to the right.
    ///
    /// A tree whose root is a leaf would give that symbol an empty path; it
    /// gets the one-bit code `0` instead so every occurrence still costs a bit.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        if let Some(root) = tree.root() {
            Self::build_codes(root, Vec::new(), &mut codes);
        }
        Self { codes }
    }

    fn build_codes(node: &Node, prefix: Vec<bool>, codes: &mut [Option<Code>]) {
        match node {
            Node::Leaf { symbol } => {
                let bits = if prefix.is_empty() { vec![false] } else { prefix };
                codes[*symbol as usize] = Some(Code { bits });
            }
            Node::Internal { left, right } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(false);
                Self::build_codes(left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push(true);
                Self::build_codes(right, right_prefix, codes);
            }
        }
    }

    /// The code for `symbol`, if it is in the tree.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// True when generated from an empty tree.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_ref().map(|c| (s as u8, c)))
    }
}
