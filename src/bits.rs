//! Bit packing with an explicit padding byte.
//!
//! Packed layout:
//!
//! ```text
//! byte 0      padding count p in 0..=7
//! byte 1..    bits, most significant bit first, final byte's low p bits zero
//! ```
//!
//! `p = (8 - len % 8) % 8`, so an empty bit sequence packs to the single byte `0`.

use crate::code::Code;
use crate::error::{Corruption, Result};

/// Accumulates bits and emits the packed layout.
#[derive(Debug)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: u8,
    filled: u8,
    bit_count: u64,
}

impl BitWriter {
    /// Create a writer with the padding byte reserved.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer expecting roughly `bytes` packed bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        let mut out = Vec::with_capacity(bytes + 1);
        out.push(0);
        Self {
            out,
            acc: 0,
            filled: 0,
            bit_count: 0,
        }
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.acc = (self.acc << 1) | bit as u8;
        self.filled += 1;
        self.bit_count += 1;
        if self.filled == 8 {
            self.out.push(self.acc);
            self.acc = 0;
            self.filled = 0;
        }
    }

    /// Append every bit of `code`.
    pub fn push_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.push(bit);
        }
    }

    /// Bits written so far, excluding padding.
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Pad to a byte boundary and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let padding = padding_for(self.bit_count);
        if self.filled > 0 {
            self.out.push(self.acc << padding);
        }
        self.out[0] = padding;
        self.out
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Padding needed to round `bit_count` up to whole bytes.
pub fn padding_for(bit_count: u64) -> u8 {
    ((8 - bit_count % 8) % 8) as u8
}

/// Pack a bit sequence.
pub fn pack<I: IntoIterator<Item = bool>>(bits: I) -> Vec<u8> {
    let mut writer = BitWriter::new();
    for bit in bits {
        writer.push(bit);
    }
    writer.finish()
}

/// Validate a packed blob and view its bits with padding removed.
///
/// # Errors
/// Returns `Error::SourceCorrupt` if the padding byte is missing, outside
/// `0..=7`, or larger than the number of packed bits.
pub fn unpack(data: &[u8]) -> Result<PackedBits<'_>> {
    let (&padding, bytes) = data.split_first().ok_or(Corruption::MissingPadding)?;
    if padding > 7 {
        return Err(Corruption::InvalidPadding(padding).into());
    }
    let total = bytes.len() as u64 * 8;
    if (padding as u64) > total {
        return Err(Corruption::PaddingExceedsData.into());
    }
    Ok(PackedBits {
        bytes,
        len: total - padding as u64,
        padding,
    })
}

/// The logical bits of a packed blob.
#[derive(Debug, Clone, Copy)]
pub struct PackedBits<'a> {
    bytes: &'a [u8],
    len: u64,
    padding: u8,
}

impl<'a> PackedBits<'a> {
    /// Number of logical bits.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True when there are no logical bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The padding count read from byte 0.
    pub fn padding(&self) -> u8 {
        self.padding
    }

    /// Iterate the logical bits, most significant bit of each byte first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + 'a {
        self.bytes
            .iter()
            .flat_map(|&b| (0..8).rev().map(move |i| (b >> i) & 1 == 1))
            .take(self.len as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_empty_packs_to_zero_padding() {
        assert_eq!(pack(Vec::new()), vec![0]);
        let unpacked = unpack(&[0]).unwrap();
        assert!(unpacked.is_empty());
    }

    #[test]
    fn test_partial_byte_is_msb_first_with_padding() {
        // 0b101 followed by five padding zeros
        assert_eq!(pack(bits("101")), vec![5, 0b1010_0000]);
        assert_eq!(padding_for(3), 5);
    }

    #[test]
    fn test_whole_bytes_need_no_padding() {
        assert_eq!(pack(bits("1000000111111110")), vec![0, 0x81, 0xfe]);
        assert_eq!(padding_for(16), 0);
    }

    #[test]
    fn test_unpack_drops_padding() {
        let unpacked = unpack(&[5, 0b1010_0000]).unwrap();
        assert_eq!(unpacked.len(), 3);
        assert_eq!(unpacked.padding(), 5);
        assert_eq!(unpacked.iter().collect::<Vec<_>>(), bits("101"));
    }

    #[test]
    fn test_unpack_rejects_bad_padding() {
        let err = |data: &[u8]| unpack(data).err().and_then(|e| e.corruption());
        assert_eq!(err(&[]), Some(Corruption::MissingPadding));
        assert_eq!(err(&[8, 0xff]), Some(Corruption::InvalidPadding(8)));
        assert_eq!(err(&[3]), Some(Corruption::PaddingExceedsData));
    }

    #[test]
    fn test_writer_counts_bits() {
        let mut writer = BitWriter::new();
        for _ in 0..13 {
            writer.push(true);
        }
        assert_eq!(writer.bit_count(), 13);
        assert_eq!(writer.finish(), vec![3, 0xff, 0b1111_1000]);
    }
}
