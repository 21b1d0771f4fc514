//! Byte frequency counting.

/// Occurrence counts for the byte values present in an input.
///
/// Only bytes that actually occur are entries; [`FrequencyTable::iter`]
/// never yields a zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    distinct: usize,
}

impl FrequencyTable {
    /// Count every byte of `data` in a single pass.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        Self { counts, distinct }
    }

    /// Occurrence count of `symbol`, or `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            n => Some(n),
        }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// True for an empty input.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts, i.e. the input length.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_entries() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table.get(0), None);
    }

    #[test]
    fn test_counts_only_present_symbols() {
        let table = FrequencyTable::from_bytes(b"abacabad");
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![(b'a', 4), (b'b', 2), (b'c', 1), (b'd', 1)]
        );
        assert_eq!(table.get(b'z'), None);
        assert_eq!(table.total(), 8);
    }
}
