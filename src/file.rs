//! Path-level compression and decompression.

use std::path::Path;

use log::{info, warn};

use crate::code::CodeTable;
use crate::codec::{self, HuffmanEncoder};
use crate::config::Config;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::store::{ByteSink, ByteSource};

/// Which way an operation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Original bytes in, data and tree artifacts out.
    Compress,
    /// Data and tree artifacts in, original bytes out.
    Decompress,
}

/// Sizes of the artifacts touched by one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Which way the operation ran.
    pub direction: Direction,
    /// Bytes read from the source.
    pub input_bytes: usize,
    /// Bytes written to the destination.
    pub output_bytes: usize,
    /// Size of the tree artifact.
    pub tree_bytes: usize,
}

impl Report {
    /// Size of the original, uncompressed bytes.
    pub fn original_bytes(&self) -> usize {
        match self.direction {
            Direction::Compress => self.input_bytes,
            Direction::Decompress => self.output_bytes,
        }
    }

    /// Size of the data artifact plus its tree.
    pub fn compressed_bytes(&self) -> usize {
        let data = match self.direction {
            Direction::Compress => self.output_bytes,
            Direction::Decompress => self.input_bytes,
        };
        data + self.tree_bytes
    }

    /// Compressed size relative to the original size, either direction.
    ///
    /// Returns `None` when the original is empty.
    pub fn ratio(&self) -> Option<f64> {
        match self.original_bytes() {
            0 => None,
            original => Some(self.compressed_bytes() as f64 / original as f64),
        }
    }
}

/// Symbol statistics of one input, as `huffpack codes` prints them.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Byte counts of the input.
    pub frequencies: FrequencyTable,
    /// The codes the input would be encoded with.
    pub codes: CodeTable,
    /// Total code bits for the input, excluding padding.
    pub encoded_bits: u64,
}

/// Compress `config.source` into `config.destination` and its tree artifact.
///
/// The source is read and fully encoded before anything is written, so a
/// missing source leaves no outputs behind.
///
/// # Errors
/// `Error::SourceNotFound` if the source cannot be read, `Error::SinkWriteFailed`
/// if either output cannot be written.
pub fn compress_file<S>(store: &mut S, config: &Config) -> Result<Report>
where
    S: ByteSource + ByteSink,
{
    let input = store.read_all(&config.source)?;
    let encoded = codec::encode(&input);

    let tree_path = config.encode_tree_path();
    store.write_all(&tree_path, &encoded.tree)?;
    if let Err(e) = store.write_all(&config.destination, &encoded.data) {
        // A tree without its data is useless.
        if let Err(cleanup) = store.remove(&tree_path) {
            warn!("leaving orphan tree {}: {cleanup}", tree_path.display());
        }
        return Err(e);
    }

    info!(
        "compressed {} -> {} (tree {})",
        config.source.display(),
        config.destination.display(),
        tree_path.display()
    );
    Ok(Report {
        direction: Direction::Compress,
        input_bytes: input.len(),
        output_bytes: encoded.data.len(),
        tree_bytes: encoded.tree.len(),
    })
}

/// Decompress `config.source`, paired with its tree artifact, into `config.destination`.
///
/// Both artifacts are read and decoded before the destination is written.
///
/// # Errors
/// `Error::SourceNotFound` if either artifact cannot be read,
/// `Error::SourceCorrupt` naming the offending artifact if decoding fails,
/// `Error::SinkWriteFailed` if the destination cannot be written.
pub fn decompress_file<S>(store: &mut S, config: &Config) -> Result<Report>
where
    S: ByteSource + ByteSink,
{
    let tree_path = config.decode_tree_path();
    let tree = store.read_all(&tree_path)?;
    let data = store.read_all(&config.source)?;

    let decoder = codec::HuffmanDecoder::from_blob(&tree).map_err(|e| e.at(&tree_path))?;
    let output = decoder.decode(&data).map_err(|e| e.at(&config.source))?;

    store.write_all(&config.destination, &output)?;

    info!(
        "decompressed {} -> {}",
        config.source.display(),
        config.destination.display()
    );
    Ok(Report {
        direction: Direction::Decompress,
        input_bytes: data.len(),
        output_bytes: output.len(),
        tree_bytes: tree.len(),
    })
}

/// Read `path` and compute the code table it would be compressed with.
///
/// # Errors
/// `Error::SourceNotFound` if `path` cannot be read.
pub fn analyze_file<S: ByteSource>(store: &S, path: &Path) -> Result<Analysis> {
    let input = store.read_all(path)?;
    let encoder = HuffmanEncoder::new(&input);
    Ok(Analysis {
        frequencies: encoder.frequencies().clone(),
        codes: encoder.codes().clone(),
        encoded_bits: encoder.encoded_bits(),
    })
}
