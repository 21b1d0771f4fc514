//! Error types for Huffman compression.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// An input artifact could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    SourceNotFound {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An input artifact was read but its contents are not a valid encoding.
    #[error("corrupt input{}: {reason}", describe_path(.path.as_deref()))]
    SourceCorrupt {
        /// The artifact that failed to decode, when known.
        path: Option<PathBuf>,
        /// What exactly was wrong with it.
        reason: Corruption,
    },

    /// An output artifact could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    SinkWriteFailed {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// The specific defect found in a corrupt tree or data blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Corruption {
    /// The tree blob ended in the middle of a node.
    #[error("tree ends mid-structure")]
    TruncatedTree,

    /// A tree node started with a byte that is neither marker.
    #[error("invalid tree marker 0x{0:02x}")]
    InvalidMarker(u8),

    /// The same symbol appears on two leaves.
    #[error("symbol 0x{0:02x} appears twice in tree")]
    DuplicateSymbol(u8),

    /// More internal nodes than a 256-symbol alphabet allows.
    #[error("tree has more internal nodes than any byte alphabet can produce")]
    TooManyInternalNodes,

    /// Bytes left over after a complete tree.
    #[error("{0} trailing bytes after tree")]
    TrailingTreeBytes(usize),

    /// The data blob has no padding byte.
    #[error("data is missing its padding byte")]
    MissingPadding,

    /// The padding byte is outside `0..=7`.
    #[error("padding count {0} is outside 0..=7")]
    InvalidPadding(u8),

    /// The padding count is larger than the number of packed bits.
    #[error("padding count exceeds packed data")]
    PaddingExceedsData,

    /// The bitstream ran out part way through a code.
    #[error("bitstream ends mid-code")]
    TruncatedCode,

    /// A bit selected a branch the tree does not have.
    #[error("bit does not match any code")]
    UnexpectedBit,
}

fn describe_path(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

impl From<Corruption> for Error {
    fn from(reason: Corruption) -> Self {
        Error::SourceCorrupt { path: None, reason }
    }
}

impl Error {
    /// Attach the artifact path to a corruption error that does not carry one yet.
    ///
    /// Other variants already name their path and are returned unchanged.
    pub fn at(self, artifact: &Path) -> Self {
        match self {
            Error::SourceCorrupt { path: None, reason } => Error::SourceCorrupt {
                path: Some(artifact.to_path_buf()),
                reason,
            },
            other => other,
        }
    }

    /// The corruption cause, if this is a corruption error.
    pub fn corruption(&self) -> Option<Corruption> {
        match self {
            Error::SourceCorrupt { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
