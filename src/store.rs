//! Byte sources and sinks addressed by path.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Reads a whole artifact into memory.
pub trait ByteSource {
    /// Read every byte at `path`.
    ///
    /// # Errors
    /// Returns `Error::SourceNotFound` naming `path` on any read failure.
    fn read_all(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Writes a whole artifact.
pub trait ByteSink {
    /// Replace the contents at `path` with `bytes`.
    ///
    /// # Errors
    /// Returns `Error::SinkWriteFailed` naming `path` on any write failure.
    fn write_all(&mut self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Delete the artifact at `path`, used to undo a partial write.
    ///
    /// # Errors
    /// Returns `Error::SinkWriteFailed` naming `path` if it cannot be removed.
    fn remove(&mut self, path: &Path) -> Result<()>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ByteSource for FsStore {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|source| Error::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ByteSink for FsStore {
    fn write_all(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes).map_err(|source| Error::SinkWriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|source| Error::SinkWriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// An in-memory path -> bytes map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an artifact.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    /// The artifact at `path`, if present.
    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ByteSource for MemoryStore {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::SourceNotFound {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }
}

impl ByteSink for MemoryStore {
    fn write_all(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.insert(path, bytes);
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        self.files.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_reports_missing_path() {
        let store = MemoryStore::new();
        let err = store.read_all(Path::new("nope")).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { ref path, .. } if path == Path::new("nope")));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store.write_all(Path::new("a"), b"xyz").unwrap();
        assert_eq!(store.read_all(Path::new("a")).unwrap(), b"xyz");
        assert_eq!(store.len(), 1);

        store.remove(Path::new("a")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_fs_store_names_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        let err = FsStore.read_all(&path).unwrap_err();
        assert!(err.to_string().contains("missing.bin"));
    }
}
