//! In-memory container repository
//!
//! Holds container bytes keyed by path. Used where saves are staged without
//! touching disk, and to observe exactly what a save attempt wrote.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::SaveError;

use super::ContainerRepository;

/// Repository backed by a map of path to bytes
#[derive(Debug, Default)]
pub struct MemoryRepository {
    data: RwLock<HashMap<PathBuf, Vec<u8>>>,
    writes: RwLock<usize>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding one container
    pub fn with_container(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let repo = Self::new();
        if let Ok(mut data) = repo.data.write() {
            data.insert(path.into(), bytes);
        }
        repo
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|n| *n).unwrap_or(0)
    }
}

impl ContainerRepository for MemoryRepository {
    fn read_container(&self, path: &Path) -> Result<Vec<u8>, SaveError> {
        let data = self
            .data
            .read()
            .map_err(|e| SaveError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        data.get(path)
            .cloned()
            .ok_or_else(|| SaveError::Storage(format!("File not found: {}", path.display())))
    }

    fn write_container(&self, path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SaveError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(path.to_path_buf(), bytes.to_vec());

        let mut writes = self
            .writes
            .write()
            .map_err(|e| SaveError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *writes += 1;
        Ok(())
    }
}
