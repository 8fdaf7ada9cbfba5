//! Container storage
//!
//! The core never decides where saves live or how backups are organised.
//! It reads and writes single container files through a
//! [`ContainerRepository`], supplied by whoever manages the save folders.

pub mod file_io;
pub mod memory;

pub use file_io::{read_bytes, write_bytes_atomic};
pub use memory::MemoryRepository;

use std::path::Path;

use crate::error::SaveError;

/// Source and sink for container bytes
///
/// Implementations are responsible for keeping concurrent writers off the
/// same path.
pub trait ContainerRepository {
    /// Read a whole container
    fn read_container(&self, path: &Path) -> Result<Vec<u8>, SaveError>;

    /// Replace a container; must leave the old bytes intact on failure
    fn write_container(&self, path: &Path, bytes: &[u8]) -> Result<(), SaveError>;
}

/// Repository over the local filesystem with atomic replacement
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRepository;

impl FileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerRepository for FileRepository {
    fn read_container(&self, path: &Path) -> Result<Vec<u8>, SaveError> {
        read_bytes(path)
    }

    fn write_container(&self, path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
        write_bytes_atomic(path, bytes)
    }
}
