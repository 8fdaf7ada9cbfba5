//! File I/O utilities with atomic writes
//!
//! Provides safe container file operations that won't destroy a save on
//! failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SaveError;

/// Read a container file, returning an error if it doesn't exist
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, SaveError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SaveError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    fs::read(path)
        .map_err(|e| SaveError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left exactly as it was,
/// even if the process dies mid-write.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), SaveError> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SaveError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| SaveError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all());
    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(SaveError::Storage(format!("Failed to write temp file: {}", e)));
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SaveError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    // Persist the rename itself; not every platform can open a directory
    if let Err(e) = sync_parent_dir(path) {
        tracing::debug!(path = %path.display(), error = %e, "could not sync parent directory");
    }

    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote container");
    Ok(())
}

/// Flush the directory entry for `path` to disk
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    File::open(parent)?.sync_all()
}

/// `<name>.tmp` next to `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("container"));
    name.push(".tmp");
    path.with_file_name(name)
}
