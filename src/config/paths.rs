//! Path management for repo-save
//!
//! ## Path Resolution Order
//!
//! 1. `REPO_SAVE_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/repo-save` on Linux, `%APPDATA%\repo-save\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SaveError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "REPO_SAVE_CONFIG_DIR";

/// Manages all paths used by repo-save
#[derive(Debug, Clone)]
pub struct RepoSavePaths {
    /// Base directory for configuration
    base_dir: PathBuf,
}

impl RepoSavePaths {
    /// Create a new RepoSavePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SaveError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create RepoSavePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SaveError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SaveError::Io(format!("Failed to create config directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, SaveError> {
    ProjectDirs::from("", "", "repo-save")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SaveError::Config("Could not determine home directory".into()))
}
