//! User settings for repo-save
//!
//! Output formatting and logging preferences. Cryptographic parameters are
//! not settings: the container format fixes them.

use serde::{Deserialize, Serialize};

use super::paths::RepoSavePaths;
use crate::document::DEFAULT_INDENT;
use crate::error::SaveError;
use crate::storage::write_bytes_atomic;

/// User settings for repo-save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Spaces per indentation level in saved and displayed JSON
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            indent_width: default_indent_width(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &RepoSavePaths) -> Result<Self, SaveError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SaveError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| SaveError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RepoSavePaths) -> Result<(), SaveError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SaveError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_bytes_atomic(paths.settings_file(), contents.as_bytes())
    }
}
