//! Configuration module for repo-save
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RepoSavePaths;
pub use settings::Settings;
