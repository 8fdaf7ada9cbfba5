//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod save;

pub use save::{handle_save_command, SaveCommands};
