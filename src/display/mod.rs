//! Display formatting for terminal output

pub mod save;

pub use save::{format_document, format_players, format_summary, format_warnings, format_world};
