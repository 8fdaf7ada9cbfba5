//! Service layer for repo-save
//!
//! The service layer drives the codec, document model and merge policy on
//! behalf of a presentation layer.

pub mod editor;
pub mod summary;

pub use editor::{apply_batch, get_field, load, save, set_field, SaveEditor, SaveOutcome};
pub use summary::SaveSummary;
