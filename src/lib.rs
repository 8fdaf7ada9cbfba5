//! repo-save - encrypted save container editor
//!
//! This library decrypts, edits and re-encrypts R.E.P.O. save files. Saves
//! are AES-128-CBC containers holding a JSON document; the editor models a
//! handful of known fields and passes everything else through untouched.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Container codec (AES-128-CBC, PBKDF2-HMAC-SHA1)
//! - `document`: Typed view over the JSON save document
//! - `merge`: Reconciling structured and raw edits
//! - `storage`: Container repositories with atomic writes
//! - `services`: Editing session and save summaries
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use repo_save::crypto::DEFAULT_PASSWORD;
//! use repo_save::document::{FieldPath, RunStat};
//! use repo_save::services::SaveEditor;
//!
//! let (mut editor, _warnings) = SaveEditor::load(&bytes, DEFAULT_PASSWORD)?;
//! editor.set_field(FieldPath::RunStat(RunStat::Level), "10");
//! let outcome = editor.save(DEFAULT_PASSWORD)?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod document;
pub mod error;
pub mod merge;
pub mod services;
pub mod storage;

pub use error::{SaveError, SaveResult};
