//! Save document model
//!
//! A typed view over the decrypted JSON save. Only a subset of the game's
//! schema is modelled; everything else passes through verbatim.

mod access;
pub mod fields;
pub mod save_document;

pub use fields::{FieldPath, FieldValue, PlayerField, RunStat, Upgrade};
pub use save_document::{LoadWarning, Player, SaveDocument, DEFAULT_INDENT};
