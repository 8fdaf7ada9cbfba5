//! Edit reconciliation
//!
//! Two edit surfaces feed a save: structured field edits and the raw JSON
//! text. They are never merged field by field. If the raw text was touched
//! since the last load or save it replaces the document wholesale;
//! otherwise the structured edits are applied to the loaded document.

pub mod edits;

pub use edits::{apply_batch, apply_field, BatchEdit, EditSet, FieldEdit, FieldWarning};

use thiserror::Error;

use crate::document::SaveDocument;

/// Failures that abort a save before anything is written
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The raw document was edited but is not valid JSON
    #[error("Invalid JSON in raw document: {0}")]
    InvalidRawJson(String),

    /// The raw document is marked edited but no text was supplied
    #[error("Raw document marked as edited but no raw text was supplied")]
    MissingRawText,
}

/// Whether the raw text has been edited since the last load or save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// No raw edits; structured edits decide the saved document
    #[default]
    Clean,
    /// Raw text was edited; it replaces the document on save
    RawDirty,
}

impl EditState {
    /// State after the user modifies the raw text
    pub fn on_raw_edit(self) -> Self {
        Self::RawDirty
    }

    /// State after a save has been encoded and written
    pub fn on_saved(self) -> Self {
        Self::Clean
    }

    pub fn is_raw_dirty(&self) -> bool {
        matches!(self, Self::RawDirty)
    }
}

/// Which edit surface produced the resolved document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFrom {
    Structured,
    Raw,
}

/// The document to persist, with any skipped structured edits
#[derive(Debug, Clone)]
pub struct Resolution {
    pub document: SaveDocument,
    /// Structured edits that were skipped; always empty for `Raw`
    pub warnings: Vec<FieldWarning>,
    /// Structured edits dropped because the raw document won
    pub discarded: usize,
    pub source: ResolvedFrom,
}

/// Reconcile structured and raw edits into the document to persist
///
/// In `Clean` state the structured edits are applied to a copy of `loaded`.
/// In `RawDirty` state the parsed raw text replaces the document entirely
/// and structured edits are discarded unapplied, so they produce no
/// warnings. Invalid raw JSON aborts with [`MergeError::InvalidRawJson`] and
/// nothing should be written.
pub fn resolve(
    loaded: &SaveDocument,
    edits: &EditSet,
    raw_text: Option<&str>,
    state: EditState,
) -> Result<Resolution, MergeError> {
    match state {
        EditState::Clean => {
            let mut document = loaded.clone();
            let warnings = edits.apply_to(&mut document);
            Ok(Resolution {
                document,
                warnings,
                discarded: 0,
                source: ResolvedFrom::Structured,
            })
        }
        EditState::RawDirty => {
            let text = raw_text.ok_or(MergeError::MissingRawText)?;
            let document = SaveDocument::parse(text)
                .map_err(|e| MergeError::InvalidRawJson(e.to_string()))?;

            if !edits.is_empty() {
                tracing::debug!(
                    discarded = edits.len(),
                    "raw document edited; structured edits discarded"
                );
            }

            Ok(Resolution {
                document,
                warnings: Vec::new(),
                discarded: edits.len(),
                source: ResolvedFrom::Raw,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{FieldPath, RunStat};
    use serde_json::json;

    fn loaded() -> SaveDocument {
        SaveDocument::parse(r#"{"teamName":{"value":"A"},"other":[1,2,3]}"#).unwrap()
    }

    fn team_edit(name: &str) -> EditSet {
        let mut edits = EditSet::new();
        edits.set(FieldPath::TeamName, name);
        edits
    }

    #[test]
    fn test_clean_applies_structured_edits() {
        let resolution = resolve(&loaded(), &team_edit("B"), None, EditState::Clean).unwrap();
        assert_eq!(resolution.source, ResolvedFrom::Structured);
        assert_eq!(
            resolution.document.as_value(),
            &json!({"teamName": {"value": "B"}, "other": [1, 2, 3]})
        );
    }

    #[test]
    fn test_clean_ignores_raw_text() {
        let resolution =
            resolve(&loaded(), &EditSet::new(), Some("{not json"), EditState::Clean).unwrap();
        assert_eq!(resolution.document, loaded());
    }

    #[test]
    fn test_raw_dirty_replaces_document() {
        let resolution =
            resolve(&loaded(), &team_edit("B"), Some(r#"{"x":1}"#), EditState::RawDirty).unwrap();
        assert_eq!(resolution.source, ResolvedFrom::Raw);
        assert_eq!(resolution.document.as_value(), &json!({"x": 1}));
        assert_eq!(resolution.discarded, 1);
    }

    #[test]
    fn test_raw_dirty_reports_no_warnings_for_discarded_edits() {
        let mut edits = team_edit("B");
        edits.set(FieldPath::RunStat(RunStat::Level), "ten");

        let resolution =
            resolve(&loaded(), &edits, Some(r#"{"x":1}"#), EditState::RawDirty).unwrap();

        assert!(resolution.warnings.is_empty());
        assert_eq!(resolution.discarded, 2);
    }

    #[test]
    fn test_raw_dirty_invalid_json_aborts() {
        let err = resolve(&loaded(), &team_edit("B"), Some("{not json"), EditState::RawDirty)
            .unwrap_err();
        assert!(matches!(err, MergeError::InvalidRawJson(_)));
    }

    #[test]
    fn test_raw_dirty_without_text() {
        let err = resolve(&loaded(), &EditSet::new(), None, EditState::RawDirty).unwrap_err();
        assert_eq!(err, MergeError::MissingRawText);
    }

    #[test]
    fn test_warnings_reported_and_save_proceeds() {
        let mut edits = team_edit("B");
        edits.set(FieldPath::RunStat(RunStat::Level), "ten");

        let resolution = resolve(&loaded(), &edits, None, EditState::Clean).unwrap();

        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.document.team_name(), "B");
        assert_eq!(resolution.document.run_stat(RunStat::Level), 0);
    }

    #[test]
    fn test_loaded_document_untouched() {
        let original = loaded();
        resolve(&original, &team_edit("B"), None, EditState::Clean).unwrap();
        assert_eq!(original.team_name(), "A");
    }

    #[test]
    fn test_state_transitions() {
        let state = EditState::default();
        assert_eq!(state, EditState::Clean);
        let state = state.on_raw_edit();
        assert!(state.is_raw_dirty());
        assert_eq!(state.on_raw_edit(), EditState::RawDirty);
        assert_eq!(state.on_saved(), EditState::Clean);
    }
}
