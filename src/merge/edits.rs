//! Structured field edits
//!
//! Edits carry the user's raw input text. Parsing happens when the edit is
//! applied, and a field whose input does not parse is skipped with a
//! warning instead of failing the whole save.

use std::fmt;

use crate::document::{FieldPath, FieldValue, PlayerField, SaveDocument};
use crate::error::{SaveError, SaveResult};

/// A single structured edit: a known field and the text the user typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub path: FieldPath,
    pub input: String,
}

impl FieldEdit {
    pub fn new(path: FieldPath, input: impl Into<String>) -> Self {
        Self {
            path,
            input: input.into(),
        }
    }

    /// Parse a `PATH=VALUE` assignment, e.g. `runStats.level=5`
    pub fn parse_assignment(s: &str) -> SaveResult<Self> {
        let (path, input) = split_assignment(s)?;
        Ok(Self::new(path.parse()?, input))
    }
}

/// One value written to the same column of every known player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEdit {
    pub field: PlayerField,
    pub input: String,
}

impl BatchEdit {
    pub fn new(field: PlayerField, input: impl Into<String>) -> Self {
        Self {
            field,
            input: input.into(),
        }
    }

    /// Parse a `FIELD=VALUE` assignment, e.g. `playerUpgradeSpeed=3`
    pub fn parse_assignment(s: &str) -> SaveResult<Self> {
        let (field, input) = split_assignment(s)?;
        Ok(Self::new(field.parse()?, input))
    }
}

fn split_assignment(s: &str) -> SaveResult<(&str, &str)> {
    s.split_once('=')
        .ok_or_else(|| SaveError::Validation(format!("Expected FIELD=VALUE, got '{}'", s)))
}

/// A structured edit that was skipped; the field keeps its previous value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    /// Text form of the field or player column
    pub field: String,
    /// The input that was rejected
    pub input: String,
    /// Why it was rejected
    pub reason: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipped {} = '{}': {}; previous value kept",
            self.field, self.input, self.reason
        )
    }
}

/// Ordered structured edits for one save
///
/// Batch edits run before individual field edits, so a per-player value
/// set explicitly overrides a batch value for that player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    batch: Vec<BatchEdit>,
    fields: Vec<FieldEdit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: FieldEdit) {
        self.fields.push(edit);
    }

    pub fn push_batch(&mut self, edit: BatchEdit) {
        self.batch.push(edit);
    }

    /// Queue an edit from a path and raw input
    pub fn set(&mut self, path: FieldPath, input: impl Into<String>) {
        self.push(FieldEdit::new(path, input));
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty() && self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.batch.len() + self.fields.len()
    }

    pub fn clear(&mut self) {
        self.batch.clear();
        self.fields.clear();
    }

    pub fn batch_edits(&self) -> &[BatchEdit] {
        &self.batch
    }

    pub fn field_edits(&self) -> &[FieldEdit] {
        &self.fields
    }

    /// Apply every edit to `doc`, returning one warning per skipped edit
    pub fn apply_to(&self, doc: &mut SaveDocument) -> Vec<FieldWarning> {
        let batch = self
            .batch
            .iter()
            .filter_map(|edit| apply_batch(doc, edit.field, &edit.input).err());
        let mut warnings: Vec<FieldWarning> = batch.collect();

        warnings.extend(
            self.fields
                .iter()
                .filter_map(|edit| apply_field(doc, edit).err()),
        );
        warnings
    }
}

/// Apply a single edit; on failure the document is unchanged
pub fn apply_field(doc: &mut SaveDocument, edit: &FieldEdit) -> Result<(), FieldWarning> {
    let warn = |reason: String| {
        let warning = FieldWarning {
            field: edit.path.to_string(),
            input: edit.input.clone(),
            reason,
        };
        tracing::warn!(field = %warning.field, input = %warning.input, "{}", warning.reason);
        warning
    };

    let value = if edit.path.is_integer() {
        FieldValue::Integer(parse_integer(&edit.input).map_err(&warn)?)
    } else {
        FieldValue::Text(edit.input.clone())
    };

    doc.set_field(&edit.path, value)
        .map_err(|e| warn(e.to_string()))
}

/// Write one value to `field` for every player in `playerNames`
///
/// The input is parsed once; if it is not an integer nothing is written.
/// Returns the number of players updated.
pub fn apply_batch(
    doc: &mut SaveDocument,
    field: PlayerField,
    input: &str,
) -> Result<usize, FieldWarning> {
    let warn = |reason: String| {
        let warning = FieldWarning {
            field: field.to_string(),
            input: input.to_string(),
            reason,
        };
        tracing::warn!(field = %warning.field, input = %warning.input, "batch edit skipped: {}", warning.reason);
        warning
    };

    let value = parse_integer(input).map_err(&warn)?;
    let player_ids = doc.player_ids();
    for id in &player_ids {
        doc.set_player_value(field, id, value)
            .map_err(|e| warn(e.to_string()))?;
    }

    tracing::debug!(%field, value, players = player_ids.len(), "applied batch edit");
    Ok(player_ids.len())
}

fn parse_integer(input: &str) -> Result<i64, String> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("'{}' is not an integer ({})", input.trim(), e))
}
