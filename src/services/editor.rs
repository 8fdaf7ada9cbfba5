//! Save editing session
//!
//! Ties the pipeline together for a presentation layer:
//! container bytes -> decode -> parse -> edits -> resolve -> serialize ->
//! encode -> container bytes. A session only adopts the saved document and
//! returns to `Clean` once the new container has been produced (and, for
//! [`SaveEditor::save_to`], written).

use std::path::Path;

use crate::crypto;
use crate::document::{
    FieldPath, FieldValue, LoadWarning, PlayerField, SaveDocument, DEFAULT_INDENT,
};
use crate::error::SaveResult;
use crate::merge::{self, BatchEdit, EditSet, EditState, FieldEdit, FieldWarning, ResolvedFrom};
use crate::storage::ContainerRepository;

/// Result of a successful save
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    /// The new container bytes
    pub container: Vec<u8>,
    /// Structured edits that were skipped
    pub warnings: Vec<FieldWarning>,
    /// Structured edits dropped because the raw document won
    pub discarded: usize,
    /// Which edit surface produced the saved document
    pub source: ResolvedFrom,
}

/// An editing session over one loaded save
#[derive(Debug, Clone)]
pub struct SaveEditor {
    loaded: SaveDocument,
    edits: EditSet,
    raw_text: Option<String>,
    state: EditState,
    indent: usize,
}

impl SaveEditor {
    /// Decode and parse a container, starting a `Clean` session
    pub fn load(container: &[u8], password: &str) -> SaveResult<(Self, Vec<LoadWarning>)> {
        let (document, warnings) = load(container, password)?;
        Ok((Self::from_document(document), warnings))
    }

    /// Start a session over an already parsed document
    pub fn from_document(document: SaveDocument) -> Self {
        Self {
            loaded: document,
            edits: EditSet::new(),
            raw_text: None,
            state: EditState::Clean,
            indent: DEFAULT_INDENT,
        }
    }

    /// Indentation for the raw view and the saved JSON
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// The document as of the last load or save
    pub fn document(&self) -> &SaveDocument {
        &self.loaded
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Structured edits queued for the next save
    pub fn pending_edits(&self) -> &EditSet {
        &self.edits
    }

    /// Text for the raw view: the user's edited text if any, else the
    /// loaded document
    pub fn raw_text(&self) -> SaveResult<String> {
        match &self.raw_text {
            Some(text) => Ok(text.clone()),
            None => self.loaded.serialize_with_indent(self.indent),
        }
    }

    /// Record a modification of the raw view
    pub fn edit_raw(&mut self, text: impl Into<String>) {
        self.raw_text = Some(text.into());
        self.state = self.state.on_raw_edit();
    }

    /// Throw away raw edits and fall back to structured edits
    pub fn revert_raw(&mut self) {
        self.raw_text = None;
        self.state = EditState::Clean;
    }

    /// Current value of a known field in the loaded document
    ///
    /// Queued edits are not visible until saved; use
    /// [`preview_field`](Self::preview_field) to see them.
    pub fn get_field(&self, path: &FieldPath) -> FieldValue {
        self.loaded.get_field(path)
    }

    /// The loaded document with the queued structured edits applied
    ///
    /// Raw text is ignored. Edits that a save would skip are skipped here too.
    pub fn preview(&self) -> SaveDocument {
        let mut document = self.loaded.clone();
        self.edits.apply_to(&mut document);
        document
    }

    /// Value a field would have if the queued structured edits were saved
    pub fn preview_field(&self, path: &FieldPath) -> FieldValue {
        self.preview().get_field(path)
    }

    /// Queue a structured edit
    pub fn set_field(&mut self, path: FieldPath, input: impl Into<String>) {
        self.edits.push(FieldEdit::new(path, input));
    }

    /// Queue a value for one column across every known player
    pub fn apply_batch(&mut self, field: PlayerField, input: impl Into<String>) {
        self.edits.push_batch(BatchEdit::new(field, input));
    }

    /// Resolve edits and encode a new container
    ///
    /// On success the saved document becomes the loaded one and the session
    /// is `Clean`. On failure nothing changes and the caller may fix the raw
    /// text and retry.
    pub fn save(&mut self, password: &str) -> SaveResult<SaveOutcome> {
        let (document, outcome) = self.prepare(password)?;
        self.commit(document);
        Ok(outcome)
    }

    /// As [`save`](Self::save), then write the container through `repo`
    ///
    /// The session only transitions to `Clean` after the write succeeds.
    pub fn save_to<R>(&mut self, repo: &R, path: &Path, password: &str) -> SaveResult<SaveOutcome>
    where
        R: ContainerRepository + ?Sized,
    {
        let (document, outcome) = self.prepare(password)?;
        repo.write_container(path, &outcome.container)?;
        self.commit(document);
        Ok(outcome)
    }

    fn prepare(&self, password: &str) -> SaveResult<(SaveDocument, SaveOutcome)> {
        let resolution = merge::resolve(
            &self.loaded,
            &self.edits,
            self.raw_text.as_deref(),
            self.state,
        )?;
        let text = resolution.document.serialize_with_indent(self.indent)?;
        let container = crypto::encode_string(&text, password);

        tracing::info!(
            source = ?resolution.source,
            skipped = resolution.warnings.len(),
            bytes = container.len(),
            "prepared save"
        );

        Ok((
            resolution.document,
            SaveOutcome {
                container,
                warnings: resolution.warnings,
                discarded: resolution.discarded,
                source: resolution.source,
            },
        ))
    }

    fn commit(&mut self, document: SaveDocument) {
        self.loaded = document;
        self.edits.clear();
        self.raw_text = None;
        self.state = self.state.on_saved();
    }
}

/// Decode and parse a container
///
/// Load warnings describe missing structure; they never stop the load.
pub fn load(container: &[u8], password: &str) -> SaveResult<(SaveDocument, Vec<LoadWarning>)> {
    let text = crypto::decode_string(container, password)?;
    let document = SaveDocument::parse(&text)?;
    let warnings = document.load_warnings();
    for warning in &warnings {
        tracing::debug!(%warning, "load warning");
    }
    Ok((document, warnings))
}

/// Read a known field
pub fn get_field(doc: &SaveDocument, path: &FieldPath) -> FieldValue {
    doc.get_field(path)
}

/// Apply one structured edit directly to a document
pub fn set_field(
    doc: &mut SaveDocument,
    path: FieldPath,
    input: impl Into<String>,
) -> Result<(), FieldWarning> {
    merge::apply_field(doc, &FieldEdit::new(path, input))
}

/// Write one value to a column for every known player
pub fn apply_batch(
    doc: &mut SaveDocument,
    field: PlayerField,
    input: &str,
) -> Result<usize, FieldWarning> {
    merge::apply_batch(doc, field, input)
}

/// Resolve a document that already carries its structured edits
///
/// Returns the new container and the state to adopt once the caller has
/// written it. Invalid raw JSON in `RawDirty` state fails before anything is
/// encoded.
pub fn save(
    doc: &SaveDocument,
    raw_text: Option<&str>,
    state: EditState,
    password: &str,
) -> SaveResult<(Vec<u8>, EditState)> {
    let resolution = merge::resolve(doc, &EditSet::new(), raw_text, state)?;
    let text = resolution.document.serialize()?;
    Ok((crypto::encode_string(&text, password), state.on_saved()))
}
