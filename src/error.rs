//! Custom error types for repo-save
//!
//! This module defines the error hierarchy for the save pipeline using
//! thiserror. Each variant maps to the stage of the
//! decode -> parse -> merge -> encode -> write pipeline that failed, so the
//! caller can present a specific message.

use thiserror::Error;

use crate::merge::MergeError;

/// The pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Container framing or decryption
    Decode,
    /// UTF-8 decoding of the decrypted bytes
    Text,
    /// JSON parsing of the document
    Parse,
    /// Reconciling structured and raw edits
    Merge,
    /// Reading or writing the container file
    Storage,
    /// Settings and paths
    Config,
    /// Field addressing and input validation
    Input,
}

/// The main error type for save container operations
#[derive(Error, Debug)]
pub enum SaveError {
    /// Container too short or ciphertext not block aligned
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// Padding validation failed after decryption
    #[error("Decode error: wrong password or corrupted file ({0})")]
    Decode(String),

    /// Decrypted bytes are not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Document text is not valid JSON
    #[error("JSON syntax error: {0}")]
    JsonSyntax(String),

    /// Edit reconciliation failed
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Invalid user input (unknown field names, malformed assignments)
    #[error("Validation error: {0}")]
    Validation(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SaveError {
    /// The pipeline stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            Self::MalformedContainer(_) | Self::Decode(_) => Stage::Decode,
            Self::Encoding(_) => Stage::Text,
            Self::JsonSyntax(_) => Stage::Parse,
            Self::Merge(_) => Stage::Merge,
            Self::Validation(_) => Stage::Input,
            Self::Io(_) | Self::Storage(_) => Stage::Storage,
            Self::Config(_) => Stage::Config,
        }
    }

    /// Whether the user can fix the input and retry the same operation
    ///
    /// Only merge-time failures are recoverable: the container on disk is
    /// untouched and the raw text can be corrected.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Merge(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonSyntax(err.to_string())
    }
}

/// Result type alias for save container operations
pub type SaveResult<T> = Result<T, SaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SaveError::MalformedContainer("10 bytes".into());
        assert_eq!(err.to_string(), "Malformed container: 10 bytes");
    }

    #[test]
    fn test_decode_error_mentions_password() {
        let err = SaveError::Decode("bad padding".into());
        assert!(err.to_string().contains("wrong password or corrupted file"));
        assert_eq!(err.stage(), Stage::Decode);
    }

    #[test]
    fn test_merge_error_is_recoverable() {
        let err: SaveError = MergeError::InvalidRawJson("eof".into()).into();
        assert!(err.is_recoverable());
        assert_eq!(err.stage(), Stage::Merge);
        assert!(!SaveError::JsonSyntax("eof".into()).is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let save_err: SaveError = io_err.into();
        assert!(matches!(save_err, SaveError::Io(_)));
        assert_eq!(save_err.stage(), Stage::Storage);
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let save_err: SaveError = json_err.into();
        assert!(matches!(save_err, SaveError::JsonSyntax(_)));
    }
}
