//! Error types for the divmine-core library.

use thiserror::Error;

/// Main error type for the divmine library.
#[derive(Error, Debug)]
pub enum DivmineError {
    /// Page dump decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Statement field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No configured profile's marker occurs on the page.
    #[error("no known document-type marker found on page")]
    UnknownDocument,
}

/// Errors raised while turning decoder output into a page.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The page dump could not be parsed.
    #[error("failed to parse page dump: {0}")]
    Parse(String),

    /// The document has no pages.
    #[error("document has no pages")]
    NoPages,
}

/// Errors related to statement field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The document-type marker does not occur on the page.
    #[error("anchor '{marker}' of profile {profile} not found on page")]
    AnchorNotFound { profile: String, marker: String },

    /// An offset field points past the end of the ordered fragments.
    #[error("field {field} expected at position {index}, but page has only {len} fragments")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    /// A value could not be coerced to a decimal amount.
    #[error("failed to parse {field} from {value:?}: {reason}")]
    Parse {
        field: String,
        value: String,
        reason: String,
    },
}

/// Raw text that does not look like a comma-decimal amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a comma-decimal amount: {value:?}")]
pub struct AmountParseError {
    /// The offending input.
    pub value: String,
}

impl AmountParseError {
    /// Attach the field name the value was read for.
    pub fn for_field(self, field: &str) -> ExtractionError {
        let reason = self.to_string();
        ExtractionError::Parse {
            field: field.to_string(),
            value: self.value,
            reason,
        }
    }
}

/// Result type for the divmine library.
pub type Result<T> = std::result::Result<T, DivmineError>;
