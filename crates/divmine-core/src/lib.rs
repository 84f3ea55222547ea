//! Core library for mining figures from bank dividend statements.
//!
//! This crate provides:
//! - A page model for positioned text produced by a layout decoder
//! - Line reconstruction (coordinate bucketing, reading order)
//! - Profile-driven field extraction (anchor offsets, line labels)
//! - Exact decimal coercion of German-formatted amounts

pub mod error;
pub mod layout;
pub mod models;
pub mod page;
pub mod statement;

pub use error::{AmountParseError, DecodeError, DivmineError, ExtractionError, Result};
pub use layout::{OrderedFragments, TextFragment};
pub use models::config::{AnchorPolicy, DivmineConfig};
pub use models::profile::{DocumentProfile, KeywordField, OffsetField};
pub use models::values::{ExtractedValues, FieldValue, ValueKind};
pub use page::{JsonPageDecoder, PageDecoder, RawDocument, RawPage, RawTextBox, RawTextLine};
pub use statement::{
    extract_statement, identify_profile, ExtractionResult, StatementExtractor, StatementParser,
};
