//! Statement field extraction module.

mod anchor;
mod keyword;
mod offset;
mod parser;
pub mod rules;

pub use anchor::{locate_anchor, AnchorIndex};
pub use keyword::extract_keyword_fields;
pub use offset::extract_offset_fields;
pub use parser::{extract_statement, identify_profile, ExtractionResult, StatementParser};

use crate::error::ExtractionError;
use crate::page::RawPage;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for statement extractors.
pub trait StatementExtractor {
    /// Extract the fields of one page.
    fn process(&self, page: &RawPage) -> Result<ExtractionResult>;
}
