//! Value rules for statement fields.

pub mod amounts;
pub mod patterns;

pub use amounts::{format_german_amount, parse_german_amount};

use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::models::values::{FieldValue, ValueKind};

/// Turn the raw text of `field` into a value of the requested kind.
pub fn coerce(field: &str, raw: &str, kind: ValueKind) -> Result<FieldValue, ExtractionError> {
    match kind {
        ValueKind::Text => Ok(FieldValue::Text(raw.to_string())),
        ValueKind::Amount => parse_amount_field(field, raw).map(FieldValue::Amount),
    }
}

/// Parse an amount, tagging failures with the field name.
pub fn parse_amount_field(field: &str, raw: &str) -> Result<Decimal, ExtractionError> {
    parse_german_amount(raw).map_err(|e| e.for_field(field))
}
