//! Document-type profiles.
//!
//! A profile is pure data: the marker that identifies the document type,
//! the fields found at fixed reading-order offsets after that marker, and
//! the fields found by line label. Supporting another statement layout means
//! adding a profile, not code.

use serde::{Deserialize, Serialize};

use super::values::ValueKind;

/// A field read at a fixed position after the anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetField {
    /// Output field name.
    pub name: String,
    /// Distance from the anchor in reading order.
    pub offset: usize,
    /// Value coercion.
    #[serde(default)]
    pub kind: ValueKind,
}

impl OffsetField {
    pub fn new(name: impl Into<String>, offset: usize, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            offset,
            kind,
        }
    }
}

/// A field whose value is the last fragment on the line containing `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordField {
    /// Output field name.
    pub name: String,
    /// Substring identifying the line.
    pub label: String,
}

impl KeywordField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Extraction settings for one document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentProfile {
    /// Short selector, e.g. the bank code used on the command line.
    pub id: String,

    /// Human readable description.
    #[serde(default)]
    pub description: String,

    /// Exact text of the document-type header.
    pub marker: String,

    /// Field receiving the marker text when it is found.
    #[serde(default = "default_type_field")]
    pub type_field: String,

    /// Fields at fixed offsets from the marker.
    #[serde(default)]
    pub offset_fields: Vec<OffsetField>,

    /// Fields located by line label. Always coerced to amounts.
    #[serde(default)]
    pub keyword_fields: Vec<KeywordField>,
}

fn default_type_field() -> String {
    "type".to_string()
}

impl DocumentProfile {
    /// Deutsche Bank dividend credit note ("Dividendengutschrift").
    pub fn deutsche_bank_dividend() -> Self {
        Self {
            id: "DB".to_string(),
            description: "Deutsche Bank Dividendengutschrift".to_string(),
            marker: "Dividendengutschrift".to_string(),
            type_field: default_type_field(),
            offset_fields: vec![
                OffsetField::new("quantity", 4, ValueKind::Amount),
                OffsetField::new("WKN", 5, ValueKind::Text),
                OffsetField::new("ISIN", 6, ValueKind::Text),
                OffsetField::new("name", 7, ValueKind::Text),
            ],
            keyword_fields: vec![
                KeywordField::new("Dividend", "Bruttoertrag"),
                KeywordField::new("KESt", "Kapitalertragsteuer (KESt)"),
                KeywordField::new("QuSt", "% Ausländische Quellensteuer"),
                KeywordField::new("SolZ", "Solidaritätszuschlag auf KESt"),
                KeywordField::new("Bank", "Gutschrift mit Wert"),
            ],
        }
    }

    /// Every field name this profile can produce.
    pub fn field_names(&self) -> Vec<&str> {
        std::iter::once(self.type_field.as_str())
            .chain(self.offset_fields.iter().map(|f| f.name.as_str()))
            .chain(self.keyword_fields.iter().map(|f| f.name.as_str()))
            .collect()
    }
}

/// Profiles shipped with the library.
pub fn builtin_profiles() -> Vec<DocumentProfile> {
    vec![DocumentProfile::deutsche_bank_dividend()]
}
