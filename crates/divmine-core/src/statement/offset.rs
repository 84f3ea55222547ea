//! Fields at fixed reading-order offsets from the anchor.

use tracing::trace;

use super::anchor::AnchorIndex;
use super::rules::coerce;
use crate::error::ExtractionError;
use crate::layout::OrderedFragments;
use crate::models::profile::OffsetField;
use crate::models::values::FieldValue;

/// Read every offset field relative to `anchor`.
///
/// Offsets count fragments in full reading order, not lines.
pub fn extract_offset_fields(
    fragments: &OrderedFragments,
    anchor: AnchorIndex,
    fields: &[OffsetField],
) -> Result<Vec<(String, FieldValue)>, ExtractionError> {
    fields
        .iter()
        .map(|field| {
            let index = anchor.offset(field.offset);
            let fragment = fragments
                .get(index)
                .ok_or_else(|| ExtractionError::IndexOutOfRange {
                    field: field.name.clone(),
                    index,
                    len: fragments.len(),
                })?;

            trace!("{} <- [{}] {:?}", field.name, index, fragment.text);
            let value = coerce(&field.name, &fragment.text, field.kind)?;
            Ok((field.name.clone(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextFragment;
    use crate::models::values::ValueKind;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn ordered(texts: &[&str]) -> OrderedFragments {
        OrderedFragments::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| TextFragment::new(10, 1000 - 10 * i as i64, *t))
                .collect(),
        )
    }

    fn db_fields() -> Vec<OffsetField> {
        vec![
            OffsetField::new("quantity", 4, ValueKind::Amount),
            OffsetField::new("WKN", 5, ValueKind::Text),
            OffsetField::new("ISIN", 6, ValueKind::Text),
            OffsetField::new("name", 7, ValueKind::Text),
        ]
    }

    #[test]
    fn test_offsets_measured_from_anchor() {
        let mut texts = vec!["filler"; 10];
        texts.extend([
            "Dividendengutschrift",
            "Stück",
            "WKN",
            "ISIN",
            "10,00",
            "WKN123",
            "ISIN456",
            "Example AG",
            "",
        ]);
        let fragments = ordered(&texts);

        let values = extract_offset_fields(&fragments, AnchorIndex::new(10), &db_fields()).unwrap();
        assert_eq!(
            values,
            vec![
                ("quantity".to_string(), FieldValue::Amount(Decimal::from_str("10.00").unwrap())),
                ("WKN".to_string(), FieldValue::Text("WKN123".to_string())),
                ("ISIN".to_string(), FieldValue::Text("ISIN456".to_string())),
                ("name".to_string(), FieldValue::Text("Example AG".to_string())),
            ]
        );
    }

    #[test]
    fn test_shifted_anchor_shifts_fields() {
        let fragments = ordered(&["Dividendengutschrift", "a", "b", "c", "3,00", "W", "I", "N"]);
        let values = extract_offset_fields(&fragments, AnchorIndex::new(0), &db_fields()).unwrap();
        assert_eq!(values[0].1, FieldValue::Amount(Decimal::from_str("3.00").unwrap()));
        assert_eq!(values[3].1, FieldValue::Text("N".to_string()));
    }

    #[test]
    fn test_index_out_of_range() {
        let fragments = ordered(&["Dividendengutschrift", "a", "b", "c", "3,00", "W"]);
        let err = extract_offset_fields(&fragments, AnchorIndex::new(0), &db_fields()).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::IndexOutOfRange {
                field: "ISIN".to_string(),
                index: 6,
                len: 6,
            }
        );
    }

    #[test]
    fn test_non_numeric_quantity() {
        let fragments = ordered(&["Dividendengutschrift", "a", "b", "c", "Stück", "W", "I", "N"]);
        let err = extract_offset_fields(&fragments, AnchorIndex::new(0), &db_fields()).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { ref field, ref value, .. } if field == "quantity" && value == "Stück"));
    }
}
