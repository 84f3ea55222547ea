//! Fields located by a label on the same visual line.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::rules::parse_amount_field;
use crate::error::ExtractionError;
use crate::layout::OrderedFragments;
use crate::models::profile::KeywordField;
use crate::models::values::FieldValue;

/// Extract keyword fields: the value is the rightmost fragment of the line
/// whose text contains the field's label.
///
/// Line lookup is last-match-wins: when a line matches several labels, the
/// field listed later claims it; when a label matches several lines, each
/// line yields a value and the lowest one on the page is kept. A label that
/// matches nothing produces no entry. A line whose rightmost fragment is not
/// an amount fails with [`ExtractionError::Parse`].
pub fn extract_keyword_fields(
    fragments: &OrderedFragments,
    fields: &[KeywordField],
) -> Result<Vec<(String, FieldValue)>, ExtractionError> {
    let mut matched_lines: HashMap<i64, &str> = HashMap::new();
    for field in fields {
        for fragment in fragments {
            if fragment.text.contains(field.label.as_str()) {
                trace!("Label {:?} on line y={}", field.label, fragment.y);
                matched_lines.insert(fragment.y, field.name.as_str());
            }
        }
    }

    let mut values = Vec::new();
    for line in fragments.lines() {
        let Some(&name) = matched_lines.get(&line.y) else {
            continue;
        };
        let Some(last) = line.last() else {
            continue;
        };

        debug!("{} <- {:?} (line y={})", name, line.text(), line.y);
        let amount = parse_amount_field(name, &last.text)?;
        values.push((name.to_string(), FieldValue::Amount(amount)));
    }

    Ok(values)
}
