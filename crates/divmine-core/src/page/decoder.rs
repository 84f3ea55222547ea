//! Decoder for JSON page dumps.

use tracing::debug;

use super::{PageDecoder, RawDocument, RawPage, Result};
use crate::error::DecodeError;

/// Reads the JSON dump written by an external layout decoder.
///
/// Accepts either a whole document (`{"pages": [...]}`) or a bare page
/// (`{"boxes": [...]}`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPageDecoder;

impl JsonPageDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl PageDecoder for JsonPageDecoder {
    fn first_page(&self, data: &[u8]) -> Result<RawPage> {
        let value: serde_json::Value =
            serde_json::from_slice(data).map_err(|e| DecodeError::Parse(e.to_string()))?;

        if value.get("pages").is_some() {
            let doc: RawDocument =
                serde_json::from_value(value).map_err(|e| DecodeError::Parse(e.to_string()))?;
            debug!("Decoded document dump with {} pages", doc.pages.len());
            return doc.pages.into_iter().next().ok_or(DecodeError::NoPages);
        }

        if value.get("boxes").is_some() {
            return serde_json::from_value(value).map_err(|e| DecodeError::Parse(e.to_string()));
        }

        Err(DecodeError::Parse(
            "expected an object with \"pages\" or \"boxes\"".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Orientation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_bare_page() {
        let json = br#"{"boxes": [{"lines": [{"x0": 56.7, "y1": 700.2, "text": "Dividendengutschrift "}]}]}"#;
        let page = JsonPageDecoder::new().first_page(json).unwrap();

        let lines: Vec<_> = page.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Dividendengutschrift ");
        assert_eq!(lines[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_decode_document_takes_first_page() {
        let json = br#"{"pages": [
            {"boxes": [{"lines": [{"x0": 1, "y1": 2, "text": "first"}]}]},
            {"boxes": [{"lines": [{"x0": 1, "y1": 2, "text": "second"}]}]}
        ]}"#;
        let page = JsonPageDecoder::new().first_page(json).unwrap();
        assert_eq!(page.lines().next().unwrap().text, "first");
    }

    #[test]
    fn test_decode_vertical_line() {
        let json = br#"{"boxes": [{"lines": [{"x0": 1, "y1": 2, "text": "X", "orientation": "vertical"}]}]}"#;
        let page = JsonPageDecoder::new().first_page(json).unwrap();
        assert!(!page.lines().next().unwrap().is_horizontal());
    }

    #[test]
    fn test_decode_empty_document() {
        let err = JsonPageDecoder::new().first_page(br#"{"pages": []}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NoPages));
    }

    #[test]
    fn test_decode_garbage() {
        let err = JsonPageDecoder::new().first_page(b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, DecodeError::Parse(_)));

        let err = JsonPageDecoder::new().first_page(br#"{"foo": 1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Parse(_)));
    }
}
