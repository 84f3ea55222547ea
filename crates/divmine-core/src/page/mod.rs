//! Positioned text as delivered by an upstream page-layout decoder.

mod decoder;

pub use decoder::JsonPageDecoder;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Result type for page decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Writing direction of a decoded text line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Left-to-right line.
    #[default]
    Horizontal,
    /// Top-to-bottom line (rotated labels, margins).
    Vertical,
}

/// A single decoded text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTextLine {
    /// Horizontal start coordinate.
    pub x0: f64,
    /// Vertical top coordinate (page origin bottom-left, grows upwards).
    pub y1: f64,
    /// Text content, possibly with surrounding whitespace.
    pub text: String,
    #[serde(default)]
    pub orientation: Orientation,
}

impl RawTextLine {
    pub fn horizontal(x0: f64, y1: f64, text: impl Into<String>) -> Self {
        Self {
            x0,
            y1,
            text: text.into(),
            orientation: Orientation::Horizontal,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }
}

/// A decoded text box holding one or more lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTextBox {
    pub lines: Vec<RawTextLine>,
}

/// All text boxes of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub boxes: Vec<RawTextBox>,
}

impl RawPage {
    /// Build a page where every line sits in its own text box.
    pub fn from_lines(lines: impl IntoIterator<Item = RawTextLine>) -> Self {
        Self {
            boxes: lines
                .into_iter()
                .map(|line| RawTextBox { lines: vec![line] })
                .collect(),
        }
    }

    /// Iterate over every line of every box.
    pub fn lines(&self) -> impl Iterator<Item = &RawTextLine> {
        self.boxes.iter().flat_map(|tb| tb.lines.iter())
    }
}

/// A multi-page decoder dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub pages: Vec<RawPage>,
}

/// Trait for page-layout decoders.
///
/// Statements are read from their first page only.
pub trait PageDecoder {
    /// Decode the first page of a document.
    fn first_page(&self, data: &[u8]) -> Result<RawPage>;
}
