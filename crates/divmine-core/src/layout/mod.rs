//! Reconstruction of reading-order text lines from positioned fragments.

mod order;

pub use order::{Line, OrderedFragments};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::page::RawPage;

/// Default vertical bucket width.
pub const DEFAULT_LINE_BUCKET: f64 = 2.0;

/// A positioned piece of text with quantized coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextFragment {
    /// Rounded horizontal start.
    pub x: i64,
    /// Vertical top, snapped to the line bucket grid.
    pub y: i64,
    /// Trimmed text.
    pub text: String,
}

impl TextFragment {
    pub fn new(x: i64, y: i64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }

    /// Quantize raw decoder coordinates.
    ///
    /// Rounding is half-to-even so that identical inputs always land in the
    /// same bucket regardless of sign.
    pub fn from_raw(x0: f64, y1: f64, text: &str, bucket: f64) -> Self {
        Self {
            x: x0.round_ties_even() as i64,
            y: snap(y1, bucket),
            text: text.trim().to_string(),
        }
    }

    /// Re-apply quantization to an already quantized fragment.
    pub fn renormalized(&self, bucket: f64) -> Self {
        Self::from_raw(self.x as f64, self.y as f64, &self.text, bucket)
    }
}

fn snap(value: f64, bucket: f64) -> i64 {
    if bucket <= 0.0 {
        return value.round_ties_even() as i64;
    }
    ((value / bucket).round_ties_even() * bucket).round_ties_even() as i64
}

/// Convert every horizontal line of a page into a fragment.
pub fn normalize_page(page: &RawPage, bucket: f64) -> Vec<TextFragment> {
    let fragments: Vec<TextFragment> = page
        .lines()
        .filter(|line| line.is_horizontal())
        .map(|line| TextFragment::from_raw(line.x0, line.y1, &line.text, bucket))
        .collect();

    trace!("Normalized {} fragments (bucket {})", fragments.len(), bucket);
    fragments
}
