//! Location of the document-type marker.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::OrderedFragments;

/// Position of the marker fragment in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorIndex(usize);

impl AnchorIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Position `offset` fragments after the anchor.
    pub fn offset(self, offset: usize) -> usize {
        self.0.saturating_add(offset)
    }
}

/// Find the first fragment whose text equals `marker` exactly.
pub fn locate_anchor(fragments: &OrderedFragments, marker: &str) -> Option<AnchorIndex> {
    let found = fragments.iter().position(|f| f.text == marker).map(AnchorIndex);
    debug!("Anchor {:?}: {:?}", marker, found);
    found
}
