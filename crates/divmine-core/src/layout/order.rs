//! Reading order: top to bottom, then left to right.

use std::cmp::Reverse;
use std::ops::Index;

use super::TextFragment;

/// Fragments sorted by `(-y, x)`.
///
/// Fragments sharing a `y` bucket are contiguous and left-to-right, so a
/// visual line is a run of equal `y`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedFragments {
    items: Vec<TextFragment>,
}

/// One visual line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub y: i64,
    pub fragments: &'a [TextFragment],
}

impl<'a> Line<'a> {
    /// The rightmost fragment.
    pub fn last(&self) -> Option<&'a TextFragment> {
        self.fragments.last()
    }

    /// Fragment texts joined with a single space.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl OrderedFragments {
    /// Sort fragments into reading order. Ties keep their input order.
    pub fn new(mut items: Vec<TextFragment>) -> Self {
        items.sort_by_key(|f| (Reverse(f.y), f.x));
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TextFragment> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextFragment> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[TextFragment] {
        &self.items
    }

    /// Group consecutive fragments with equal `y`.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        self.items.chunk_by(|a, b| a.y == b.y).map(|chunk| Line {
            y: chunk[0].y,
            fragments: chunk,
        })
    }
}

impl Index<usize> for OrderedFragments {
    type Output = TextFragment;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a OrderedFragments {
    type Item = &'a TextFragment;
    type IntoIter = std::slice::Iter<'a, TextFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
