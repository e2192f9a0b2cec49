//! Transcript types.

use serde::{Deserialize, Serialize};

/// One page's contribution to a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    /// Page number (1-indexed)
    pub number: u32,

    /// Space-joined token text of the page
    pub text: String,
}

impl PageSection {
    /// Create a new page section.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Check if the page produced no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The ordered, page-delimited output of one extraction run.
///
/// Section numbers are always `1..=page_count()` in ascending order. Only the
/// extraction pipeline appends to a transcript; callers get it read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pages: Vec<PageSection>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(pages: u32) -> Self {
        Self {
            pages: Vec::with_capacity(pages as usize),
        }
    }

    /// Append the next page. Returns the appended section.
    pub(crate) fn push(&mut self, text: String) -> &PageSection {
        let number = self.pages.len() as u32 + 1;
        self.pages.push(PageSection { number, text });
        &self.pages[self.pages.len() - 1]
    }

    /// Number of pages in the transcript.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the transcript has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page section by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&PageSection> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }

    /// All page sections in ascending order.
    pub fn pages(&self) -> &[PageSection] {
        &self.pages
    }

    /// Iterate over page sections in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageSection> {
        self.pages.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a PageSection;
    type IntoIter = std::slice::Iter<'a, PageSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
