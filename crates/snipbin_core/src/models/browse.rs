//! Session state behind the paginated, filterable paste list.
//!
//! Any change to the search text or language filter sends the view back to
//! page 1 before the next fetch.

use super::paste::{total_pages, ListQuery, PasteFilter};
use crate::constants::{ALL_LANGUAGES_FILTER, PAGE_WINDOW_SIZE};

/// Current search text, language selection and page of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    query: String,
    language: String,
    page: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            query: String::new(),
            language: ALL_LANGUAGES_FILTER.to_string(),
            page: 1,
        }
    }
}

impl BrowseState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the search text and reset to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Replace the language selection (`"all"` for none) and reset to page 1.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        self.page = 1;
    }

    /// Jump to `page`, clamped to `1..=total_pages` (page 1 when there are no pages).
    pub fn set_page(&mut self, page: usize, total_count: usize) {
        let last = total_pages(total_count).max(1);
        self.page = page.clamp(1, last);
    }

    pub fn next_page(&mut self, total_count: usize) {
        self.set_page(self.page.saturating_add(1), total_count);
    }

    pub fn previous_page(&mut self, total_count: usize) {
        self.set_page(self.page.saturating_sub(1), total_count);
    }

    /// Filter for the next fetch.
    pub fn filter(&self) -> PasteFilter {
        PasteFilter::new(Some(self.query.clone()), Some(self.language.clone()))
    }

    /// Query parameters for the next fetch.
    pub fn list_query(&self) -> ListQuery {
        let filter = self.filter();
        ListQuery {
            q: filter.text_query,
            language: filter.language,
            page: Some(self.page),
        }
    }

    /// Page numbers to offer as direct links.
    ///
    /// At most five pages: the first five near the start, the last five near
    /// the end, otherwise the current page with two neighbours on each side.
    pub fn page_window(&self, total_pages: usize) -> Vec<usize> {
        let count = total_pages.min(PAGE_WINDOW_SIZE);
        if count == 0 {
            return Vec::new();
        }
        let half = PAGE_WINDOW_SIZE / 2;
        let first = if total_pages <= PAGE_WINDOW_SIZE || self.page <= half + 1 {
            1
        } else if self.page + half >= total_pages {
            total_pages + 1 - PAGE_WINDOW_SIZE
        } else {
            self.page - half
        };
        (first..first + count).collect()
    }
}
