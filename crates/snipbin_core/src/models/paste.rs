//! Paste rows, request payloads and list filters.

use crate::constants::{ALL_LANGUAGES_FILTER, DEFAULT_LANGUAGE, DEFAULT_TITLE, PAGE_SIZE};
use crate::error::AppError;
use crate::text::normalize_optional_nonempty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Paste row stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub title: String,
    pub content: String,
    pub language: String,
    pub is_public: bool,
    /// Always `None`; there is no account system.
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Paste {
    /// Build a fresh row from validated fields with both timestamps set to `now`.
    pub fn from_fields(id: String, fields: PasteFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            language: fields.language,
            is_public: fields.is_public,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the user-editable fields and bump `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn apply_fields(&mut self, fields: PasteFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.content = fields.content;
        self.language = fields.language;
        self.is_public = fields.is_public;
        self.updated_at = now.max(self.updated_at);
    }

    /// Whether the paste has been edited since creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Request payload for creating or replacing a paste.
///
/// Updates are full replacements: omitted optional fields fall back to the
/// same defaults used on create.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// Validated, normalized user-editable fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteFields {
    pub title: String,
    pub content: String,
    pub language: String,
    pub is_public: bool,
}

impl PasteFields {
    /// Normalize a request payload.
    ///
    /// Content is trimmed and must be non-empty. A blank title becomes
    /// `"Untitled"`, a blank language becomes `"text"`, and visibility
    /// defaults to public.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] when the trimmed content is empty.
    pub fn from_request(req: PasteRequest) -> Result<Self, AppError> {
        let content = req.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Content is required".to_string()));
        }
        Ok(Self {
            title: normalize_optional_nonempty(req.title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content: content.to_string(),
            language: normalize_optional_nonempty(req.language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            is_public: req.is_public.unwrap_or(true),
        })
    }
}

/// Search and language filter applied to public listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteFilter {
    /// Case-insensitive substring matched against title or content.
    pub text_query: Option<String>,
    /// Exact language value.
    pub language: Option<String>,
}

impl PasteFilter {
    /// Build a filter from raw user input.
    ///
    /// A whitespace-only query is ignored; a non-blank query is kept as typed.
    /// A blank language or exactly `"all"` disables the language filter; any
    /// other value, including `"ALL"`, is an exact match.
    pub fn new(text_query: Option<String>, language: Option<String>) -> Self {
        let text_query = text_query.filter(|query| !query.trim().is_empty());
        let language = normalize_optional_nonempty(language)
            .filter(|value| value != ALL_LANGUAGES_FILTER);
        Self {
            text_query,
            language,
        }
    }

    /// Whether `paste` belongs in a filtered public listing.
    ///
    /// Private pastes never match, whatever the filter.
    pub fn matches(&self, paste: &Paste) -> bool {
        if !paste.is_public {
            return false;
        }
        if let Some(language) = self.language.as_deref() {
            if paste.language != language {
                return false;
            }
        }
        match self.text_query.as_deref() {
            Some(query) => {
                let needle = query.to_lowercase();
                contains_case_insensitive(&paste.title, &needle)
                    || contains_case_insensitive(&paste.content, &needle)
            }
            None => true,
        }
    }
}

fn contains_case_insensitive(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Store-level listing request: a filter plus an offset/limit window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteQuery {
    pub filter: PasteFilter,
    pub offset: usize,
    pub limit: usize,
}

impl PasteQuery {
    /// Window for 1-indexed `page` of [`PAGE_SIZE`] rows. Page 0 is treated as 1.
    ///
    /// The offset saturates, so absurdly large pages yield an empty window.
    pub fn for_page(filter: PasteFilter, page: usize) -> Self {
        Self {
            filter,
            offset: page.saturating_sub(1).saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        }
    }
}

/// Rows in one query window plus the count of all matching rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryWindow {
    pub rows: Vec<Paste>,
    pub total_count: usize,
}

/// One page of a public listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PastePage {
    pub items: Vec<Paste>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl PastePage {
    pub fn new(window: QueryWindow, page: usize) -> Self {
        Self {
            total_pages: total_pages(window.total_count),
            items: window.rows,
            total_count: window.total_count,
            page: page.max(1),
            page_size: PAGE_SIZE,
        }
    }
}

/// Number of pages needed for `total_count` rows.
pub fn total_pages(total_count: usize) -> usize {
    total_count.div_ceil(PAGE_SIZE)
}

/// Query parameters for listing pastes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl ListQuery {
    pub fn filter(&self) -> PasteFilter {
        PasteFilter::new(self.q.clone(), self.language.clone())
    }
}

/// Query parameters for the recent-pastes strip.
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}
