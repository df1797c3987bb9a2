//! Shared text helpers for request normalization and paste presentation.

use crate::constants::PREVIEW_MAX_CHARS;
use crate::models::language::language_extension;
use serde::Serialize;

/// Trim an optional string and drop empty values.
///
/// # Returns
/// `None` when the input is missing or whitespace-only; otherwise the trimmed
/// string.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Shorten `content` to [`PREVIEW_MAX_CHARS`] characters, appending `...` when cut.
pub fn preview(content: &str) -> String {
    preview_with_limit(content, PREVIEW_MAX_CHARS)
}

/// Shorten `content` to `max_chars` characters, appending `...` when cut.
pub fn preview_with_limit(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &content[..byte_idx]),
        None => content.to_string(),
    }
}

/// Line and character counts shown next to paste content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub lines: usize,
    pub characters: usize,
}

impl ContentStats {
    /// Lines are `\n`-separated segments, so empty content still has one line.
    pub fn of(content: &str) -> Self {
        Self {
            lines: content.split('\n').count(),
            characters: content.chars().count(),
        }
    }
}

/// File name offered when downloading a paste.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, the result is
/// lowercased, and the language extension is appended.
pub fn download_file_name(title: &str, language: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.{}", stem, language_extension(language))
}
