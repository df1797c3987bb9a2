//! Shared constants used across snipbin crates.

/// Default API port for snipbin.
pub const DEFAULT_PORT: u16 = 38412;

/// Default maximum paste size accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Number of pastes per list page.
pub const PAGE_SIZE: usize = 12;

/// Number of pastes shown in the recent-pastes strip.
pub const RECENT_PASTES_LIMIT: usize = 6;
/// Upper bound accepted for explicit recent-pastes limits.
pub const MAX_RECENT_PASTES_LIMIT: usize = 50;

/// Title stored when the submitted title is blank.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Language stored when none is submitted.
pub const DEFAULT_LANGUAGE: &str = "text";

/// Filter value meaning "every language".
pub const ALL_LANGUAGES_FILTER: &str = "all";

/// Characters kept by list previews before truncation.
pub const PREVIEW_MAX_CHARS: usize = 150;

/// Maximum number of page buttons in the pagination window.
pub const PAGE_WINDOW_SIZE: usize = 5;

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://localhost:38412";
