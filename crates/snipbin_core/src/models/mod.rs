//! Data models used by storage, the repository and the HTTP API.

/// List-view session state (filters and pagination).
pub mod browse;
/// Known language values, labels and file extensions.
pub mod language;
/// Paste rows, request payloads, filters and pages.
pub mod paste;
