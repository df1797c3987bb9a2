//! HTTP request handlers.

/// Language catalog endpoint.
pub mod language;
/// Paste-related endpoints.
pub mod paste;
