//! Core domain library for snipbin (config, storage, models, repository).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across snipbin crates.
pub mod constants;
/// Paste store contract and the redb-backed implementation.
pub mod db;
/// Process-global environment mutation helpers.
pub mod env;
/// Application error types (validation/storage/domain).
pub mod error;
/// Data models for API requests, persistence, and list browsing.
pub mod models;
/// Paste lifecycle operations layered over a [`db::PasteStore`].
pub mod repository;
/// Shared text helpers.
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{
    DEFAULT_CLI_SERVER_URL, DEFAULT_LANGUAGE, DEFAULT_PORT, DEFAULT_TITLE, PAGE_SIZE,
    RECENT_PASTES_LIMIT,
};
pub use db::{Database, PasteStore};
pub use error::AppError;
pub use repository::PasteRepository;
