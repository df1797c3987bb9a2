//! Shared test-only helpers for snipbin_core.

use crate::models::paste::{Paste, PasteFields, PasteRequest};
use crate::Database;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

pub(crate) fn request(title: &str, content: &str, language: &str, is_public: bool) -> PasteRequest {
    PasteRequest {
        title: Some(title.to_string()),
        content: content.to_string(),
        language: Some(language.to_string()),
        is_public: Some(is_public),
    }
}

/// Fixed base instant so ordering tests do not depend on the clock.
pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Row created `minutes` after [`base_time`].
pub(crate) fn row_at(id: &str, title: &str, minutes: i64) -> Paste {
    let fields = PasteFields {
        title: title.to_string(),
        content: format!("content of {}", title),
        language: "text".to_string(),
        is_public: true,
    };
    Paste::from_fields(
        id.to_string(),
        fields,
        base_time() + Duration::minutes(minutes),
    )
}
