//! Language catalog handler.

use axum::Json;
use snipbin_core::models::language::{LanguageOption, LANGUAGE_OPTIONS};

/// List the known languages in selector order.
pub async fn list_languages() -> Json<&'static [LanguageOption]> {
    Json(LANGUAGE_OPTIONS)
}
