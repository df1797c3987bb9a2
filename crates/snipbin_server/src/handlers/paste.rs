//! Paste HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use snipbin_core::{
    models::paste::{ListQuery, Paste, PastePage, PasteRequest, RecentQuery},
    text::download_file_name,
    AppError, Config, RECENT_PASTES_LIMIT,
};

fn ensure_within_size_limit(config: &Config, req: &PasteRequest) -> Result<(), AppError> {
    if req.content.len() > config.max_paste_size {
        return Err(AppError::Validation(format!(
            "Paste size exceeds maximum of {} bytes",
            config.max_paste_size
        )));
    }
    Ok(())
}

/// Create a new paste.
///
/// # Returns
/// `201 Created` with the stored paste.
///
/// # Errors
/// Returns 400 for blank or oversized content and 500 when the store fails.
pub async fn create_paste(
    State(state): State<AppState>,
    payload: Result<Json<PasteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Paste>), HttpError> {
    let Json(req) = payload?;
    ensure_within_size_limit(&state.config, &req)?;
    let paste = state.repo.create(req)?;
    Ok((StatusCode::CREATED, Json(paste)))
}

/// Fetch a paste by id, public or private.
///
/// # Errors
/// Returns 404 when no paste has this id.
pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Paste>, HttpError> {
    Ok(Json(state.repo.get(&id)?))
}

/// Serve paste content as a plain-text attachment.
pub async fn download_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let paste = state.repo.get(&id)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        download_file_name(&paste.title, &paste.language)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        paste.content,
    )
        .into_response())
}

/// Replace the editable fields of a paste.
///
/// The body is a full replacement: omitted `title`, `language` and
/// `is_public` fall back to the create defaults, so a `PUT` without
/// `is_public` makes a private paste public. Send the current values to keep
/// them (`snip edit` does this by fetching the paste first).
///
/// # Errors
/// Returns 400 for blank or oversized content, 404 for an unknown id.
pub async fn update_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PasteRequest>, JsonRejection>,
) -> Result<Json<Paste>, HttpError> {
    let Json(req) = payload?;
    ensure_within_size_limit(&state.config, &req)?;
    Ok(Json(state.repo.update(&id, req)?))
}

/// Delete a paste. Unknown ids still succeed with `deleted: false`.
pub async fn delete_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, HttpError> {
    let deleted = state.repo.delete(&id)?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

/// One page of public pastes filtered by `q` and `language`.
pub async fn list_pastes(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PastePage>, HttpError> {
    let Query(query) = query?;
    let page = query.page.unwrap_or(1);
    Ok(Json(state.repo.list(query.filter(), page)?))
}

/// Newest public pastes.
pub async fn recent_pastes(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<Vec<Paste>>, HttpError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(RECENT_PASTES_LIMIT);
    Ok(Json(state.repo.recent(limit)?))
}
