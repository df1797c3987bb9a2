//! HTTP error mapping for API handlers.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use snipbin_core::AppError;

/// Error returned by handlers, rendered as `{"error": message}`.
#[derive(Debug)]
pub enum HttpError {
    /// Domain or store failure from the repository.
    App(AppError),
    /// Request that axum could not extract (malformed JSON, bad query string).
    Rejected { status: StatusCode, message: String },
}

impl HttpError {
    /// Status code this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::App(AppError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::App(AppError::NotFound) => StatusCode::NOT_FOUND,
            Self::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

fn rejection_status(status: StatusCode) -> StatusCode {
    // Oversized bodies keep 413; everything else is a client input error.
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        status
    } else {
        StatusCode::BAD_REQUEST
    }
}

impl From<JsonRejection> for HttpError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection_status(value.status()),
            message: value.body_text(),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(value: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection_status(value.status()),
            message: value.body_text(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            HttpError::App(AppError::Validation(msg)) => msg,
            HttpError::App(AppError::NotFound) => "Not found".to_string(),
            HttpError::App(err) => {
                tracing::error!("Store failure: {}", err);
                "Store error".to_string()
            }
            HttpError::Rejected { message, .. } => message,
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
