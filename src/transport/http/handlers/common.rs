use crate::domain::error::SongError;
use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

pub const INVALID_REQUEST: &str = "invalid request";
pub const INTERNAL_ERROR: &str = "internal server error";

/// Error returned by song handlers. This is the only place that turns a `SongError`
/// into a status code and a caller-visible message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_REQUEST)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SongError> for ApiError {
    fn from(err: SongError) -> Self {
        if !err.is_client_error() {
            error!(error = %err, "request failed");
            return Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
        }
        debug!(error = %err, "rejected request");
        match err {
            SongError::NotFound => Self::new(StatusCode::BAD_REQUEST, "song not found"),
            SongError::NoMoreVerses => {
                Self::new(StatusCode::BAD_REQUEST, "no more verses available")
            }
            SongError::InvalidDate(_) => Self::new(StatusCode::BAD_REQUEST, "invalid release date"),
            _ => Self::invalid_request(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Parses the `{id}` path segment.
pub fn parse_song_id(raw: &str) -> Result<i64, SongError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| SongError::validation(format!("bad id '{}': {}", raw, e)))
}

/// Parses the optional `id` filter; anything but an integer means "no filter".
pub fn parse_id_filter(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0)
}
