use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use cineshelf_core::{Error, services::home::HOME_ERROR_MESSAGE};

const INTERNAL_MESSAGE: &str = "Something went wrong. Please try again.";

/// Error body returned to the front end as `{"error": message}`.
///
/// The message is always fit for display: upstream and internal failures are
/// replaced by fixed text and only logged in full.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &err {
            // Built from the API's own status_message or status line.
            Error::ExternalApi(_) | Error::NotFound | Error::Validation(_) => err.to_string(),
            Error::Unavailable(_) => HOME_ERROR_MESSAGE.to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        };

        if status.is_server_error() {
            tracing::warn!(error = %err, status = status.as_u16(), "Request failed");
        }
        Self::new(status, message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
