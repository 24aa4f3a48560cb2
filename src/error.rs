use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::presenter::{Presentation, Severity};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("{}", .0.message)]
    EmptyInput(Presentation),

    #[error("{}", .0.message)]
    TooLong(Presentation),

    #[error("{}", .0.message)]
    SynthesisFailed(Presentation),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure: message + status code, plus the presenter's
/// view of the rejection when there is one
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::EmptyInput(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::TooLong(_) | Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::SynthesisFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn presentation(&self) -> Option<&Presentation> {
        match self {
            Self::EmptyInput(p) | Self::TooLong(p) | Self::SynthesisFailed(p) => Some(p),
            _ => None,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let presentation = self.presentation();
        ErrorResponse {
            message: self.to_string(),
            state: presentation.map(|p| p.state.clone()),
            severity: Some(presentation.map_or(Severity::Error, |p| p.severity)),
            hint: presentation.and_then(|p| p.hint.clone()),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = %status.as_u16(), "Request rejected");
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
