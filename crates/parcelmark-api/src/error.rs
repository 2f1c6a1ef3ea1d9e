use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parcelmark_core::error::ParcelError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into(), details: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into(), details: None }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, details: self.details };
        (self.status, Json(body)).into_response()
    }
}

impl From<ParcelError> for ApiError {
    fn from(err: ParcelError) -> Self {
        match &err {
            ParcelError::InvalidGeometry { .. } => {
                Self::bad_request("Invalid polygon").with_details(err.to_string())
            }
            ParcelError::InvalidArgument { .. } => {
                Self::bad_request("Invalid argument").with_details(err.to_string())
            }
            ParcelError::DraftNotFound { .. } => {
                Self::not_found("Draft not found").with_details(err.to_string())
            }
            ParcelError::DuplicateId { .. } => {
                // Ids are generated server-side; a collision is a bug, not user error
                tracing::error!(error = %err, "Record id collision");
                Self::conflict("Polygon already stored").with_details(err.to_string())
            }
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}
