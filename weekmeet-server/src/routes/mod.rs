pub mod calendar;
pub mod roster;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use weekmeet_core::WeekmeetError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Standard API acknowledgement
#[derive(Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Ack { success: true }
    }
}

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<WeekmeetError>() {
            Some(WeekmeetError::Validation(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Pull a required string field out of a lenient request body, rejecting
/// absent and blank values the same way.
pub fn required(field: Option<String>, name: &str) -> Result<String, WeekmeetError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(WeekmeetError::Validation(format!(
            "Missing required field: {name}"
        ))),
    }
}
