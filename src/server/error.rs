//! HTTP error mapping
//!
//! Carries the library error taxonomy into distinct status codes so
//! callers can tell "no data" from "bad request" from provider or
//! computation failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::core::VolGridError;

/// Error returned by HTTP handlers
#[derive(Debug)]
pub struct ServerError(pub VolGridError);

impl From<VolGridError> for ServerError {
    fn from(err: VolGridError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            VolGridError::NoData(_) => StatusCode::NOT_FOUND,
            VolGridError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            VolGridError::Network(_) => StatusCode::BAD_GATEWAY,
            VolGridError::Computation(_) | VolGridError::Data(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
