use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure of a route handler.
///
/// Every variant answers 500; callers tell causes apart by the message only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("invalid request body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("state and code are required")]
    MissingCodeState,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // No detail for an incomplete state/code pair.
            ApiError::MissingCodeState => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            other => {
                let body = Json(ErrorResponse {
                    error: other.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
