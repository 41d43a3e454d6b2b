use crate::error::ApiError;
use crate::models::{AppState, CodeState, OAuthToken};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::Json,
};
use tracing::{error, warn};

/// Exchanges the `state`/`code` pair from the SSO callback for a token.
///
/// The body is read and decoded by hand so any content type is accepted and
/// read or decode failures share the 500 mapping of the other errors.
pub async fn token_handler(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<OAuthToken>, ApiError> {
    let body = body.map_err(|e| {
        warn!(error = %e, "failed to read token request body");
        ApiError::Body(e)
    })?;

    let code_state: CodeState = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejecting undecodable token request");
        ApiError::Decode(e)
    })?;

    if !code_state.is_complete() {
        warn!("token request without state or code");
        return Err(ApiError::MissingCodeState);
    }

    let oauth_token = app_state
        .auth
        .exchange_token(&code_state.state, &code_state.code)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to exchange authorization code");
            e
        })?;

    Ok(Json(oauth_token))
}
