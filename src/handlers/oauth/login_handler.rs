use crate::error::ApiError;
use crate::models::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use tracing::error;

/// Sends the browser to the identity provider's login page.
pub async fn login_handler(State(app_state): State<AppState>) -> Result<Response, ApiError> {
    let redirect_url = app_state.auth.login_redirect().await.map_err(|e| {
        error!(error = %e, "failed to build login redirect");
        e
    })?;

    Ok((StatusCode::FOUND, [(LOCATION, redirect_url)]).into_response())
}
