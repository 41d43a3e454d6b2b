use crate::error::ApiError;
use crate::extract::AccessToken;
use crate::models::{AppState, UserInfo};
use axum::{extract::State, response::Json};
use tracing::error;

pub async fn userinfo_handler(
    State(app_state): State<AppState>,
    access_token: AccessToken,
) -> Result<Json<UserInfo>, ApiError> {
    let user_info = app_state
        .auth
        .fetch_user_info(access_token.as_str())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to fetch user info");
            e
        })?;

    Ok(Json(user_info))
}
