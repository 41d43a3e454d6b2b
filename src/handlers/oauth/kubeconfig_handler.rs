use crate::error::ApiError;
use crate::extract::AccessToken;
use crate::models::{AppState, KubeConfigResult};
use axum::{extract::State, response::Json};
use tracing::error;

/// Returns the caller's kubeconfig wrapped as `{"config": ...}`.
pub async fn kubeconfig_handler(
    State(app_state): State<AppState>,
    access_token: AccessToken,
) -> Result<Json<KubeConfigResult>, ApiError> {
    let config = app_state
        .auth
        .fetch_kube_config(access_token.as_str())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to generate kubeconfig");
            e
        })?;

    Ok(Json(KubeConfigResult { config }))
}
