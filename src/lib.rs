pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod telemetry;

use axum::{
    Router,
    routing::{get, post},
};

use handlers::{kubeconfig_handler, login_handler, token_handler, userinfo_handler};
use models::AppState;

/// SSO routes: login redirect, code exchange, user info and kubeconfig.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", get(login_handler))
        .route("/token", post(token_handler))
        .route("/userinfo", post(userinfo_handler))
        .route("/kubeconfig", post(kubeconfig_handler))
        .with_state(app_state)
}
