use std::sync::Arc;

use kubeauth_server::auth::OAuthProvider;
use kubeauth_server::models::{AppConfig, AppState};
use kubeauth_server::{router, telemetry};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app_config = AppConfig::from_env()?;
    telemetry::init();
    info!(config = ?app_config, "loaded configuration");

    let provider = OAuthProvider::new(&app_config)?;
    let app_state = AppState::new(Arc::new(provider));

    let app = router(app_state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&app_config.listen_addr).await?;
    info!(addr = %app_config.listen_addr, "listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
