pub mod app_config;
pub mod oauth;

pub use app_config::{AppConfig, AppState, ConfigError};
pub use oauth::{CodeState, KubeConfigResult, OAuthToken, UserInfo};
