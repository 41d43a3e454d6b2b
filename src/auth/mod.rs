//! Identity provider collaborator.
//!
//! Handlers only see [`AuthService`]; the OAuth protocol, user lookup and
//! kubeconfig issuance all live behind it.

mod provider;

pub use provider::OAuthProvider;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{OAuthToken, UserInfo};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid {name} URL: {message}")]
    InvalidUrl { name: &'static str, message: String },

    #[error("failed to exchange token: {0}")]
    TokenExchange(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP request failed with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("access token is missing")]
    MissingAccessToken,

    #[error("kubeconfig issuer is not configured")]
    KubeConfigUnavailable,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// URL of the identity provider's login page.
    async fn login_redirect(&self) -> Result<String, AuthError>;

    async fn exchange_token(&self, state: &str, code: &str) -> Result<OAuthToken, AuthError>;

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, AuthError>;

    /// Raw kubeconfig document for the user owning `access_token`.
    async fn fetch_kube_config(&self, access_token: &str) -> Result<String, AuthError>;
}
