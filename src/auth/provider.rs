use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenUrl,
};
use reqwest::header::ACCEPT;
use tracing::debug;

use super::{AuthError, AuthService};
use crate::models::{AppConfig, OAuthToken, UserInfo};

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// [`AuthService`] backed by an OAuth 2.0 identity provider.
///
/// Holds no per-user state: the CSRF `state` handed out by
/// [`login_redirect`](AuthService::login_redirect) is correlated by the
/// caller, not here.
pub struct OAuthProvider {
    client: ConfiguredClient,
    http: reqwest::Client,
    scopes: Vec<String>,
    userinfo_url: String,
    kubeconfig_issuer_url: Option<String>,
}

impl OAuthProvider {
    pub fn new(config: &AppConfig) -> Result<Self, AuthError> {
        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(config.auth_url.clone()).map_err(invalid_url("auth"))?)
            .set_token_uri(TokenUrl::new(config.token_url.clone()).map_err(invalid_url("token"))?)
            .set_redirect_uri(
                RedirectUrl::new(config.redirect_url.clone()).map_err(invalid_url("redirect"))?,
            );

        // Token and userinfo endpoints are never followed through redirects.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            http,
            scopes: config.scopes.clone(),
            userinfo_url: config.userinfo_url.clone(),
            kubeconfig_issuer_url: config.kubeconfig_issuer_url.clone(),
        })
    }

    async fn get_with_bearer(
        &self,
        url: &str,
        access_token: &str,
        accept: Option<&str>,
    ) -> Result<reqwest::Response, AuthError> {
        if access_token.is_empty() {
            return Err(AuthError::MissingAccessToken);
        }

        let mut request = self.http.get(url).bearer_auth(access_token);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        let response = request.send().await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Error reading response body: {}", e));
            Err(AuthError::UpstreamStatus { status, body })
        }
    }
}

fn invalid_url(name: &'static str) -> impl Fn(oauth2::url::ParseError) -> AuthError {
    move |e| AuthError::InvalidUrl {
        name,
        message: e.to_string(),
    }
}

#[async_trait]
impl AuthService for OAuthProvider {
    async fn login_redirect(&self) -> Result<String, AuthError> {
        let (url, _csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .url();

        debug!("built login redirect");
        Ok(url.to_string())
    }

    async fn exchange_token(&self, state: &str, code: &str) -> Result<OAuthToken, AuthError> {
        debug!(state, "exchanging authorization code");

        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        serde_json::to_value(&response)
            .and_then(serde_json::from_value)
            .map_err(|e| AuthError::TokenExchange(format!("unexpected token response: {}", e)))
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, AuthError> {
        let response = self
            .get_with_bearer(&self.userinfo_url, access_token, Some("application/json"))
            .await?;
        Ok(response.json::<UserInfo>().await?)
    }

    async fn fetch_kube_config(&self, access_token: &str) -> Result<String, AuthError> {
        let issuer = self
            .kubeconfig_issuer_url
            .as_deref()
            .ok_or(AuthError::KubeConfigUnavailable)?;

        // Issuer responds with a YAML document.
        let response = self.get_with_bearer(issuer, access_token, None).await?;
        Ok(response.text().await?)
    }
}
