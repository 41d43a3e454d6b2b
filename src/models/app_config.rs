use std::sync::Arc;

use thiserror::Error;

use crate::auth::AuthService;

const DEFAULT_SCOPES: &str = "openid profile email";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:10000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: oauth2::url::ParseError,
    },
}

#[derive(Clone)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_url: String,
    pub userinfo_url: String,
    pub kubeconfig_issuer_url: Option<String>,
    pub scopes: Vec<String>,
    pub listen_addr: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("redirect_url", &self.redirect_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("kubeconfig_issuer_url", &self.kubeconfig_issuer_url)
            .field("scopes", &self.scopes)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));
        let url = |name: &'static str, value: String| {
            oauth2::url::Url::parse(&value)
                .map(|_| value)
                .map_err(|source| ConfigError::InvalidUrl { name, source })
        };

        let client_id = required("OAUTH_CLIENT_ID")?;
        let client_secret = required("OAUTH_CLIENT_SECRET")?;
        let auth_url = url("OAUTH_AUTH_URL", required("OAUTH_AUTH_URL")?)?;
        let token_url = url("OAUTH_TOKEN_URL", required("OAUTH_TOKEN_URL")?)?;
        let redirect_url = url("OAUTH_REDIRECT_URL", required("OAUTH_REDIRECT_URL")?)?;
        let userinfo_url = url("OAUTH_USERINFO_URL", required("OAUTH_USERINFO_URL")?)?;
        let kubeconfig_issuer_url = optional("KUBECONFIG_ISSUER_URL")
            .map(|value| url("KUBECONFIG_ISSUER_URL", value))
            .transpose()?;

        let scopes = optional("OAUTH_SCOPES")
            .unwrap_or_else(|| DEFAULT_SCOPES.to_string())
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let listen_addr =
            optional("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        Ok(Self {
            client_id,
            client_secret,
            auth_url,
            token_url,
            redirect_url,
            userinfo_url,
            kubeconfig_issuer_url,
            scopes,
            listen_addr,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("OAUTH_CLIENT_ID", "kube-login"),
            ("OAUTH_CLIENT_SECRET", "s3cret"),
            ("OAUTH_AUTH_URL", "https://idp.example.com/authorize"),
            ("OAUTH_TOKEN_URL", "https://idp.example.com/token"),
            ("OAUTH_REDIRECT_URL", "https://console.example.com/callback"),
            ("OAUTH_USERINFO_URL", "https://idp.example.com/userinfo"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_env()).unwrap();

        assert_eq!(config.client_id, "kube-login");
        assert_eq!(config.scopes, vec!["openid", "profile", "email"]);
        assert_eq!(config.listen_addr, "0.0.0.0:10000");
        assert!(config.kubeconfig_issuer_url.is_none());
    }

    #[test]
    fn test_missing_required_variable() {
        let mut env = base_env();
        env.remove("OAUTH_TOKEN_URL");

        let err = load(&env).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OAUTH_TOKEN_URL")));
    }

    #[test]
    fn test_empty_value_is_missing() {
        let mut env = base_env();
        env.insert("OAUTH_CLIENT_ID", "  ");

        let err = load(&env).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OAUTH_CLIENT_ID")));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut env = base_env();
        env.insert("KUBECONFIG_ISSUER_URL", "not a url");

        let err = load(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl { name: "KUBECONFIG_ISSUER_URL", .. }
        ));
    }

    #[test]
    fn test_scopes_accept_commas_and_spaces() {
        let mut env = base_env();
        env.insert("OAUTH_SCOPES", "openid, groups  offline_access");
        env.insert("LISTEN_ADDR", "127.0.0.1:8080");

        let config = load(&env).unwrap();
        assert_eq!(config.scopes, vec!["openid", "groups", "offline_access"]);
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = load(&base_env()).unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
