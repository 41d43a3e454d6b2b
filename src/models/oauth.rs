use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `state`/`code` pair posted back after the identity provider callback.
/// Missing fields decode as empty strings and are rejected by the handler.
#[derive(Debug, Deserialize, Default)]
pub struct CodeState {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub code: String,
}

impl CodeState {
    pub fn is_complete(&self) -> bool {
        !self.state.is_empty() && !self.code.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Claims document from the userinfo endpoint, kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfo(pub Map<String, Value>);

impl UserInfo {
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn sub(&self) -> Option<&str> {
        self.claim("sub").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.claim("email").and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for UserInfo {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubeConfigResult {
    pub config: String,
}
