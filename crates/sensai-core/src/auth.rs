//! Auth bridge: registers a signed-in user with the SensAI backend.
//!
//! Called after a successful social login. The bridge forwards the user's
//! profile and the provider ID token to `POST {backend_url}/auth/login` and
//! returns the backend's user record.
//!
//! The bridge never fails. Transport errors, non-2xx statuses, malformed
//! bodies and responses without an `id` all collapse to the `{id: null}`
//! sentinel so the surrounding login flow can always proceed.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Number of leading ID-token characters included in diagnostics.
const TOKEN_PREFIX_CHARS: usize = 20;

/// Profile of the signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Resolves (given, family) names.
    ///
    /// Explicit names win when non-empty. Otherwise `name` is split on
    /// whitespace: the first token is the given name and the remaining tokens,
    /// joined by a single space, are the family name.
    pub fn split_names(&self) -> (String, String) {
        let mut tokens = self.name.as_deref().unwrap_or("").split_whitespace();
        let derived_given = tokens.next().unwrap_or("").to_string();
        let derived_family = tokens.collect::<Vec<_>>().join(" ");

        let given = non_empty(self.given_name.as_deref()).map_or(derived_given, str::to_string);
        let family = non_empty(self.family_name.as_deref()).map_or(derived_family, str::to_string);
        (given, family)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Credentials issued by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub id_token: Option<String>,
}

impl LoginRequest {
    pub fn new(user: &UserProfile, account: &ProviderCredentials) -> Self {
        let (given_name, family_name) = user.split_names();
        Self {
            email: user.email.clone(),
            given_name,
            family_name,
            id_token: account.id_token.clone(),
        }
    }
}

/// User record returned by the backend.
///
/// `id` is `None` only for the failure sentinel. Any other fields the backend
/// returns are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendAuthResult {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackendAuthResult {
    /// The `{id: null}` sentinel.
    pub fn sentinel() -> Self {
        Self {
            id: None,
            extra: Map::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_none()
    }
}

/// Accepts string ids and numeric ids (carried as their decimal string).
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Client for the backend login endpoint.
#[derive(Debug, Clone)]
pub struct AuthBridge {
    base_url: String,
    http: reqwest::Client,
}

impl AuthBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn login_url(&self) -> String {
        format!("{}/auth/login", self.base_url.trim_end_matches('/'))
    }

    /// Registers (or logs in) the user with the backend.
    ///
    /// Returns the backend record on success and the sentinel otherwise.
    pub async fn register_user(
        &self,
        user: &UserProfile,
        account: &ProviderCredentials,
    ) -> BackendAuthResult {
        let token = account.id_token.as_deref();
        let token_prefix: String = token
            .map(|t| t.chars().take(TOKEN_PREFIX_CHARS).collect())
            .unwrap_or_else(|| "NONE".to_string());
        info!(
            backend_url = %self.base_url,
            email = %user.email,
            provider = account.provider.as_deref().unwrap_or("unknown"),
            has_id_token = token.is_some(),
            id_token_len = token.map_or(0, str::len),
            id_token_prefix = %token_prefix,
            "registering user with backend"
        );

        let request = LoginRequest::new(user, account);
        match self.try_register(&request).await {
            Ok(result) => {
                info!(id = result.id.as_deref().unwrap_or(""), "backend login succeeded");
                result
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "backend authentication failed");
                BackendAuthResult::sentinel()
            }
        }
    }

    async fn try_register(&self, request: &LoginRequest) -> Result<BackendAuthResult> {
        let response = self
            .http
            .post(self.login_url())
            .json(request)
            .send()
            .await
            .context("Failed to send login request")?;

        let status = response.status();
        debug!(%status, "login response status");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend auth failed: {status} - {body}");
        }

        let result: BackendAuthResult = response
            .json()
            .await
            .context("Failed to parse login response")?;

        if result.id.is_none() {
            anyhow::bail!("Backend response missing id field");
        }
        Ok(result)
    }
}
