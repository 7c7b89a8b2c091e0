//! Google SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{
    DiscoveryDocument, OpenID, SsoError, SsoProviderAdapter, SsoResult, UserInfoSession,
};
use serde_json::Value;

/// Login via Google OAuth.
///
/// Google publishes its endpoints through a remote discovery document, so
/// this adapter fetches it per call instead of embedding URLs.
#[derive(Debug, Clone)]
pub struct GoogleSso {
    pub discovery_url: String,
    http: reqwest::Client,
}

impl GoogleSso {
    pub const DISCOVERY_URL: &'static str =
        "https://accounts.google.com/.well-known/openid-configuration";

    pub fn new() -> Self {
        Self::with_discovery_url(Self::DISCOVERY_URL)
    }

    pub fn with_discovery_url(discovery_url: impl Into<String>) -> Self {
        Self {
            discovery_url: discovery_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

impl Default for GoogleSso {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SsoProviderAdapter for GoogleSso {
    fn provider(&self) -> &str {
        "google"
    }

    fn default_scope(&self) -> Vec<String> {
        vec![
            "openid".to_string(),
            "email".to_string(),
            "profile".to_string(),
        ]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        let document = self
            .http
            .get(&self.discovery_url)
            .send()
            .await?
            .json()
            .await?;
        Ok(document)
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        if !response
            .get("email_verified")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Err(SsoError::login(
                401,
                format!(
                    "User {} is not verified with Google",
                    string_field(response, "email").unwrap_or_default()
                ),
            ));
        }

        Ok(OpenID {
            id: string_field(response, "sub"),
            email: string_field(response, "email"),
            first_name: string_field(response, "given_name"),
            last_name: string_field(response, "family_name"),
            display_name: string_field(response, "name"),
            picture: string_field(response, "picture"),
            provider: Some(self.provider().to_string()),
        })
    }
}
