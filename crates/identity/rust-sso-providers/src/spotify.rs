//! Spotify SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Spotify OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpotifySso;

#[async_trait]
impl SsoProviderAdapter for SpotifySso {
    fn provider(&self) -> &str {
        "spotify"
    }

    fn default_scope(&self) -> Vec<String> {
        vec![
            "user-read-private".to_string(),
            "user-read-email".to_string(),
        ]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://accounts.spotify.com/authorize".to_string(),
            token_endpoint: "https://accounts.spotify.com/api/token".to_string(),
            userinfo_endpoint: "https://api.spotify.com/v1/me".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let picture = response
            .pointer("/images/0/url")
            .and_then(Value::as_str)
            .map(String::from);

        Ok(OpenID {
            id: string_field(response, "id"),
            email: string_field(response, "email"),
            display_name: string_field(response, "display_name"),
            picture,
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
