//! SoundCloud SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via SoundCloud OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundcloudSso;

#[async_trait]
impl SsoProviderAdapter for SoundcloudSso {
    fn provider(&self) -> &str {
        "soundcloud"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["openid".to_string()]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://secure.soundcloud.com/authorize".to_string(),
            token_endpoint: "https://secure.soundcloud.com/oauth/token".to_string(),
            userinfo_endpoint: "https://api.soundcloud.com/me".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Ok(OpenID {
            id: string_field(response, "id"),
            first_name: string_field(response, "first_name"),
            last_name: string_field(response, "last_name"),
            display_name: string_field(response, "username"),
            picture: string_field(response, "avatar_url"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
