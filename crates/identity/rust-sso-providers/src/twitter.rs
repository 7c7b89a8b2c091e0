//! Twitter (X) SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Twitter (X) OAuth (PKCE required).
#[derive(Debug, Clone, Copy, Default)]
pub struct TwitterSso;

#[async_trait]
impl SsoProviderAdapter for TwitterSso {
    fn provider(&self) -> &str {
        "twitter"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["users.read".to_string(), "tweet.read".to_string()]
    }

    fn uses_pkce(&self) -> bool {
        true
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://twitter.com/i/oauth2/authorize".to_string(),
            token_endpoint: "https://api.twitter.com/2/oauth2/token".to_string(),
            userinfo_endpoint: "https://api.twitter.com/2/users/me".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let data = response.get("data").cloned().unwrap_or(Value::Null);

        Ok(OpenID {
            id: string_field(&data, "id"),
            first_name: string_field(&data, "name"),
            display_name: string_field(&data, "username"),
            picture: string_field(&data, "profile_image_url"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
