//! LINE SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

const BASE_URL: &str = "https://api.line.me/oauth2/v2.1";

/// Login via LINE OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSso;

#[async_trait]
impl SsoProviderAdapter for LineSso {
    fn provider(&self) -> &str {
        "line"
    }

    fn default_scope(&self) -> Vec<String> {
        vec![
            "email".to_string(),
            "profile".to_string(),
            "openid".to_string(),
        ]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://access.line.me/oauth2/v2.1/authorize".to_string(),
            token_endpoint: format!("{BASE_URL}/token"),
            userinfo_endpoint: format!("{BASE_URL}/userinfo"),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Ok(OpenID {
            id: string_field(response, "sub"),
            email: string_field(response, "email"),
            display_name: string_field(response, "name"),
            picture: string_field(response, "picture"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
