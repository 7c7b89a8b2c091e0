//! Tidal SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Tidal OAuth (PKCE required).
#[derive(Debug, Clone, Copy, Default)]
pub struct TidalSso;

#[async_trait]
impl SsoProviderAdapter for TidalSso {
    fn provider(&self) -> &str {
        "tidal"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["user.read".to_string()]
    }

    fn uses_pkce(&self) -> bool {
        true
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://login.tidal.com/authorize".to_string(),
            token_endpoint: "https://auth.tidal.com/v1/oauth2/token".to_string(),
            userinfo_endpoint: "https://openapi.tidal.com/v2/users/me".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let data = response.get("data").cloned().unwrap_or(Value::Null);
        let attributes = data.get("attributes").cloned().unwrap_or(Value::Null);

        Ok(OpenID {
            id: string_field(&data, "id"),
            email: string_field(&attributes, "email"),
            display_name: string_field(&attributes, "username"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
