//! Seznam SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Seznam OAuth.
///
/// Seznam's token endpoint wants the client secret as a request parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeznamSso;

#[async_trait]
impl SsoProviderAdapter for SeznamSso {
    fn provider(&self) -> &str {
        "seznam"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["identity".to_string()]
    }

    fn extra_token_params(&self, client_secret: &str) -> Vec<(String, String)> {
        vec![("client_secret".to_string(), client_secret.to_string())]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://login.szn.cz/api/v1/oauth/auth".to_string(),
            token_endpoint: "https://login.szn.cz/api/v1/oauth/token".to_string(),
            userinfo_endpoint: "https://login.szn.cz/api/v1/user".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Ok(OpenID {
            id: string_field(response, "oauth_user_id"),
            email: string_field(response, "email"),
            first_name: string_field(response, "firstname"),
            last_name: string_field(response, "lastname"),
            display_name: string_field(response, "username"),
            picture: string_field(response, "avatar_url"),
            provider: Some(self.provider().to_string()),
        })
    }
}
