//! GitLab SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via GitLab OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitlabSso;

#[async_trait]
impl SsoProviderAdapter for GitlabSso {
    fn provider(&self) -> &str {
        "gitlab"
    }

    fn default_scope(&self) -> Vec<String> {
        vec![
            "read_user".to_string(),
            "openid".to_string(),
            "profile".to_string(),
        ]
    }

    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("accept".to_string(), "application/json".to_string())]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://gitlab.com/oauth/authorize".to_string(),
            token_endpoint: "https://gitlab.com/oauth/token".to_string(),
            userinfo_endpoint: "https://gitlab.com/api/v4/user".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Ok(OpenID {
            id: string_field(response, "id"),
            email: string_field(response, "email"),
            display_name: string_field(response, "username"),
            picture: string_field(response, "avatar_url"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
