//! Facebook SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

const BASE_URL: &str = "https://graph.facebook.com/v9.0";

/// Login via Facebook OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacebookSso;

#[async_trait]
impl SsoProviderAdapter for FacebookSso {
    fn provider(&self) -> &str {
        "facebook"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["email".to_string()]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://www.facebook.com/v9.0/dialog/oauth".to_string(),
            token_endpoint: format!("{BASE_URL}/oauth/access_token"),
            userinfo_endpoint: format!(
                "{BASE_URL}/me?fields=id,name,email,first_name,last_name,picture"
            ),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        // the picture URL sits under picture.data.url
        let picture = response
            .pointer("/picture/data/url")
            .and_then(Value::as_str)
            .map(String::from);

        Ok(OpenID {
            id: string_field(response, "id"),
            email: string_field(response, "email"),
            first_name: string_field(response, "first_name"),
            last_name: string_field(response, "last_name"),
            display_name: string_field(response, "name"),
            picture,
            provider: Some(self.provider().to_string()),
        })
    }
}
