//! LinkedIn SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via LinkedIn SSO.
///
/// LinkedIn's token response carries the identity in the ID token, and the
/// token endpoint additionally wants the client secret as a body parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedInSso;

#[async_trait]
impl SsoProviderAdapter for LinkedInSso {
    fn provider(&self) -> &str {
        "linkedin"
    }

    fn default_scope(&self) -> Vec<String> {
        vec![
            "openid".to_string(),
            "profile".to_string(),
            "email".to_string(),
        ]
    }

    fn use_id_token_for_user_info(&self) -> bool {
        true
    }

    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("accept".to_string(), "application/json".to_string())]
    }

    fn extra_token_params(&self, client_secret: &str) -> Vec<(String, String)> {
        vec![("client_secret".to_string(), client_secret.to_string())]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://www.linkedin.com/oauth/v2/authorization".to_string(),
            token_endpoint: "https://www.linkedin.com/oauth/v2/accessToken".to_string(),
            userinfo_endpoint: "https://api.linkedin.com/v2/userinfo".to_string(),
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
            first_name: string_field(response, "given_name"),
            last_name: string_field(response, "family_name"),
            picture: string_field(response, "picture"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }

    async fn openid_from_token(
        &self,
        claims: &Value,
        session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        self.openid_from_response(claims, session).await
    }
}
