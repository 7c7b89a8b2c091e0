//! Apple SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Apple ID OAuth.
///
/// Apple requires `response_mode=form_post` when `name` or `email` scopes are
/// requested, refuses HTTP Basic auth on the token endpoint, and delivers the
/// identity in the ID token.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleSso;

#[async_trait]
impl SsoProviderAdapter for AppleSso {
    fn provider(&self) -> &str {
        "apple"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["openid".to_string(), "email".to_string()]
    }

    fn use_id_token_for_user_info(&self) -> bool {
        true
    }

    fn use_basic_auth(&self) -> bool {
        false
    }

    fn extra_authorize_params(&self) -> Vec<(String, String)> {
        vec![("response_mode".to_string(), "form_post".to_string())]
    }

    fn extra_token_params(&self, client_secret: &str) -> Vec<(String, String)> {
        vec![("client_secret".to_string(), client_secret.to_string())]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://appleid.apple.com/auth/authorize".to_string(),
            token_endpoint: "https://appleid.apple.com/auth/token".to_string(),
            userinfo_endpoint: "https://appleid.apple.com/auth/keys".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn maps_id_token_claims() {
        let adapter = AppleSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let claims = json!({
            "sub": "001999.80b18c74c3264cad895d0eae181d8f50.1909",
            "email": "user@privaterelay.appleid.com"
        });

        let openid = adapter.openid_from_token(&claims, &session).await.unwrap();
        assert_eq!(
            openid.id.as_deref(),
            Some("001999.80b18c74c3264cad895d0eae181d8f50.1909")
        );
        assert_eq!(openid.email.as_deref(), Some("user@privaterelay.appleid.com"));
        assert_eq!(openid.provider.as_deref(), Some("apple"));
    }

    #[test]
    fn flags_match_apple_requirements() {
        let adapter = AppleSso;
        assert!(adapter.use_id_token_for_user_info());
        assert!(!adapter.use_basic_auth());
        assert_eq!(
            adapter.extra_authorize_params(),
            vec![("response_mode".to_string(), "form_post".to_string())]
        );
        assert_eq!(
            adapter.extra_token_params("secret"),
            vec![("client_secret".to_string(), "secret".to_string())]
        );
    }
}
