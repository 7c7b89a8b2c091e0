//! Kakao SSO provider adapter.

use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Kakao OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct KakaoSso;

#[async_trait]
impl SsoProviderAdapter for KakaoSso {
    fn provider(&self) -> &str {
        "kakao"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["openid".to_string()]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://kauth.kakao.com/oauth/authorize".to_string(),
            token_endpoint: "https://kauth.kakao.com/oauth/token".to_string(),
            userinfo_endpoint: "https://kapi.kakao.com/v2/user/me".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Ok(OpenID {
            display_name: response
                .pointer("/properties/nickname")
                .and_then(Value::as_str)
                .map(String::from),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
