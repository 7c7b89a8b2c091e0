//! Naver SSO provider adapter.

use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Naver OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaverSso;

#[async_trait]
impl SsoProviderAdapter for NaverSso {
    fn provider(&self) -> &str {
        "naver"
    }

    fn default_scope(&self) -> Vec<String> {
        Vec::new()
    }

    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("accept".to_string(), "application/json".to_string())]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://nid.naver.com/oauth2.0/authorize".to_string(),
            token_endpoint: "https://nid.naver.com/oauth2.0/token".to_string(),
            userinfo_endpoint: "https://openapi.naver.com/v1/nid/me".to_string(),
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
