//! Fitbit SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{
    DiscoveryDocument, OpenID, SsoError, SsoProviderAdapter, SsoResult, UserInfoSession,
};
use serde_json::Value;

/// Login via Fitbit OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitbitSso;

#[async_trait]
impl SsoProviderAdapter for FitbitSso {
    fn provider(&self) -> &str {
        "fitbit"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["profile".to_string()]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://www.fitbit.com/oauth2/authorize?response_type=code"
                .to_string(),
            token_endpoint: "https://api.fitbit.com/oauth2/token".to_string(),
            userinfo_endpoint: "https://api.fitbit.com/1/user/-/profile.json".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let Some(info) = response.get("user") else {
            return Err(SsoError::login(401, "Failed to process login via Fitbit"));
        };

        Ok(OpenID {
            id: string_field(info, "encodedId"),
            first_name: string_field(info, "fullName"),
            display_name: string_field(info, "displayName"),
            picture: string_field(info, "avatar"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn maps_nested_user_profile() {
        let adapter = FitbitSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({
            "user": {
                "encodedId": "ABC123",
                "fullName": "Ada Lovelace",
                "displayName": "Ada",
                "avatar": "https://static.fitbit.com/avatar.png"
            }
        });

        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert_eq!(openid.id.as_deref(), Some("ABC123"));
        assert_eq!(openid.first_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(openid.display_name.as_deref(), Some("Ada"));
        assert_eq!(openid.provider.as_deref(), Some("fitbit"));
    }

    #[tokio::test]
    async fn missing_user_object_is_a_401() {
        let adapter = FitbitSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let err = adapter
            .openid_from_response(&json!({}), &session)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}
