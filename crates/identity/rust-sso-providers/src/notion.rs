//! Notion SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Notion OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotionSso;

#[async_trait]
impl SsoProviderAdapter for NotionSso {
    fn provider(&self) -> &str {
        "notion"
    }

    fn default_scope(&self) -> Vec<String> {
        Vec::new()
    }

    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("Notion-Version".to_string(), "2022-06-28".to_string())]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://api.notion.com/v1/oauth/authorize".to_string(),
            token_endpoint: "https://api.notion.com/v1/oauth/token".to_string(),
            userinfo_endpoint: "https://api.notion.com/v1/users/me".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        // the bot's owner is the human who authorized the integration
        let owner = response
            .pointer("/bot/owner/user")
            .cloned()
            .unwrap_or(Value::Null);

        Ok(OpenID {
            id: string_field(&owner, "id"),
            email: owner
                .pointer("/person/email")
                .and_then(Value::as_str)
                .map(String::from),
            display_name: string_field(&owner, "name"),
            picture: string_field(&owner, "avatar_url"),
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
    async fn maps_bot_owner() {
        let adapter = NotionSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({
            "bot": {
                "owner": {
                    "user": {
                        "id": "e79a0b74-3aba-4149-9f74-0bb5791a6ee6",
                        "name": "Notion User",
                        "avatar_url": "https://s3.amazonaws.com/avatar.png",
                        "person": {"email": "notion@example.com"}
                    }
                }
            }
        });

        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert_eq!(
            openid.id.as_deref(),
            Some("e79a0b74-3aba-4149-9f74-0bb5791a6ee6")
        );
        assert_eq!(openid.email.as_deref(), Some("notion@example.com"));
        assert_eq!(openid.display_name.as_deref(), Some("Notion User"));
        assert_eq!(openid.provider.as_deref(), Some("notion"));
    }
}
