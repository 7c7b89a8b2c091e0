//! Yandex SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Yandex OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct YandexSso;

#[async_trait]
impl SsoProviderAdapter for YandexSso {
    fn provider(&self) -> &str {
        "yandex"
    }

    fn default_scope(&self) -> Vec<String> {
        vec![
            "login:email".to_string(),
            "login:info".to_string(),
            "login:avatar".to_string(),
        ]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://oauth.yandex.ru/authorize".to_string(),
            token_endpoint: "https://oauth.yandex.ru/token".to_string(),
            userinfo_endpoint: "https://login.yandex.ru/info".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let avatar_empty = response
            .get("is_avatar_empty")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let picture = if avatar_empty {
            None
        } else {
            string_field(response, "default_avatar_id").map(|avatar_id| {
                format!("https://avatars.yandex.net/get-yapic/{avatar_id}/islands-200")
            })
        };

        Ok(OpenID {
            id: string_field(response, "id"),
            email: string_field(response, "default_email"),
            first_name: string_field(response, "first_name"),
            last_name: string_field(response, "last_name"),
            display_name: string_field(response, "display_name"),
            picture,
            provider: Some(self.provider().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn maps_userinfo_and_synthesizes_avatar_url() {
        let adapter = YandexSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({
            "id": "1000034426",
            "default_email": "user@yandex.ru",
            "first_name": "Ivan",
            "last_name": "Ivanov",
            "display_name": "ivan",
            "default_avatar_id": "31804/BYkogAC6AoB17bN1",
            "is_avatar_empty": false
        });

        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert_eq!(openid.id.as_deref(), Some("1000034426"));
        assert_eq!(openid.email.as_deref(), Some("user@yandex.ru"));
        assert_eq!(
            openid.picture.as_deref(),
            Some("https://avatars.yandex.net/get-yapic/31804/BYkogAC6AoB17bN1/islands-200")
        );
    }

    #[tokio::test]
    async fn empty_avatar_maps_to_none() {
        let adapter = YandexSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({
            "id": "1",
            "default_avatar_id": "0/0-0",
            "is_avatar_empty": true
        });

        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert!(openid.picture.is_none());
    }
}
