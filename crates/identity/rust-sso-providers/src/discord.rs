//! Discord SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Discord OAuth.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscordSso;

#[async_trait]
impl SsoProviderAdapter for DiscordSso {
    fn provider(&self) -> &str {
        "discord"
    }

    fn default_scope(&self) -> Vec<String> {
        vec![
            "identify".to_string(),
            "email".to_string(),
            "openid".to_string(),
        ]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://discord.com/oauth2/authorize".to_string(),
            token_endpoint: "https://discord.com/api/oauth2/token".to_string(),
            userinfo_endpoint: "https://discord.com/api/users/@me".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let user_id = string_field(response, "id");
        let avatar = string_field(response, "avatar");
        // avatars are served from the CDN, keyed by user id and avatar hash
        let picture = match (&user_id, &avatar) {
            (Some(id), Some(hash)) => {
                Some(format!("https://cdn.discordapp.com/avatars/{id}/{hash}.png"))
            }
            _ => None,
        };

        Ok(OpenID {
            id: user_id,
            email: string_field(response, "email"),
            first_name: string_field(response, "username"),
            display_name: string_field(response, "global_name"),
            picture,
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
    async fn maps_userinfo_response() {
        let adapter = DiscordSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({
            "id": "80351110224678912",
            "username": "nelly",
            "global_name": "Nelly",
            "email": "nelly@example.com",
            "avatar": "8342729096ea3675442027381ff50dfe"
        });

        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert_eq!(openid.id.as_deref(), Some("80351110224678912"));
        assert_eq!(openid.display_name.as_deref(), Some("Nelly"));
        assert_eq!(openid.first_name.as_deref(), Some("nelly"));
        assert_eq!(
            openid.picture.as_deref(),
            Some(
                "https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png"
            )
        );
    }

    #[tokio::test]
    async fn no_avatar_means_no_picture() {
        let adapter = DiscordSso;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({"id": "1", "username": "nelly", "avatar": null});
        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert!(openid.picture.is_none());
    }
}
