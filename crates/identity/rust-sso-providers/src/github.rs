//! GitHub SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{
    DiscoveryDocument, OpenID, SsoError, SsoProviderAdapter, SsoResult, UserInfoSession,
};
use serde_json::Value;

const DEFAULT_EMAILS_ENDPOINT: &str = "https://api.github.com/user/emails";

/// Login via GitHub OAuth.
#[derive(Debug, Clone)]
pub struct GithubSso {
    /// Endpoint listing the user's email addresses; consulted when the
    /// profile email is private.
    pub emails_endpoint: String,
}

impl GithubSso {
    pub fn new() -> Self {
        Self {
            emails_endpoint: DEFAULT_EMAILS_ENDPOINT.to_string(),
        }
    }
}

impl Default for GithubSso {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SsoProviderAdapter for GithubSso {
    fn provider(&self) -> &str {
        "github"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["user:email".to_string()]
    }

    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("accept".to_string(), "application/json".to_string())]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://github.com/login/oauth/authorize".to_string(),
            token_endpoint: "https://github.com/login/oauth/access_token".to_string(),
            userinfo_endpoint: "https://api.github.com/user".to_string(),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let email = match string_field(response, "email") {
            Some(email) => Some(email),
            // a private email is omitted from the profile and must be looked
            // up through the emails endpoint
            None => self.primary_email(session).await?,
        };
        let Some(email) = email else {
            return Err(SsoError::login(401, "Failed to process login via GitHub"));
        };

        Ok(OpenID {
            id: string_field(response, "id"),
            email: Some(email),
            display_name: string_field(response, "login"),
            picture: string_field(response, "avatar_url"),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}

impl GithubSso {
    async fn primary_email(&self, session: &UserInfoSession<'_>) -> SsoResult<Option<String>> {
        let emails = session.get_json(&self.emails_endpoint).await?;
        let entries = emails.as_array().cloned().unwrap_or_default();

        let primary = entries
            .iter()
            .find(|entry| {
                entry
                    .get("primary")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
            })
            .or_else(|| entries.first());

        Ok(primary.and_then(|entry| string_field(entry, "email")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn maps_userinfo_response() {
        let adapter = GithubSso::new();
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({
            "email": "a@b.com",
            "id": 1,
            "login": "u",
            "avatar_url": "http://x"
        });

        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert_eq!(
            openid,
            OpenID {
                id: Some("1".to_string()),
                email: Some("a@b.com".to_string()),
                display_name: Some("u".to_string()),
                picture: Some("http://x".to_string()),
                provider: Some("github".to_string()),
                ..OpenID::default()
            }
        );
    }

    #[tokio::test]
    async fn falls_back_to_primary_email_when_profile_email_is_private() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"email": "secondary@b.com", "primary": false},
                {"email": "primary@b.com", "primary": true}
            ])))
            .mount(&server)
            .await;

        let adapter = GithubSso {
            emails_endpoint: format!("{}/user/emails", server.uri()),
        };
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, Some("token"));

        let response = json!({"email": null, "id": 1, "login": "u", "avatar_url": "http://x"});
        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert_eq!(openid.email.as_deref(), Some("primary@b.com"));
    }

    #[tokio::test]
    async fn missing_email_everywhere_is_a_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let adapter = GithubSso {
            emails_endpoint: format!("{}/user/emails", server.uri()),
        };
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, Some("token"));

        let response = json!({"email": null, "id": 1, "login": "u"});
        let err = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}
