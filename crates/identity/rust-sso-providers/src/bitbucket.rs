//! Bitbucket SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{
    DiscoveryDocument, OpenID, SsoError, SsoProviderAdapter, SsoResult, UserInfoSession,
};
use serde_json::Value;

/// Login via Bitbucket OAuth.
///
/// The user profile carries no email address; it comes from a follow-up call
/// to the emails endpoint.
#[derive(Debug, Clone)]
pub struct BitbucketSso {
    pub api_base: String,
    pub api_version: String,
}

impl BitbucketSso {
    pub fn new() -> Self {
        Self {
            api_base: "https://api.bitbucket.org".to_string(),
            api_version: "2.0".to_string(),
        }
    }

    fn emails_endpoint(&self) -> String {
        format!("{}/{}/user/emails", self.api_base, self.api_version)
    }
}

impl Default for BitbucketSso {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SsoProviderAdapter for BitbucketSso {
    fn provider(&self) -> &str {
        "bitbucket"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["account".to_string(), "email".to_string()]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: "https://bitbucket.org/site/oauth2/authorize".to_string(),
            token_endpoint: "https://bitbucket.org/site/oauth2/access_token".to_string(),
            userinfo_endpoint: format!("{}/{}/user", self.api_base, self.api_version),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        let emails = session.get_json(&self.emails_endpoint()).await?;
        let email = emails
            .pointer("/values/0/email")
            .and_then(Value::as_str)
            .ok_or_else(|| SsoError::login(401, "Failed to process login via Bitbucket"))?;

        // uuids come wrapped in braces
        let id = string_field(response, "uuid")
            .map(|uuid| uuid.trim_matches(['{', '}']).to_string());

        Ok(OpenID {
            id,
            email: Some(email.to_string()),
            first_name: string_field(response, "nickname"),
            display_name: string_field(response, "display_name"),
            picture: response
                .pointer("/links/avatar/href")
                .and_then(Value::as_str)
                .map(String::from),
            provider: Some(self.provider().to_string()),
            ..OpenID::default()
        })
    }
}
