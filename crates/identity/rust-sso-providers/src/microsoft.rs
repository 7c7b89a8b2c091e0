//! Microsoft SSO provider adapter.

use crate::util::string_field;
use async_trait::async_trait;
use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter, SsoResult, UserInfoSession};
use serde_json::Value;

/// Login via Microsoft (Azure AD / Entra) OAuth.
#[derive(Debug, Clone)]
pub struct MicrosoftSso {
    /// Azure AD tenant; "common" accepts any account.
    pub tenant: String,
    /// Graph API version used for the userinfo endpoint.
    pub graph_version: String,
}

impl MicrosoftSso {
    pub fn new(tenant: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            graph_version: "v1.0".to_string(),
        }
    }
}

impl Default for MicrosoftSso {
    fn default() -> Self {
        Self::new("common")
    }
}

#[async_trait]
impl SsoProviderAdapter for MicrosoftSso {
    fn provider(&self) -> &str {
        "microsoft"
    }

    fn default_scope(&self) -> Vec<String> {
        vec!["openid".to_string()]
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        Ok(DiscoveryDocument {
            authorization_endpoint: format!(
                "https://login.microsoftonline.com/{}/oauth2/v2.0/authorize",
                self.tenant
            ),
            token_endpoint: format!(
                "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
                self.tenant
            ),
            userinfo_endpoint: format!(
                "https://graph.microsoft.com/{}/me",
                self.graph_version
            ),
        })
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Ok(OpenID {
            email: string_field(response, "mail"),
            display_name: string_field(response, "displayName"),
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
    async fn discovery_uses_the_configured_tenant() {
        let adapter = MicrosoftSso::new("my-tenant-id");
        let document = adapter.get_discovery_document().await.unwrap();
        assert_eq!(
            document.authorization_endpoint,
            "https://login.microsoftonline.com/my-tenant-id/oauth2/v2.0/authorize"
        );
        assert_eq!(
            document.token_endpoint,
            "https://login.microsoftonline.com/my-tenant-id/oauth2/v2.0/token"
        );
        assert_eq!(document.userinfo_endpoint, "https://graph.microsoft.com/v1.0/me");
    }

    #[tokio::test]
    async fn maps_userinfo_response() {
        let adapter = MicrosoftSso::default();
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let response = json!({
            "mail": "user@contoso.com",
            "displayName": "Contoso User"
        });

        let openid = adapter
            .openid_from_response(&response, &session)
            .await
            .unwrap();
        assert_eq!(openid.email.as_deref(), Some("user@contoso.com"));
        assert_eq!(openid.display_name.as_deref(), Some("Contoso User"));
        assert_eq!(openid.provider.as_deref(), Some("microsoft"));
        assert!(openid.id.is_none());
    }
}
