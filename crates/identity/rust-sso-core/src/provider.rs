//! Provider adapter capability trait.

use crate::error::{SsoError, SsoResult};
use crate::openid::{DiscoveryDocument, OpenID};
use async_trait::async_trait;
use reqwest::header::ACCEPT;

/// Authenticated HTTP session handed to adapters during identity conversion.
///
/// Some providers need follow-up API calls to complete the identity record
/// (GitHub's private email listing, Bitbucket's emails endpoint). The session
/// wraps the engine's HTTP client together with the access token obtained
/// during the exchange, so adapters can issue authenticated requests without
/// handling the token themselves.
pub struct UserInfoSession<'a> {
    client: &'a reqwest::Client,
    access_token: Option<&'a str>,
}

impl<'a> UserInfoSession<'a> {
    pub fn new(client: &'a reqwest::Client, access_token: Option<&'a str>) -> Self {
        Self {
            client,
            access_token,
        }
    }

    /// GET a JSON document, authenticated with the session's bearer token.
    pub async fn get_json(&self, url: &str) -> SsoResult<serde_json::Value> {
        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(token) = self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SsoError::UserInfoFailed(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }
}

/// Capability set every identity provider adapter supplies.
///
/// An adapter is a small immutable value: discovery endpoints, feature flags
/// and a response-to-identity conversion. Credentials and per-login state
/// live in the protocol engine, so one adapter instance is freely shared
/// across many logins.
#[async_trait]
pub trait SsoProviderAdapter: Send + Sync {
    /// Stable provider name, used as the `provider` field of [`OpenID`].
    fn provider(&self) -> &str;

    /// OAuth2 scopes requested when the caller does not override them.
    fn default_scope(&self) -> Vec<String>;

    /// Whether login URLs and token exchanges carry a PKCE challenge pair.
    fn uses_pkce(&self) -> bool {
        false
    }

    /// Whether an anti-CSRF state token must accompany the login URL.
    fn requires_state(&self) -> bool {
        false
    }

    /// Whether the identity comes from the ID token instead of the userinfo
    /// endpoint.
    fn use_id_token_for_user_info(&self) -> bool {
        false
    }

    /// Whether the token request authenticates with HTTP Basic auth.
    ///
    /// Providers that refuse Basic auth (Apple) return `false` and place the
    /// client secret in the request body via [`Self::extra_token_params`].
    fn use_basic_auth(&self) -> bool {
        true
    }

    /// Headers added to every token and userinfo request.
    fn additional_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Provider-specific query parameters appended to the login URL.
    fn extra_authorize_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Provider-specific parameters merged into the token request body.
    ///
    /// Receives the client secret for providers that require it as a body
    /// parameter (Apple, LinkedIn, Seznam).
    fn extra_token_params(&self, _client_secret: &str) -> Vec<(String, String)> {
        Vec::new()
    }

    /// The three-endpoint document describing this provider.
    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument>;

    /// `authorization_endpoint` projected from the discovery document.
    async fn authorization_endpoint(&self) -> SsoResult<String> {
        Ok(self.get_discovery_document().await?.authorization_endpoint)
    }

    /// `token_endpoint` projected from the discovery document.
    async fn token_endpoint(&self) -> SsoResult<String> {
        Ok(self.get_discovery_document().await?.token_endpoint)
    }

    /// `userinfo_endpoint` projected from the discovery document.
    async fn userinfo_endpoint(&self) -> SsoResult<String> {
        Ok(self.get_discovery_document().await?.userinfo_endpoint)
    }

    /// Build an [`OpenID`] record from the userinfo endpoint response.
    async fn openid_from_response(
        &self,
        _response: &serde_json::Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Err(SsoError::unsupported(self.provider(), "openid_from_response"))
    }

    /// Build an [`OpenID`] record from decoded ID token claims.
    async fn openid_from_token(
        &self,
        _claims: &serde_json::Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        Err(SsoError::unsupported(self.provider(), "openid_from_token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MinimalAdapter;

    #[async_trait]
    impl SsoProviderAdapter for MinimalAdapter {
        fn provider(&self) -> &str {
            "minimal"
        }

        fn default_scope(&self) -> Vec<String> {
            vec!["openid".to_string()]
        }

        async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
            Ok(DiscoveryDocument {
                authorization_endpoint: "https://example.com/auth".to_string(),
                token_endpoint: "https://example.com/token".to_string(),
                userinfo_endpoint: "https://example.com/userinfo".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn derived_accessors_project_discovery_fields() {
        let adapter = MinimalAdapter;
        let document = adapter.get_discovery_document().await.unwrap();

        assert_eq!(
            adapter.authorization_endpoint().await.unwrap(),
            document.authorization_endpoint
        );
        assert_eq!(adapter.token_endpoint().await.unwrap(), document.token_endpoint);
        assert_eq!(
            adapter.userinfo_endpoint().await.unwrap(),
            document.userinfo_endpoint
        );
    }

    #[tokio::test]
    async fn conversion_defaults_are_unsupported() {
        let adapter = MinimalAdapter;
        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);

        let err = adapter
            .openid_from_response(&serde_json::json!({}), &session)
            .await
            .unwrap_err();
        assert!(matches!(err, SsoError::Unsupported { .. }));

        let err = adapter
            .openid_from_token(&serde_json::json!({}), &session)
            .await
            .unwrap_err();
        assert!(matches!(err, SsoError::Unsupported { .. }));
    }

    #[test]
    fn feature_flags_default_to_plain_oauth2() {
        let adapter = MinimalAdapter;
        assert!(!adapter.uses_pkce());
        assert!(!adapter.requires_state());
        assert!(!adapter.use_id_token_for_user_info());
        assert!(adapter.use_basic_auth());
        assert!(adapter.additional_headers().is_empty());
        assert!(adapter.extra_authorize_params().is_empty());
        assert!(adapter.extra_token_params("secret").is_empty());
    }
}
