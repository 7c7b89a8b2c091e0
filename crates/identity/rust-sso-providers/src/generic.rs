//! Configuration-assembled provider adapter.
//!
//! For ad-hoc providers without a dedicated adapter: supply a name, the
//! discovery endpoints (static or remote) and a response-conversion closure,
//! and [`GenericProviderBuilder::build`] produces an adapter usable anywhere
//! a dedicated one is.

use async_trait::async_trait;
use rust_sso_core::{
    DiscoveryDocument, OpenID, SsoError, SsoProviderAdapter, SsoResult, UserInfoSession,
};
use serde_json::Value;
use std::sync::Arc;

type ResponseConvertor = Arc<dyn Fn(&Value) -> SsoResult<OpenID> + Send + Sync>;

enum DiscoverySource {
    Static(DiscoveryDocument),
    Remote { url: String, http: reqwest::Client },
}

/// Adapter assembled from configuration instead of a dedicated type.
pub struct GenericProvider {
    name: String,
    discovery: DiscoverySource,
    scope: Vec<String>,
    uses_pkce: bool,
    requires_state: bool,
    additional_headers: Vec<(String, String)>,
    convertor: ResponseConvertor,
}

impl std::fmt::Debug for GenericProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericProvider")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("uses_pkce", &self.uses_pkce)
            .field("requires_state", &self.requires_state)
            .field("additional_headers", &self.additional_headers)
            .field("convertor", &"<fn>")
            .finish()
    }
}

impl GenericProvider {
    pub fn builder(name: impl Into<String>) -> GenericProviderBuilder {
        GenericProviderBuilder::new(name)
    }
}

#[async_trait]
impl SsoProviderAdapter for GenericProvider {
    fn provider(&self) -> &str {
        &self.name
    }

    fn default_scope(&self) -> Vec<String> {
        self.scope.clone()
    }

    fn uses_pkce(&self) -> bool {
        self.uses_pkce
    }

    fn requires_state(&self) -> bool {
        self.requires_state
    }

    fn additional_headers(&self) -> Vec<(String, String)> {
        self.additional_headers.clone()
    }

    async fn get_discovery_document(&self) -> SsoResult<DiscoveryDocument> {
        match &self.discovery {
            DiscoverySource::Static(document) => Ok(document.clone()),
            DiscoverySource::Remote { url, http } => {
                Ok(http.get(url).send().await?.json().await?)
            }
        }
    }

    async fn openid_from_response(
        &self,
        response: &Value,
        _session: &UserInfoSession<'_>,
    ) -> SsoResult<OpenID> {
        (self.convertor)(response)
    }
}

/// Builder for [`GenericProvider`].
///
/// `build` fails with a configuration error when a required capability is
/// missing, so an incomplete provider cannot be constructed at all.
pub struct GenericProviderBuilder {
    name: String,
    discovery: Option<DiscoverySource>,
    scope: Vec<String>,
    uses_pkce: bool,
    requires_state: bool,
    additional_headers: Vec<(String, String)>,
    convertor: Option<ResponseConvertor>,
}

impl GenericProviderBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discovery: None,
            scope: Vec::new(),
            uses_pkce: false,
            requires_state: false,
            additional_headers: Vec::new(),
            convertor: None,
        }
    }

    pub fn discovery_document(mut self, document: DiscoveryDocument) -> Self {
        self.discovery = Some(DiscoverySource::Static(document));
        self
    }

    pub fn discovery_url(mut self, url: impl Into<String>) -> Self {
        self.discovery = Some(DiscoverySource::Remote {
            url: url.into(),
            http: reqwest::Client::new(),
        });
        self
    }

    pub fn scope(mut self, scope: Vec<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn uses_pkce(mut self, uses_pkce: bool) -> Self {
        self.uses_pkce = uses_pkce;
        self
    }

    pub fn requires_state(mut self, requires_state: bool) -> Self {
        self.requires_state = requires_state;
        self
    }

    pub fn additional_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }

    pub fn response_convertor(
        mut self,
        convertor: impl Fn(&Value) -> SsoResult<OpenID> + Send + Sync + 'static,
    ) -> Self {
        self.convertor = Some(Arc::new(convertor));
        self
    }

    pub fn build(self) -> SsoResult<GenericProvider> {
        let discovery = self.discovery.ok_or_else(|| {
            SsoError::config(format!(
                "provider '{}' needs a discovery document or discovery URL",
                self.name
            ))
        })?;
        let convertor = self.convertor.ok_or_else(|| {
            SsoError::config(format!(
                "provider '{}' needs a response convertor",
                self.name
            ))
        })?;

        Ok(GenericProvider {
            name: self.name,
            discovery,
            scope: self.scope,
            uses_pkce: self.uses_pkce,
            requires_state: self.requires_state,
            additional_headers: self.additional_headers,
            convertor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_document() -> DiscoveryDocument {
        DiscoveryDocument {
            authorization_endpoint: "https://example.com/auth".to_string(),
            token_endpoint: "https://example.com/token".to_string(),
            userinfo_endpoint: "https://example.com/userinfo".to_string(),
        }
    }

    #[tokio::test]
    async fn builds_a_working_adapter() {
        let provider = GenericProvider::builder("generic")
            .discovery_document(test_document())
            .scope(vec!["openid".to_string()])
            .requires_state(true)
            .response_convertor(|response| {
                Ok(OpenID {
                    id: response.get("uid").and_then(|v| v.as_str()).map(String::from),
                    provider: Some("generic".to_string()),
                    ..OpenID::default()
                })
            })
            .build()
            .unwrap();

        assert_eq!(provider.provider(), "generic");
        assert!(provider.requires_state());
        assert_eq!(provider.get_discovery_document().await.unwrap(), test_document());

        let client = reqwest::Client::new();
        let session = UserInfoSession::new(&client, None);
        let openid = provider
            .openid_from_response(&json!({"uid": "42"}), &session)
            .await
            .unwrap();
        assert_eq!(openid.id.as_deref(), Some("42"));
    }

    #[test]
    fn missing_convertor_fails_at_construction() {
        let err = GenericProvider::builder("incomplete")
            .discovery_document(test_document())
            .build()
            .unwrap_err();
        assert!(matches!(err, SsoError::Config(_)));
    }

    #[test]
    fn missing_discovery_fails_at_construction() {
        let err = GenericProvider::builder("incomplete")
            .response_convertor(|_| Ok(OpenID::default()))
            .build()
            .unwrap_err();
        assert!(matches!(err, SsoError::Config(_)));
    }
}
