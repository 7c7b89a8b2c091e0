//! OAuth2 protocol types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token endpoint response.
///
/// Only `access_token` is required; everything else depends on the provider.
/// Fields this crate does not model are kept in `additional_fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}

/// Options for [`LoginSession::login_url`](crate::LoginSession::login_url)
/// and [`LoginSession::login_redirect`](crate::LoginSession::login_redirect).
#[derive(Debug, Clone, Default)]
pub struct LoginUrlParams {
    /// Overrides the redirect URI bound at construction.
    pub redirect_uri: Option<String>,
    /// Overrides the state generated at scope entry.
    pub state: Option<String>,
    /// Extra query parameters appended to the login URL.
    pub additional_params: Vec<(String, String)>,
}

impl LoginUrlParams {
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_params.push((key.into(), value.into()));
        self
    }
}

/// Options for the callback leg
/// ([`LoginSession::verify_and_process`](crate::LoginSession::verify_and_process)).
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    /// Overrides the redirect URI sent with the token request.
    pub redirect_uri: Option<String>,
    /// Extra parameters merged into the token request body.
    pub additional_params: Vec<(String, String)>,
    /// Extra headers added to the token and userinfo requests.
    pub additional_headers: Vec<(String, String)>,
}

impl CallbackParams {
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_params.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_keeps_unknown_fields() {
        let json = r#"{
            "access_token": "token",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "id_token": "a.b.c",
            "custom": "value"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "token");
        assert_eq!(response.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(response.id_token.as_deref(), Some("a.b.c"));
        assert_eq!(response.additional_fields["custom"], "value");
    }

    #[test]
    fn token_response_requires_access_token() {
        let json = r#"{"token_type": "Bearer"}"#;
        assert!(serde_json::from_str::<TokenResponse>(json).is_err());
    }
}
