//! SSO error types.

use thiserror::Error;

pub type SsoResult<T> = Result<T, SsoError>;

/// Login failure meant to be surfaced directly from a callback endpoint.
///
/// Carries an HTTP-style status code so web handlers can translate it into a
/// response without further mapping (missing authorization code is a 400,
/// provider-side verification failures such as an unverified email are a 401).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("login failed ({status}): {message}")]
pub struct LoginError {
    pub status: u16,
    pub message: String,
}

impl LoginError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SsoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("provider '{provider}' does not support {operation}")]
    Unsupported { provider: String, operation: String },

    #[error("token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("user info request failed: {0}")]
    UserInfoFailed(String),

    #[error("invalid user info response: {0}")]
    InvalidUserInfoResponse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl SsoError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn login(status: u16, message: impl Into<String>) -> Self {
        Self::Login(LoginError::new(status, message))
    }

    pub fn unsupported(provider: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Unsupported {
            provider: provider.into(),
            operation: operation.into(),
        }
    }

    /// HTTP-style status code, present only for login errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Login(err) => Some(err.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_error_carries_status() {
        let err = SsoError::login(400, "'code' parameter was not found in callback request");
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn config_error_has_no_status() {
        let err = SsoError::config("redirect_uri must be provided");
        assert_eq!(err.status(), None);
    }
}
