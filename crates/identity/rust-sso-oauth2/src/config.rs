//! Engine configuration.

/// Credentials and behavior flags for one [`SsoClient`](crate::SsoClient).
#[derive(Debug, Clone)]
pub struct SsoConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI bound at construction; `login_url` may override per call.
    pub redirect_uri: Option<String>,
    /// Permit plain-http callback URLs (local development only).
    pub allow_insecure_http: bool,
    /// Overrides the adapter's default scope list when set.
    pub scope: Option<Vec<String>>,
    pub http_timeout_seconds: u64,
}

impl SsoConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            allow_insecure_http: false,
            scope: None,
            http_timeout_seconds: 30,
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_allow_insecure_http(mut self, allow: bool) -> Self {
        self.allow_insecure_http = allow;
        self
    }

    pub fn with_scope(mut self, scope: Vec<String>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }
}
