//! SSO client: adapter + credentials + the per-client login lock.

use crate::config::SsoConfig;
use crate::session::LoginSession;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rust_sso_core::{SsoError, SsoProviderAdapter, SsoResult};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Protocol engine for one provider.
///
/// Long-lived and freely shareable: credentials and the adapter are
/// immutable, and all per-login state lives in the [`LoginSession`] obtained
/// from [`Self::start_login`]. The login lock serializes concurrent login
/// attempts against the same client instance.
pub struct SsoClient<P: SsoProviderAdapter> {
    adapter: P,
    config: SsoConfig,
    http: reqwest::Client,
    login_lock: Mutex<()>,
}

impl<P: SsoProviderAdapter> SsoClient<P> {
    pub fn new(adapter: P, config: SsoConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .expect("failed to build HTTP client");

        Self {
            adapter,
            config,
            http,
            login_lock: Mutex::new(()),
        }
    }

    /// Enter a scoped login session.
    ///
    /// Awaits the login lock, so a second concurrent login on the same client
    /// cannot start (and cannot reset any state) until the first session is
    /// dropped. The returned session starts blank: state and PKCE artifacts
    /// are generated fresh here when the adapter calls for them, and the lock
    /// is released on drop, on every exit path.
    pub async fn start_login(&self) -> LoginSession<'_, P> {
        let guard = self.login_lock.lock().await;
        debug!(provider = self.adapter.provider(), "entering login scope");
        LoginSession::new(self, guard)
    }

    pub fn adapter(&self) -> &P {
        &self.adapter
    }

    pub fn config(&self) -> &SsoConfig {
        &self.config
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Decode the payload segment of an ID token without verifying the signature.
///
/// The token arrives over the authenticated token-endpoint channel directly
/// from the provider, not from an untrusted third party, so this layer only
/// extracts the claims.
pub fn decode_id_token_claims(id_token: &str) -> SsoResult<serde_json::Value> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| SsoError::InvalidTokenResponse("ID token is not a JWT".to_string()))?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).map_err(|err| {
        SsoError::InvalidTokenResponse(format!("ID token payload is not base64url: {err}"))
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
