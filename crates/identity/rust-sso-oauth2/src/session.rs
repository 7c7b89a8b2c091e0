//! Scoped login session: the state machine for one login attempt.

use crate::client::{SsoClient, decode_id_token_claims};
use crate::http::{CallbackRequest, PKCE_VERIFIER_COOKIE, redirect_response};
use crate::pkce::{DEFAULT_VERIFIER_LENGTH, PkcePair};
use crate::types::{CallbackParams, LoginUrlParams, TokenResponse};
use http::Response;
use reqwest::header::ACCEPT;
use rust_sso_core::{OpenID, SsoError, SsoProviderAdapter, SsoResult, UserInfoSession};
use tokio::sync::MutexGuard;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// Identity material produced by the exchange, before normalization.
enum RawIdentity {
    UserInfo(serde_json::Value),
    IdTokenClaims(serde_json::Value),
}

/// One login attempt on an [`SsoClient`].
///
/// Created by [`SsoClient::start_login`]; holds the client's login lock until
/// dropped. All mutable per-login state lives here — anti-CSRF state, the
/// PKCE pair and the captured tokens — so a new session can never observe
/// residue from a previous one.
pub struct LoginSession<'a, P: SsoProviderAdapter> {
    client: &'a SsoClient<P>,
    state: Option<String>,
    returned_state: Option<String>,
    pkce: Option<PkcePair>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    id_token: Option<String>,
    exchanged: bool,
    _guard: MutexGuard<'a, ()>,
}

impl<'a, P: SsoProviderAdapter> LoginSession<'a, P> {
    pub(crate) fn new(client: &'a SsoClient<P>, guard: MutexGuard<'a, ()>) -> Self {
        let adapter = client.adapter();
        let state = adapter
            .requires_state()
            .then(|| Uuid::new_v4().to_string());
        let pkce = adapter
            .uses_pkce()
            .then(|| PkcePair::generate(DEFAULT_VERIFIER_LENGTH));

        Self {
            client,
            state,
            returned_state: None,
            pkce,
            access_token: None,
            refresh_token: None,
            id_token: None,
            exchanged: false,
            _guard: guard,
        }
    }

    /// Anti-CSRF state generated at scope entry, if the adapter requires one.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// State value the provider sent back with the callback.
    ///
    /// Captured for inspection only; the engine performs no cross-check, so
    /// callers relying on the state for CSRF protection compare it themselves.
    pub fn returned_state(&self) -> Option<&str> {
        self.returned_state.as_deref()
    }

    pub fn pkce_pair(&self) -> Option<&PkcePair> {
        self.pkce.as_ref()
    }

    pub fn pkce_code_verifier(&self) -> Option<&str> {
        self.pkce.as_ref().map(|pkce| pkce.code_verifier.as_str())
    }

    /// Access token captured by the exchange.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Refresh token, if the provider returned one.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Raw ID token string, if the provider returned one.
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    /// Build the authorization-endpoint URL the user should be sent to.
    pub async fn login_url(&self, params: &LoginUrlParams) -> SsoResult<String> {
        let client = self.client;
        let adapter = client.adapter();
        let config = client.config();

        let redirect_uri = params
            .redirect_uri
            .as_deref()
            .or(config.redirect_uri.as_deref())
            .ok_or_else(|| {
                SsoError::config(
                    "redirect_uri must be provided, either at construction or request time",
                )
            })?;

        let state = params.state.as_deref().or(self.state.as_deref());
        if adapter.requires_state() && state.is_none() {
            warn!(
                provider = adapter.provider(),
                "no anti-CSRF state available; producing a login URL without one"
            );
        }
        if adapter.uses_pkce() && self.pkce.is_none() {
            warn!(
                provider = adapter.provider(),
                "adapter uses PKCE but this session has no challenge pair"
            );
        }

        let mut url = Url::parse(&adapter.authorization_endpoint().await?)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("response_type", "code");
            pairs.append_pair("client_id", &config.client_id);
            pairs.append_pair("redirect_uri", redirect_uri);

            let scope = config
                .scope
                .clone()
                .unwrap_or_else(|| adapter.default_scope());
            if !scope.is_empty() {
                pairs.append_pair("scope", &scope.join(" "));
            }

            if let Some(state) = state {
                pairs.append_pair("state", state);
            }
            if let Some(pkce) = &self.pkce {
                pairs.append_pair("code_challenge", &pkce.code_challenge);
                pairs.append_pair("code_challenge_method", &pkce.code_challenge_method);
            }
            for (key, value) in adapter.extra_authorize_params() {
                pairs.append_pair(&key, &value);
            }
            for (key, value) in &params.additional_params {
                pairs.append_pair(key, value);
            }
        }

        debug!(provider = adapter.provider(), "prepared login URL");
        Ok(url.to_string())
    }

    /// Wrap [`Self::login_url`] in a 303 redirect response.
    ///
    /// When the adapter uses PKCE the code verifier is set as a cookie so the
    /// callback request can present it at the token exchange.
    pub async fn login_redirect(&self, params: &LoginUrlParams) -> SsoResult<Response<()>> {
        let url = self.login_url(params).await?;
        Ok(redirect_response(&url, self.pkce_code_verifier()))
    }

    /// Process the provider's callback request and resolve the identity.
    ///
    /// Extracts the authorization code (missing code is a login error with
    /// status 400), captures the returned state, pulls the PKCE verifier from
    /// its cookie, and runs the token exchange.
    pub async fn verify_and_process(
        &mut self,
        request: &CallbackRequest,
        params: &CallbackParams,
    ) -> SsoResult<Option<OpenID>> {
        let (code, pkce_verifier) = self.extract_callback(request)?;
        self.process_login(&code, request, params, pkce_verifier.as_deref())
            .await
    }

    /// Like [`Self::verify_and_process`] but skips identity normalization and
    /// returns the provider's raw JSON.
    pub async fn verify_and_process_raw(
        &mut self,
        request: &CallbackRequest,
        params: &CallbackParams,
    ) -> SsoResult<Option<serde_json::Value>> {
        let (code, pkce_verifier) = self.extract_callback(request)?;
        self.process_login_raw(&code, request, params, pkce_verifier.as_deref())
            .await
    }

    /// Exchange an authorization code and normalize the resulting identity.
    ///
    /// Low level; [`Self::verify_and_process`] is the usual entry point.
    pub async fn process_login(
        &mut self,
        code: &str,
        request: &CallbackRequest,
        params: &CallbackParams,
        pkce_verifier: Option<&str>,
    ) -> SsoResult<Option<OpenID>> {
        let Some(raw) = self
            .exchange_and_fetch(code, request, params, pkce_verifier)
            .await?
        else {
            return Ok(None);
        };

        let adapter = self.client.adapter();
        let session = UserInfoSession::new(self.client.http_client(), self.access_token.as_deref());
        let openid = match &raw {
            RawIdentity::UserInfo(content) => adapter.openid_from_response(content, &session).await?,
            RawIdentity::IdTokenClaims(claims) => adapter.openid_from_token(claims, &session).await?,
        };

        info!(provider = adapter.provider(), "login resolved to an identity");
        Ok(Some(openid))
    }

    /// Exchange an authorization code and return the un-normalized identity
    /// JSON (userinfo response, or decoded ID token claims).
    pub async fn process_login_raw(
        &mut self,
        code: &str,
        request: &CallbackRequest,
        params: &CallbackParams,
        pkce_verifier: Option<&str>,
    ) -> SsoResult<Option<serde_json::Value>> {
        Ok(self
            .exchange_and_fetch(code, request, params, pkce_verifier)
            .await?
            .map(|raw| match raw {
                RawIdentity::UserInfo(content) | RawIdentity::IdTokenClaims(content) => content,
            }))
    }

    fn extract_callback(
        &mut self,
        request: &CallbackRequest,
    ) -> SsoResult<(String, Option<String>)> {
        let code = request.query_param("code").ok_or_else(|| {
            SsoError::login(400, "'code' parameter was not found in callback request")
        })?;
        self.returned_state = request.query_param("state");

        let pkce_verifier = request.cookie(PKCE_VERIFIER_COOKIE).map(str::to_owned);
        if self.client.adapter().uses_pkce() && pkce_verifier.is_none() {
            warn!(
                provider = self.client.adapter().provider(),
                "PKCE verifier cookie missing from callback; the provider will likely reject the exchange"
            );
        }

        Ok((code, pkce_verifier))
    }

    async fn exchange_and_fetch(
        &mut self,
        code: &str,
        request: &CallbackRequest,
        params: &CallbackParams,
        pkce_verifier: Option<&str>,
    ) -> SsoResult<Option<RawIdentity>> {
        let client = self.client;
        let adapter = client.adapter();
        let config = client.config();

        if self.exchanged {
            warn!(
                provider = adapter.provider(),
                "login session reused for a second exchange; resetting captured tokens — \
                 run each login attempt in its own scoped session"
            );
            self.access_token = None;
            self.refresh_token = None;
            self.id_token = None;
            self.exchanged = false;
        }

        let token_endpoint = adapter.token_endpoint().await?;
        if token_endpoint.is_empty() {
            debug!(
                provider = adapter.provider(),
                "no token endpoint resolved; returning no identity"
            );
            return Ok(None);
        }

        let callback_url = normalize_callback_url(request.url(), config.allow_insecure_http);
        let current_path = path_without_query(&callback_url);
        let redirect_uri = params
            .redirect_uri
            .as_deref()
            .or(config.redirect_uri.as_deref())
            .unwrap_or(&current_path);

        let mut form: Vec<(String, String)> = vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("client_id".to_string(), config.client_id.clone()),
            ("code".to_string(), code.to_string()),
            ("redirect_uri".to_string(), redirect_uri.to_string()),
        ];
        if let Some(verifier) = pkce_verifier {
            form.push(("code_verifier".to_string(), verifier.to_string()));
        }
        form.extend(adapter.extra_token_params(&config.client_secret));
        form.extend(params.additional_params.iter().cloned());

        let mut token_request = client
            .http_client()
            .post(&token_endpoint)
            .header(ACCEPT, "application/json");
        if adapter.use_basic_auth() {
            token_request = token_request.basic_auth(&config.client_id, Some(&config.client_secret));
        }
        for (name, value) in adapter.additional_headers() {
            token_request = token_request.header(name.as_str(), value.as_str());
        }
        for (name, value) in &params.additional_headers {
            token_request = token_request.header(name.as_str(), value.as_str());
        }

        let response = token_request.form(&form).send().await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SsoError::TokenExchangeFailed(body));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| SsoError::InvalidTokenResponse(err.to_string()))?;

        let access_token = token.access_token.clone();
        self.refresh_token = token.refresh_token.clone();
        self.id_token = token.id_token.clone();
        self.access_token = Some(token.access_token);
        self.exchanged = true;
        info!(provider = adapter.provider(), "exchanged authorization code for tokens");

        if adapter.use_id_token_for_user_info() {
            let Some(id_token) = self.id_token.as_deref() else {
                return Err(SsoError::login(
                    401,
                    format!("provider '{}' did not return an ID token", adapter.provider()),
                ));
            };
            return Ok(Some(RawIdentity::IdTokenClaims(decode_id_token_claims(
                id_token,
            )?)));
        }

        let userinfo_endpoint = adapter.userinfo_endpoint().await?;
        let mut userinfo_request = client
            .http_client()
            .get(&userinfo_endpoint)
            .header(ACCEPT, "application/json")
            .bearer_auth(&access_token);
        for (name, value) in adapter.additional_headers() {
            userinfo_request = userinfo_request.header(name.as_str(), value.as_str());
        }
        for (name, value) in &params.additional_headers {
            userinfo_request = userinfo_request.header(name.as_str(), value.as_str());
        }

        let response = userinfo_request.send().await?;
        if !response.status().is_success() {
            return Err(SsoError::UserInfoFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }
        let content = response
            .json()
            .await
            .map_err(|err| SsoError::InvalidUserInfoResponse(err.to_string()))?;

        Ok(Some(RawIdentity::UserInfo(content)))
    }
}

/// Upgrade a plain-http callback URL to https unless insecure transport is
/// explicitly allowed.
fn normalize_callback_url(url: &Url, allow_insecure_http: bool) -> Url {
    if url.scheme() == "http" && !allow_insecure_http {
        let mut upgraded = url.clone();
        // http -> https is always a permitted scheme transition
        let _ = upgraded.set_scheme("https");
        upgraded
    } else {
        url.clone()
    }
}

/// Scheme, authority and path of a URL, with query and fragment stripped.
fn path_without_query(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.to_string()
}
