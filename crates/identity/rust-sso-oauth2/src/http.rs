//! Framework-neutral request/response surface.
//!
//! The engine talks to web frameworks through two small seams: the inbound
//! [`CallbackRequest`] (URL + query + cookies) and an outbound 303 redirect
//! built on plain [`http`] types. Any framework whose request converts into
//! `http::request::Parts` can feed the engine directly.

use http::header::{COOKIE, HOST, LOCATION, SET_COOKIE};
use http::{Response, StatusCode};
use rust_sso_core::{SsoError, SsoResult};
use std::collections::HashMap;
use url::Url;

/// Cookie carrying the PKCE code verifier across the provider round trip.
///
/// The verifier is generated before the redirect but needed again at the
/// token exchange, which arrives as a separate request; the cookie is the
/// only server-visible place it survives in between.
pub const PKCE_VERIFIER_COOKIE: &str = "pkce_code_verifier";

const PKCE_COOKIE_MAX_AGE_SECONDS: u32 = 600;

/// The callback request surface the engine needs: the full request URL, its
/// query parameters and the request cookies.
#[derive(Debug, Clone)]
pub struct CallbackRequest {
    url: Url,
    cookies: HashMap<String, String>,
}

impl CallbackRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            cookies: HashMap::new(),
        }
    }

    /// Parse a callback request from the full request URL.
    pub fn from_url(url: &str) -> SsoResult<Self> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Build a callback request from decomposed `http` request parts.
    ///
    /// Relative request targets are resolved against the `Host` header with
    /// an `http` scheme; the engine upgrades the scheme later unless insecure
    /// transport is allowed.
    pub fn from_http_parts(parts: &http::request::Parts) -> SsoResult<Self> {
        let uri = &parts.uri;
        let url = if uri.scheme().is_some() {
            Url::parse(&uri.to_string())?
        } else {
            let host = parts
                .headers
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| {
                    SsoError::config("callback request has a relative URL and no Host header")
                })?;
            Url::parse(&format!("http://{host}{uri}"))?
        };

        let mut request = Self::new(url);
        for value in parts.headers.get_all(COOKIE) {
            if let Ok(value) = value.to_str() {
                request.parse_cookie_header(value);
            }
        }
        Ok(request)
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    fn parse_cookie_header(&mut self, header: &str) {
        for pair in header.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }
}

/// Build the 303 redirect pointing the user at the provider's login page.
///
/// When PKCE is in use the code verifier rides along in a cookie so the
/// callback request can present it at the token exchange.
pub(crate) fn redirect_response(location: &str, pkce_verifier: Option<&str>) -> Response<()> {
    let mut builder = Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(LOCATION, location);

    if let Some(verifier) = pkce_verifier {
        builder = builder.header(
            SET_COOKIE,
            format!(
                "{PKCE_VERIFIER_COOKIE}={verifier}; \
                 Max-Age={PKCE_COOKIE_MAX_AGE_SECONDS}; Path=/; HttpOnly; SameSite=Lax"
            ),
        );
    }

    builder
        .body(())
        .expect("redirect response built from static parts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_and_cookies() {
        let request =
            CallbackRequest::from_url("https://my.app/callback?code=abc&state=xyz")
                .unwrap()
                .with_cookie(PKCE_VERIFIER_COOKIE, "verifier123");

        assert_eq!(request.query_param("code").as_deref(), Some("abc"));
        assert_eq!(request.query_param("state").as_deref(), Some("xyz"));
        assert_eq!(request.query_param("missing"), None);
        assert_eq!(request.cookie(PKCE_VERIFIER_COOKIE), Some("verifier123"));
    }

    #[test]
    fn from_http_parts_resolves_relative_target() {
        let request = http::Request::builder()
            .uri("/callback?code=abc")
            .header(HOST, "my.app")
            .header(COOKIE, "pkce_code_verifier=v; other=1")
            .body(())
            .unwrap();
        let (parts, ()) = request.into_parts();

        let callback = CallbackRequest::from_http_parts(&parts).unwrap();
        assert_eq!(callback.url().as_str(), "http://my.app/callback?code=abc");
        assert_eq!(callback.query_param("code").as_deref(), Some("abc"));
        assert_eq!(callback.cookie(PKCE_VERIFIER_COOKIE), Some("v"));
        assert_eq!(callback.cookie("other"), Some("1"));
    }

    #[test]
    fn from_http_parts_requires_host_for_relative_target() {
        let request = http::Request::builder()
            .uri("/callback?code=abc")
            .body(())
            .unwrap();
        let (parts, ()) = request.into_parts();

        assert!(matches!(
            CallbackRequest::from_http_parts(&parts),
            Err(SsoError::Config(_))
        ));
    }

    #[test]
    fn redirect_carries_location_and_pkce_cookie() {
        let response = redirect_response("https://provider/auth?x=1", Some("verifier"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "https://provider/auth?x=1"
        );
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("pkce_code_verifier=verifier"));
        assert!(cookie.contains("Max-Age=600"));
    }

    #[test]
    fn redirect_without_pkce_sets_no_cookie() {
        let response = redirect_response("https://provider/auth", None);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}
