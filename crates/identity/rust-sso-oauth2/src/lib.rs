//! OAuth2 authorization-code protocol engine with PKCE support.
//!
//! This crate drives the client side of an OAuth2/OpenID-Connect login:
//! building the authorization URL, generating anti-CSRF state and PKCE
//! challenge pairs, exchanging the authorization code for tokens, fetching
//! user info and normalizing it into an [`OpenID`](rust_sso_core::OpenID)
//! record through a provider adapter.
//!
//! A login attempt runs inside a [`LoginSession`] obtained from
//! [`SsoClient::start_login`]. The session holds the client's login lock for
//! its whole lifetime, so concurrent logins against one shared client are
//! fully serialized and every session starts from blank state.

mod client;
mod config;
mod http;
mod pkce;
mod session;
mod types;


pub use client::{SsoClient, decode_id_token_claims};
pub use config::SsoConfig;
pub use http::{CallbackRequest, PKCE_VERIFIER_COOKIE};
pub use pkce::{
    DEFAULT_VERIFIER_LENGTH, MAX_VERIFIER_LENGTH, MIN_VERIFIER_LENGTH, PkcePair,
    generate_challenge_pair, generate_code_verifier,
};
pub use session::LoginSession;
pub use types::{CallbackParams, LoginUrlParams, TokenResponse};

// Re-export common types for convenience
pub use rust_sso_core::{DiscoveryDocument, LoginError, OpenID, SsoError, SsoProviderAdapter, SsoResult};
