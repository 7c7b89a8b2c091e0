//! Core vocabulary for SSO login flows.
//!
//! This crate defines the normalized identity record ([`OpenID`]), the
//! three-endpoint [`DiscoveryDocument`], the error taxonomy and the
//! [`SsoProviderAdapter`] capability trait implemented by every identity
//! provider adapter. The OAuth2 protocol engine lives in `rust-sso-oauth2`;
//! concrete adapters live in `rust-sso-providers`.

mod error;
mod openid;
mod provider;

pub use error::{LoginError, SsoError, SsoResult};
pub use openid::{DiscoveryDocument, OpenID};
pub use provider::{SsoProviderAdapter, UserInfoSession};
