//! Normalized identity schema shared by all providers.

use serde::{Deserialize, Serialize};

/// Identity record in a common form, assembled from a provider's user info
/// response or ID token claims.
///
/// Every field is optional because providers differ in what they disclose;
/// the record is a superset schema, not normalized per provider. Equality is
/// structural.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenID {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub picture: Option<String>,
    pub provider: Option<String>,
}

impl OpenID {
    /// Whether the populated email field has the rough shape of an address.
    ///
    /// Unset email counts as valid: the field is optional by design.
    pub fn email_is_well_formed(&self) -> bool {
        match self.email.as_deref() {
            None => true,
            Some(email) => {
                let mut parts = email.splitn(2, '@');
                matches!(
                    (parts.next(), parts.next()),
                    (Some(local), Some(domain)) if !local.is_empty() && domain.contains('.')
                )
            }
        }
    }
}

/// The three endpoint URLs describing how to talk to an identity provider.
///
/// Adapters either embed this statically or fetch it from a remote discovery
/// endpoint; once obtained it is immutable. Unknown fields in a remote
/// document are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
}
