//! PKCE code verifier and challenge generation (RFC 7636, S256 method).

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, thread_rng};
use sha2::{Digest, Sha256};

/// Shortest verifier RFC 7636 allows.
pub const MIN_VERIFIER_LENGTH: usize = 43;
/// Longest verifier RFC 7636 allows.
pub const MAX_VERIFIER_LENGTH: usize = 128;
/// Verifier length used when the caller expresses no preference.
pub const DEFAULT_VERIFIER_LENGTH: usize = 96;

/// Generate a random PKCE code verifier of exactly `length` characters.
///
/// `length` is clamped to the legal `[43, 128]` range. The verifier is
/// URL-safe base64 without padding, sourced from the thread-local CSPRNG.
pub fn generate_code_verifier(length: usize) -> String {
    let length = length.clamp(MIN_VERIFIER_LENGTH, MAX_VERIFIER_LENGTH);
    let mut rng = thread_rng();
    let bytes: Vec<u8> = (0..length).map(|_| rng.r#gen::<u8>()).collect();
    let mut verifier = URL_SAFE_NO_PAD.encode(bytes);
    verifier.truncate(length);
    verifier
}

/// Derive the S256 code challenge for a verifier.
pub fn generate_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Generate a `(verifier, challenge)` pair with a verifier of the requested
/// (clamped) length.
pub fn generate_challenge_pair(verifier_length: usize) -> (String, String) {
    let verifier = generate_code_verifier(verifier_length);
    let challenge = generate_challenge(&verifier);
    (verifier, challenge)
}

/// PKCE code verifier and challenge pair.
#[derive(Debug, Clone)]
pub struct PkcePair {
    pub code_verifier: String,
    pub code_challenge: String,
    pub code_challenge_method: String,
}

impl PkcePair {
    /// Generate a new pair with a verifier of the requested (clamped) length.
    pub fn generate(verifier_length: usize) -> Self {
        let (code_verifier, code_challenge) = generate_challenge_pair(verifier_length);
        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: "S256".to_string(),
        }
    }
}

impl Default for PkcePair {
    fn default() -> Self {
        Self::generate(DEFAULT_VERIFIER_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_length_is_clamped() {
        for (requested, expected) in [(100, 100), (20, 43), (200, 128), (43, 43), (128, 128)] {
            assert_eq!(generate_code_verifier(requested).len(), expected);
        }
    }

    #[test]
    fn verifier_is_url_safe_without_padding() {
        let verifier = generate_code_verifier(96);
        assert!(
            verifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn challenge_is_sha256_of_verifier() {
        let (verifier, challenge) = generate_challenge_pair(96);
        let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        assert_eq!(challenge, expected);
    }

    #[test]
    fn pairs_are_distinct() {
        let first = PkcePair::generate(96);
        let second = PkcePair::generate(96);
        assert_ne!(first.code_verifier, second.code_verifier);
        assert_ne!(first.code_challenge, second.code_challenge);
        assert_eq!(first.code_challenge_method, "S256");
    }
}
