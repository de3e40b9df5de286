//! Shared-secret comparison and opaque token generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated invitation and reset tokens.
const TOKEN_LENGTH: usize = 48;

/// Returns a random alphanumeric token suitable for URLs.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// A configured bearer secret, compared in constant time.
#[derive(Clone)]
pub struct SharedSecret {
    secret: Vec<u8>,
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl SharedSecret {
    /// Wrap a secret. An empty secret never verifies.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into().into_bytes(),
        }
    }

    /// Whether a non-empty secret is configured.
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Compare `candidate` against the secret without early exit on the
    /// first differing byte.
    pub fn verify(&self, candidate: &str) -> bool {
        if !self.is_configured() {
            return false;
        }
        let candidate = candidate.as_bytes();
        let mut diff = self.secret.len() ^ candidate.len();
        for (i, byte) in self.secret.iter().enumerate() {
            let other = candidate.get(i).copied().unwrap_or(0);
            diff |= usize::from(byte ^ other);
        }
        diff == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_and_alphanumeric() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify() {
        let secret = SharedSecret::new("cron-s3cret");
        assert!(secret.verify("cron-s3cret"));
        assert!(!secret.verify("cron-s3cres"));
        assert!(!secret.verify("cron-s3cret-and-more"));
        assert!(!secret.verify(""));
    }

    #[test]
    fn test_empty_secret_never_verifies() {
        let secret = SharedSecret::new("");
        assert!(!secret.is_configured());
        assert!(!secret.verify(""));
    }
}
