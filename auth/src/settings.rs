use chrono::Duration;

use crate::password::PasswordHasher;

/// Process-wide authentication settings.
///
/// Built once at startup and handed to [`crate::Authenticator::new`]; never
/// mutated afterwards.
#[derive(Clone)]
pub struct AuthSettings {
    /// Server-side signing secret
    pub secret: Vec<u8>,

    /// Lifetime of tokens issued at login/registration
    pub token_ttl: Duration,

    /// PBKDF2 rounds for new password hashes
    pub hash_iterations: u32,
}

impl AuthSettings {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: Duration::minutes(60),
            hash_iterations: PasswordHasher::DEFAULT_ITERATIONS,
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn with_hash_iterations(mut self, hash_iterations: u32) -> Self {
        self.hash_iterations = hash_iterations;
        self
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("hash_iterations", &self.hash_iterations)
            .finish()
    }
}
