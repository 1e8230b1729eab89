use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::settings::AuthSettings;
use crate::token::Clock;
use crate::token::JwtSigner;
use crate::token::Signer;
use crate::token::SystemClock;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenPayload;

/// Authentication coordinator combining password verification and token issuance.
///
/// Login flows `verify` → `create`; authenticated requests flow `decode`.
pub struct Authenticator<S = JwtSigner, C = SystemClock>
where
    S: Signer,
    C: Clock,
{
    password_hasher: PasswordHasher,
    token_codec: TokenCodec<S, C>,
    token_ttl: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator signing with HS256 and the wall clock.
    ///
    /// # Arguments
    /// * `settings` - Process-wide authentication settings
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(settings: &AuthSettings) -> Self {
        Self::with_codec(settings, TokenCodec::from_secret(&settings.secret))
    }
}

impl<S, C> Authenticator<S, C>
where
    S: Signer,
    C: Clock,
{
    /// Create an authenticator around an existing token codec.
    pub fn with_codec(settings: &AuthSettings, token_codec: TokenCodec<S, C>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(settings.hash_iterations),
            token_codec,
            token_ttl: settings.token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Serialized credential record
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored credential record.
    ///
    /// Malformed records simply do not match.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token with the default TTL.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored credential record
    /// * `user_id` - Identity to encode in the token
    /// * `role` - Role to encode in the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(user_id, role)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token with the configured default TTL.
    ///
    /// Useful after registration, when the password has just been set.
    pub fn issue_token(&self, user_id: i64, role: &str) -> Result<String, TokenError> {
        self.token_codec.create(user_id, role, self.token_ttl)
    }

    /// Issue a token with an explicit TTL.
    pub fn create_token(&self, user_id: i64, role: &str, ttl: Duration) -> Result<String, TokenError> {
        self.token_codec.create(user_id, role, ttl)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `TamperedOrUnknownToken` - Signature invalid or token malformed
    /// * `ExpiredToken` - Token has expired
    pub fn decode_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.token_codec.decode(token)
    }
}
