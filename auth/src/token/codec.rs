use chrono::Duration;

use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::TokenError;
use super::payload::TokenPayload;
use super::signer::JwtSigner;
use super::signer::Signer;

/// Issues and validates stateless session tokens.
///
/// Validity is fully determined by the signature and the embedded expiry;
/// nothing is stored server-side.
pub struct TokenCodec<S = JwtSigner, C = SystemClock>
where
    S: Signer,
    C: Clock,
{
    signer: S,
    clock: C,
}

impl TokenCodec {
    /// Create a codec signing with HS256 under `secret` and the wall clock.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(JwtSigner::new(secret), SystemClock)
    }
}

impl<S, C> TokenCodec<S, C>
where
    S: Signer,
    C: Clock,
{
    pub fn new(signer: S, clock: C) -> Self {
        Self { signer, clock }
    }

    /// Issue a token for `user_id` with `role`, valid for `ttl`.
    ///
    /// A non-positive `ttl` yields a token that is already expired.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn create(&self, user_id: i64, role: &str, ttl: Duration) -> Result<String, TokenError> {
        let now = self.clock.now();
        let payload = TokenPayload {
            user_id,
            role: role.to_string(),
            issued_at: now,
            expires_at: now + ttl.num_seconds(),
        };

        let value =
            serde_json::to_value(&payload).map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        self.signer.sign(&value)
    }

    /// Verify and decode a token.
    ///
    /// The signature is checked before the payload is parsed, and the
    /// expiry only after both succeed.
    ///
    /// # Errors
    /// * `TamperedOrUnknownToken` - Signature invalid or payload unreadable
    /// * `ExpiredToken` - Signature valid but `exp` is in the past
    pub fn decode(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let value = self.signer.verify_and_unsign(token)?;

        let payload: TokenPayload = serde_json::from_value(value)
            .map_err(|e| TokenError::TamperedOrUnknownToken(format!("payload: {}", e)))?;

        if payload.is_expired(self.clock.now()) {
            return Err(TokenError::ExpiredToken);
        }

        Ok(payload)
    }
}
