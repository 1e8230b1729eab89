use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde_json::Value;

use super::errors::TokenError;

/// Signed-serialization capability used by the token codec.
///
/// Implementations must authenticate the token before handing back any
/// payload data.
pub trait Signer: Send + Sync {
    /// Serialize and sign a payload into a transport-safe token.
    ///
    /// # Errors
    /// * `SigningFailed` - Payload could not be serialized or signed
    fn sign(&self, payload: &Value) -> Result<String, TokenError>;

    /// Verify a token's signature and return its payload.
    ///
    /// # Errors
    /// * `TamperedOrUnknownToken` - Signature mismatch or malformed token
    fn verify_and_unsign(&self, token: &str) -> Result<Value, TokenError>;
}

/// JWT signer using HS256 (HMAC with SHA-256).
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes)
/// - Rotating the secret invalidates every token issued under the old one
pub struct JwtSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtSigner {
    /// Create a new signer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Server-side signing secret
    ///
    /// # Returns
    /// JwtSigner instance configured with HS256 algorithm
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked by the codec against its own clock.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation
    }
}

impl Signer for JwtSigner {
    fn sign(&self, payload: &Value) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, payload, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    fn verify_and_unsign(&self, token: &str) -> Result<Value, TokenError> {
        let token_data = decode::<Value>(token, &self.decoding_key, &self.validation())
            .map_err(|e| TokenError::TamperedOrUnknownToken(format!("{:?}", e.kind())))?;

        Ok(token_data.claims)
    }
}
