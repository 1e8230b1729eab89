use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    /// Signature mismatch, unknown key, or a structure that never reached
    /// signature verification.
    #[error("Token is tampered or was not issued by this service: {0}")]
    TamperedOrUnknownToken(String),

    #[error("Token is expired")]
    ExpiredToken,
}
