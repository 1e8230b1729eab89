use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: i64,
    pub role: String,

    /// Issued at (unix seconds)
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Expiration time (unix seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl TokenPayload {
    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is still valid at exactly its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.expires_at < current_timestamp
    }
}
