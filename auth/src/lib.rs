//! Credential and session-token core
//!
//! - Password hashing (salted PBKDF2-HMAC-SHA256, constant-time verification)
//! - Signed, expiring session tokens behind a [`Signer`] seam (HS256 JWT by default)
//! - Authentication coordination driven by an immutable [`AuthSettings`]
//!
//! Everything here is pure and synchronous. Callers on an async runtime
//! should run hashing and verification on a blocking pool.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(1_000);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "not-a-record"));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::from_secret(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.create(42, "student", Duration::hours(1)).unwrap();
//! let payload = codec.decode(&token).unwrap();
//! assert_eq!(payload.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthSettings, Authenticator};
//!
//! let settings = AuthSettings::new("secret_key_at_least_32_bytes_long!").with_hash_iterations(1_000);
//! let auth = Authenticator::new(&settings);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, 42, "student").unwrap();
//!
//! // Validate token
//! let payload = auth.decode_token(&result.access_token).unwrap();
//! assert_eq!(payload.role, "student");
//! ```

pub mod authenticator;
pub mod password;
pub mod settings;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::CredentialRecord;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use settings::AuthSettings;
pub use token::Clock;
pub use token::FixedClock;
pub use token::JwtSigner;
pub use token::Signer;
pub use token::SystemClock;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenPayload;
