use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;
use super::record::CredentialRecord;

/// Password hashing implementation.
///
/// Salted, iterated PBKDF2-HMAC-SHA256. The output is a self-describing
/// [`CredentialRecord`] string, so records written with an older iteration
/// count keep verifying after the default is raised.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    /// Iteration count used when none is configured.
    pub const DEFAULT_ITERATIONS: u32 = 100_000;

    /// Create a password hasher with the given iteration count.
    ///
    /// # Arguments
    /// * `iterations` - PBKDF2 rounds applied to new hashes, clamped to
    ///   `1..=CredentialRecord::MAX_ITERATIONS`
    ///
    /// # Returns
    /// PasswordHasher instance
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.clamp(1, CredentialRecord::MAX_ITERATIONS),
        }
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Serialized credential record
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::InvalidInput);
        }

        let mut salt = vec![0u8; CredentialRecord::SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);

        let derived_key = derive_key(password, &salt, self.iterations);

        Ok(CredentialRecord::new(self.iterations, salt, derived_key).to_string())
    }

    /// Verify a password against a stored credential record.
    ///
    /// A record that cannot be parsed never matches; this never fails.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `record` - Stored credential record string
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, record: &str) -> bool {
        let record: CredentialRecord = match record.parse() {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting unparsable credential record");
                return false;
            }
        };

        let candidate = derive_key(password, &record.salt, record.iterations);

        candidate.as_slice().ct_eq(record.derived_key.as_slice()).into()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITERATIONS)
    }
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut key = vec![0u8; CredentialRecord::KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}
