use std::fmt;
use std::str::FromStr;

use super::errors::PasswordError;

/// Parsed form of a stored password hash.
///
/// Serialized as `pbkdf2_sha256$<iterations>$<salt_hex>$<derived_key_hex>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub iterations: u32,
    pub salt: Vec<u8>,
    pub derived_key: Vec<u8>,
}

impl CredentialRecord {
    /// Algorithm identifier written as the first field.
    pub const ALGORITHM: &'static str = "pbkdf2_sha256";

    /// Byte length of a PBKDF2-HMAC-SHA256 derived key.
    pub const KEY_LENGTH: usize = 32;

    /// Byte length of the per-record salt.
    pub const SALT_LENGTH: usize = 16;

    /// Highest iteration count a record may carry.
    pub const MAX_ITERATIONS: u32 = 1_000_000;

    const SEPARATOR: char = '$';

    pub fn new(iterations: u32, salt: Vec<u8>, derived_key: Vec<u8>) -> Self {
        Self {
            iterations,
            salt,
            derived_key,
        }
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{algorithm}{sep}{iterations}{sep}{salt}{sep}{key}",
            algorithm = Self::ALGORITHM,
            sep = Self::SEPARATOR,
            iterations = self.iterations,
            salt = hex::encode(&self.salt),
            key = hex::encode(&self.derived_key),
        )
    }
}

impl FromStr for CredentialRecord {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(Self::SEPARATOR).collect();
        let [algorithm, iterations, salt, derived_key] = fields.as_slice() else {
            return Err(PasswordError::MalformedRecord(format!(
                "expected 4 fields, got {}",
                fields.len()
            )));
        };

        if *algorithm != Self::ALGORITHM {
            return Err(PasswordError::MalformedRecord(format!(
                "unknown algorithm: {}",
                algorithm
            )));
        }

        let iterations: u32 = iterations
            .parse()
            .map_err(|e| PasswordError::MalformedRecord(format!("iterations: {}", e)))?;
        if iterations == 0 || iterations > Self::MAX_ITERATIONS {
            return Err(PasswordError::MalformedRecord(format!(
                "iterations must be between 1 and {}, got {}",
                Self::MAX_ITERATIONS,
                iterations
            )));
        }

        let salt = hex::decode(salt)
            .map_err(|e| PasswordError::MalformedRecord(format!("salt: {}", e)))?;
        if salt.len() != Self::SALT_LENGTH {
            return Err(PasswordError::MalformedRecord(format!(
                "salt must be {} bytes, got {}",
                Self::SALT_LENGTH,
                salt.len()
            )));
        }

        let derived_key = hex::decode(derived_key)
            .map_err(|e| PasswordError::MalformedRecord(format!("derived key: {}", e)))?;
        if derived_key.len() != Self::KEY_LENGTH {
            return Err(PasswordError::MalformedRecord(format!(
                "derived key must be {} bytes, got {}",
                Self::KEY_LENGTH,
                derived_key.len()
            )));
        }

        Ok(Self {
            iterations,
            salt,
            derived_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "pbkdf2_sha256$1000$000102030405060708090a0b0c0d0e0f$\
                          00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

    #[test]
    fn test_parse_and_display() {
        let record: CredentialRecord = SAMPLE.parse().expect("Failed to parse record");

        assert_eq!(record.iterations, 1000);
        assert_eq!(record.salt, (0u8..16).collect::<Vec<_>>());
        assert_eq!(record.derived_key.len(), CredentialRecord::KEY_LENGTH);
        assert_eq!(record.to_string(), SAMPLE);
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        let result = "pbkdf2_sha256$1000$abcd".parse::<CredentialRecord>();
        assert!(matches!(result, Err(PasswordError::MalformedRecord(_))));

        let extra = format!("{}$ff", SAMPLE);
        assert!(extra.parse::<CredentialRecord>().is_err());
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        let record = SAMPLE.replacen("pbkdf2_sha256", "pbkdf2_sha1", 1);
        assert!(record.parse::<CredentialRecord>().is_err());
    }

    #[test]
    fn test_rejects_bad_numbers_and_hex() {
        assert!(SAMPLE
            .replacen("$1000$", "$many$", 1)
            .parse::<CredentialRecord>()
            .is_err());
        assert!(SAMPLE
            .replacen("$1000$", "$0$", 1)
            .parse::<CredentialRecord>()
            .is_err());
        assert!(SAMPLE
            .replacen("000102", "zz0102", 1)
            .parse::<CredentialRecord>()
            .is_err());
    }

    #[test]
    fn test_rejects_short_key() {
        let record = "pbkdf2_sha256$1000$000102030405060708090a0b0c0d0e0f$abcd";
        assert!(record.parse::<CredentialRecord>().is_err());
    }

    #[test]
    fn test_rejects_wrong_salt_length() {
        let key = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

        for salt in ["", "00", "000102030405060708090a0b0c0d0e", "000102030405060708090a0b0c0d0e0f10"] {
            let record = format!("pbkdf2_sha256$1000${}${}", salt, key);
            assert!(
                matches!(
                    record.parse::<CredentialRecord>(),
                    Err(PasswordError::MalformedRecord(_))
                ),
                "salt {:?} should be rejected",
                salt
            );
        }
    }

    #[test]
    fn test_rejects_excessive_iterations() {
        assert!(SAMPLE
            .replacen("$1000$", "$4294967295$", 1)
            .parse::<CredentialRecord>()
            .is_err());
        assert!(SAMPLE
            .replacen("$1000$", "$1000001$", 1)
            .parse::<CredentialRecord>()
            .is_err());

        let at_limit = SAMPLE
            .replacen("$1000$", "$1000000$", 1)
            .parse::<CredentialRecord>()
            .expect("Failed to parse record");
        assert_eq!(at_limit.iterations, CredentialRecord::MAX_ITERATIONS);
    }
}
