pub mod errors;
pub mod pbkdf2;
pub mod record;

pub use self::pbkdf2::PasswordHasher;
pub use errors::PasswordError;
pub use record::CredentialRecord;
