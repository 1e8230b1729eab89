pub mod clock;
pub mod codec;
pub mod errors;
pub mod payload;
pub mod signer;

pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use payload::TokenPayload;
pub use signer::JwtSigner;
pub use signer::Signer;
