//! Token encoding, decoding, and claims.

pub mod claims;
pub mod codec;

pub use claims::{Claims, Expiration};
pub use codec::TokenCodec;
