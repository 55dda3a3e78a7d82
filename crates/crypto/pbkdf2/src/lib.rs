pub mod digest;
pub mod errors;
pub mod hex_serde;
pub mod hmac;
pub mod key;
pub mod params;
pub mod pbkdf2;
pub mod request;

pub use crate::{
    digest::{DigestAlgorithm, DigestSpec},
    errors::{KeyLengthError, Pbkdf2Error},
    key::DerivedKey,
    params::{KdfParams, Prf},
    pbkdf2::{derive, derive_hex, derive_key},
    request::{DerivationRequest, Pbkdf2Options},
};
