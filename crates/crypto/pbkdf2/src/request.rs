use std::{fmt, num::NonZeroU32};

use zeroize::Zeroizing;

use crate::{
    digest::{DigestAlgorithm, DigestSpec, resolve},
    errors::{KeyLengthError, Pbkdf2Error, Result},
};

pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// The largest block index a 32-bit big-endian counter can address.
pub const MAX_BLOCK_INDEX: u64 = u32::MAX as u64;

/// Longest key `digest` can produce: `(2^32 - 1) * hLen` bytes.
pub fn max_key_length(digest: &DigestSpec) -> u64 {
    MAX_BLOCK_INDEX * digest.output_len() as u64
}

/// Caller-facing derivation parameters. Unset fields fall back to their defaults or are
/// rejected when the request is built.
#[derive(Clone, Default)]
pub struct Pbkdf2Options {
    digest: Option<String>,
    password: Option<Zeroizing<Vec<u8>>>,
    salt: Option<Vec<u8>>,
    length: Option<i64>,
    iterations: Option<u32>,
}

impl Pbkdf2Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest by name, e.g. `sha256`. Defaults to `sha512`.
    pub fn digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    pub fn digest_algorithm(self, algorithm: DigestAlgorithm) -> Self {
        self.digest(algorithm.name())
    }

    pub fn password(mut self, password: impl AsRef<[u8]>) -> Self {
        self.password = Some(Zeroizing::new(password.as_ref().to_vec()));
        self
    }

    pub fn salt(mut self, salt: impl AsRef<[u8]>) -> Self {
        self.salt = Some(salt.as_ref().to_vec());
        self
    }

    /// Desired key length in bytes.
    pub fn length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    /// Defaults to [`DEFAULT_ITERATIONS`].
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Validates every option. Nothing is hashed until this has succeeded.
    pub fn to_request(&self) -> Result<DerivationRequest> {
        let digest = resolve(self.digest.as_deref())?;
        let key_length = check_key_length(digest, self.length)?;
        let block_total = u32::try_from(key_length.div_ceil(digest.output_len())).map_err(|_| {
            KeyLengthError::TooLong {
                length: key_length as u64,
                max: max_key_length(digest),
            }
        })?;
        let password = self
            .password
            .as_ref()
            .ok_or(Pbkdf2Error::MissingInput("password"))?;
        let salt = self.salt.as_ref().ok_or(Pbkdf2Error::MissingInput("salt"))?;
        let iterations = NonZeroU32::new(self.iterations.unwrap_or(DEFAULT_ITERATIONS))
            .ok_or(Pbkdf2Error::InvalidIterationCount)?;

        Ok(DerivationRequest {
            digest,
            password: password.clone(),
            salt: salt.clone(),
            key_length,
            block_total,
            iterations,
        })
    }
}

impl fmt::Debug for Pbkdf2Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pbkdf2Options")
            .field("digest", &self.digest)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("salt", &self.salt)
            .field("length", &self.length)
            .field("iterations", &self.iterations)
            .finish()
    }
}

fn check_key_length(digest: &DigestSpec, length: Option<i64>) -> Result<usize> {
    let length = length.ok_or(KeyLengthError::Missing)?;
    if length <= 0 {
        return Err(KeyLengthError::NonPositive(length).into());
    }

    let length = length as u64;
    let max = max_key_length(digest);
    if length > max {
        return Err(KeyLengthError::TooLong { length, max }.into());
    }

    usize::try_from(length).map_err(|_| {
        Pbkdf2Error::from(KeyLengthError::TooLong {
            length,
            max: usize::MAX as u64,
        })
    })
}

/// A fully validated derivation. Only obtainable from [`Pbkdf2Options::to_request`], so the
/// key length always fits the digest's block-index space.
#[derive(Clone)]
pub struct DerivationRequest {
    digest: &'static DigestSpec,
    password: Zeroizing<Vec<u8>>,
    salt: Vec<u8>,
    key_length: usize,
    block_total: u32,
    iterations: NonZeroU32,
}

impl DerivationRequest {
    pub fn digest(&self) -> &'static DigestSpec {
        self.digest
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub fn iterations(&self) -> NonZeroU32 {
        self.iterations
    }

    /// Number of digest-sized blocks needed to cover the key, `ceil(key_length / hLen)`.
    pub fn block_total(&self) -> u32 {
        self.block_total
    }
}

impl fmt::Debug for DerivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationRequest")
            .field("digest", &self.digest.name())
            .field("salt", &self.salt)
            .field("key_length", &self.key_length)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn options() -> Pbkdf2Options {
        Pbkdf2Options::new()
            .digest("sha1")
            .password("password")
            .salt("NaCl")
            .length(128)
            .iterations(3)
    }

    #[test]
    fn test_to_request() {
        let request = options().to_request().expect("options should be valid");
        assert_eq!(request.digest().algorithm(), DigestAlgorithm::Sha1);
        assert_eq!(request.password(), b"password");
        assert_eq!(request.salt(), b"NaCl");
        assert_eq!(request.key_length(), 128);
        assert_eq!(request.iterations().get(), 3);
        assert_eq!(request.block_total(), 7);
    }

    #[test]
    fn test_defaults() {
        let request = Pbkdf2Options::new()
            .password("password")
            .salt("salt")
            .length(64)
            .to_request()
            .expect("options should be valid");
        assert_eq!(request.digest().algorithm(), DigestAlgorithm::Sha512);
        assert_eq!(request.iterations().get(), DEFAULT_ITERATIONS);
        assert_eq!(request.block_total(), 1);
    }

    #[rstest]
    #[case("sha")]
    #[case("my_algorithm")]
    fn test_rejects_unsupported_digest(#[case] digest: &str) {
        assert_eq!(
            options().digest(digest).to_request().unwrap_err(),
            Pbkdf2Error::UnsupportedDigest(digest.to_string())
        );
    }

    #[test]
    fn test_requires_a_key_length() {
        let options = Pbkdf2Options::new().password("password").salt("NaCl");
        assert_eq!(
            options.to_request().unwrap_err(),
            Pbkdf2Error::InvalidKeyLength(KeyLengthError::Missing)
        );
    }

    #[rstest]
    #[case(-1)]
    #[case(0)]
    fn test_requires_a_positive_key_length(#[case] length: i64) {
        assert_eq!(
            options().length(length).to_request().unwrap_err(),
            Pbkdf2Error::InvalidKeyLength(KeyLengthError::NonPositive(length))
        );
    }

    #[test]
    fn test_rejects_a_key_length_that_is_too_long() {
        let options = Pbkdf2Options::new()
            .password("password")
            .salt("NaCl")
            .length(274877906881);
        assert_eq!(
            options.to_request().unwrap_err(),
            Pbkdf2Error::InvalidKeyLength(KeyLengthError::TooLong {
                length: 274877906881,
                max: 274877906880,
            })
        );
    }

    #[rstest]
    #[case(DigestAlgorithm::Sha1, 85899345900)]
    #[case(DigestAlgorithm::Sha224, 120259084260)]
    #[case(DigestAlgorithm::Sha256, 137438953440)]
    #[case(DigestAlgorithm::Sha384, 206158430160)]
    #[case(DigestAlgorithm::Sha512, 274877906880)]
    fn test_max_key_length(#[case] algorithm: DigestAlgorithm, #[case] expected: u64) {
        assert_eq!(max_key_length(algorithm.spec()), expected);
    }

    #[test]
    fn test_accepts_the_maximum_key_length() {
        let request = options()
            .digest_algorithm(DigestAlgorithm::Sha1)
            .length(85899345900)
            .to_request()
            .expect("the ceiling itself is a valid length");
        assert_eq!(u64::from(request.block_total()), MAX_BLOCK_INDEX);
    }

    #[test]
    fn test_requires_a_password() {
        let options = Pbkdf2Options::new().salt("NaCl").length(32);
        assert_eq!(
            options.to_request().unwrap_err(),
            Pbkdf2Error::MissingInput("password")
        );
    }

    #[test]
    fn test_requires_a_salt() {
        let options = Pbkdf2Options::new().password("password").length(32);
        assert_eq!(
            options.to_request().unwrap_err(),
            Pbkdf2Error::MissingInput("salt")
        );
    }

    #[test]
    fn test_accepts_empty_password_and_salt() {
        let request = Pbkdf2Options::new()
            .password("")
            .salt("")
            .length(32)
            .to_request()
            .expect("empty inputs are present inputs");
        assert!(request.password().is_empty());
        assert!(request.salt().is_empty());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        assert_eq!(
            options().iterations(0).to_request().unwrap_err(),
            Pbkdf2Error::InvalidIterationCount
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?} {:?}", options(), options().to_request());
        assert!(!debug.contains("password\""));
        assert!(!debug.contains("[112, 97, 115, 115"));
    }
}
