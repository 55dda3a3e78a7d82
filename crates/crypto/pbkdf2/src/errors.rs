use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Pbkdf2Error {
    #[error("Unsupported digest: {0}")]
    UnsupportedDigest(String),
    #[error("Invalid key length: {0}")]
    InvalidKeyLength(#[from] KeyLengthError),
    #[error("Missing input: {0}")]
    MissingInput(&'static str),
    #[error("Iteration count must be positive")]
    InvalidIterationCount,
    #[error("XOR arguments are not the same length: {left} != {right}")]
    XorLengthMismatch { left: usize, right: usize },
}

impl Pbkdf2Error {
    /// Returns true for broken internal invariants, as opposed to rejected caller input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Pbkdf2Error::XorLengthMismatch { .. })
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLengthError {
    #[error("a key length must be provided")]
    Missing,
    #[error("desired key length must be positive, got {0}")]
    NonPositive(i64),
    #[error("desired key is too long: {length} bytes exceeds the maximum of {max}")]
    TooLong { length: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, Pbkdf2Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_xor_mismatch_is_internal() {
        assert!(Pbkdf2Error::XorLengthMismatch { left: 3, right: 4 }.is_internal());
        assert!(!Pbkdf2Error::UnsupportedDigest("sha".to_string()).is_internal());
        assert!(!Pbkdf2Error::MissingInput("password").is_internal());
        assert!(!Pbkdf2Error::InvalidIterationCount.is_internal());
        assert!(!Pbkdf2Error::from(KeyLengthError::Missing).is_internal());
    }

    #[test]
    fn test_key_length_error_message() {
        let err = Pbkdf2Error::from(KeyLengthError::TooLong {
            length: 274877906881,
            max: 274877906880,
        });
        assert_eq!(
            err.to_string(),
            "Invalid key length: desired key is too long: 274877906881 bytes exceeds the maximum of 274877906880"
        );
    }
}
