use crate::digest::{Block, DigestSpec};

/// The PBKDF2 pseudorandom function: HMAC keyed with the password over `seed`.
///
/// Empty passwords and seeds are valid inputs.
pub fn prf(digest: &DigestSpec, password: &[u8], seed: &[u8]) -> Block {
    let block = digest.hmac(password, seed);
    debug_assert_eq!(block.len(), digest.output_len());
    block
}
