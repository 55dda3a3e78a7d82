use std::num::NonZeroU32;

use tracing::{debug, error, trace};
use zeroize::Zeroizing;

use crate::{
    digest::{Block, DigestSpec},
    errors::{Pbkdf2Error, Result},
    hmac::prf,
    key::DerivedKey,
    request::{DerivationRequest, Pbkdf2Options},
};

/// XORs `other` into `block` byte by byte.
pub fn xor_in_place(block: &mut [u8], other: &[u8]) -> Result<()> {
    if block.len() != other.len() {
        return Err(Pbkdf2Error::XorLengthMismatch {
            left: block.len(),
            right: other.len(),
        });
    }
    block
        .iter_mut()
        .zip(other.iter())
        .for_each(|(block_byte, other_byte)| *block_byte ^= other_byte);
    Ok(())
}

pub fn xor(x: &[u8], y: &[u8]) -> Result<Vec<u8>> {
    let mut output = x.to_vec();
    xor_in_place(&mut output, y)?;
    Ok(output)
}

// Based on https://www.ietf.org/rfc/rfc2898.txt
/// Computes `T_i = U_1 ^ U_2 ^ ... ^ U_c` for the 1-based `block_index`.
pub fn accumulate_block(
    digest: &DigestSpec,
    password: &[u8],
    salt: &[u8],
    iterations: NonZeroU32,
    block_index: u32,
) -> Result<Block> {
    let seed = Zeroizing::new([salt, &block_index.to_be_bytes()].concat());
    let mut mac = prf(digest, password, &seed);
    let mut block = mac.clone();

    for _ in 1..iterations.get() {
        mac = prf(digest, password, &mac);
        xor_in_place(&mut block, &mac)?;
    }
    Ok(block)
}

/// Runs the block accumulator over blocks `1..=l` and truncates the result to the
/// requested key length.
pub fn derive_key(request: &DerivationRequest) -> Result<DerivedKey> {
    let digest = request.digest();
    let key_length = request.key_length();
    let block_total = request.block_total();
    let last_block_size = key_length - (block_total as usize - 1) * digest.output_len();

    debug!(
        "Deriving {key_length} byte key with hmac-{} over {} iterations ({block_total} blocks)",
        digest.name(),
        request.iterations()
    );

    let mut derived_key = Vec::with_capacity(key_length);
    for block_index in 1..=block_total {
        let block = accumulate_block(
            digest,
            request.password(),
            request.salt(),
            request.iterations(),
            block_index,
        )?;
        trace!("Computed block {block_index}/{block_total}");

        if block_index == block_total {
            derived_key.extend_from_slice(&block[..last_block_size]);
        } else {
            derived_key.extend_from_slice(&block);
        }
    }

    Ok(DerivedKey::new(derived_key))
}

/// Validates `options` and derives the key they describe.
pub fn derive(options: &Pbkdf2Options) -> Result<DerivedKey> {
    let result = options.to_request().and_then(|request| derive_key(&request));
    if let Err(err) = &result {
        if err.is_internal() {
            error!("PBKDF2 derivation failed on an internal invariant: {err}");
        } else {
            debug!("Rejected PBKDF2 derivation: {err}");
        }
    }
    result
}

/// Same as [`derive`], rendered as lowercase hex.
pub fn derive_hex(options: &Pbkdf2Options) -> Result<String> {
    Ok(derive(options)?.to_hex())
}
