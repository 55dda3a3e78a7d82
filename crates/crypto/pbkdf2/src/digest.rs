use std::{fmt, str::FromStr};

use hmac::{Mac, SimpleHmac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, digest::crypto_common::BlockSizeUser};
use zeroize::Zeroizing;

use crate::errors::{Pbkdf2Error, Result};

/// One PRF output. Wiped when dropped.
pub type Block = Zeroizing<Vec<u8>>;

/// Hash functions PBKDF2 may be instantiated with, per PKCS #5.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    #[default]
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 5] = [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha224 => "sha224",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    pub fn output_len(&self) -> usize {
        self.spec().output_len()
    }

    pub fn spec(&self) -> &'static DigestSpec {
        match self {
            DigestAlgorithm::Sha1 => &SHA1,
            DigestAlgorithm::Sha224 => &SHA224,
            DigestAlgorithm::Sha256 => &SHA256,
            DigestAlgorithm::Sha384 => &SHA384,
            DigestAlgorithm::Sha512 => &SHA512,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Pbkdf2Error;

    fn from_str(name: &str) -> Result<Self> {
        DigestAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Pbkdf2Error::UnsupportedDigest(name.to_string()))
    }
}

/// A resolved digest: its output length and the HMAC built on it.
///
/// One immutable instance exists per [`DigestAlgorithm`], so a `&'static DigestSpec` can be
/// shared freely between threads.
pub struct DigestSpec {
    algorithm: DigestAlgorithm,
    output_len: usize,
    hmac: fn(&[u8], &[u8]) -> Block,
}

impl DigestSpec {
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// HMAC over `message` keyed with `key`, always `output_len` bytes.
    pub fn hmac(&self, key: &[u8], message: &[u8]) -> Block {
        (self.hmac)(key, message)
    }
}

impl fmt::Debug for DigestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestSpec")
            .field("name", &self.name())
            .field("output_len", &self.output_len)
            .finish()
    }
}

fn hmac_with<D: Digest + BlockSizeUser>(key: &[u8], message: &[u8]) -> Block {
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)
        .expect("HMAC accepts keys of any length");
    mac.update(message);
    Zeroizing::new(mac.finalize().into_bytes().to_vec())
}

static SHA1: DigestSpec = DigestSpec {
    algorithm: DigestAlgorithm::Sha1,
    output_len: 20,
    hmac: hmac_with::<Sha1>,
};

static SHA224: DigestSpec = DigestSpec {
    algorithm: DigestAlgorithm::Sha224,
    output_len: 28,
    hmac: hmac_with::<Sha224>,
};

static SHA256: DigestSpec = DigestSpec {
    algorithm: DigestAlgorithm::Sha256,
    output_len: 32,
    hmac: hmac_with::<Sha256>,
};

static SHA384: DigestSpec = DigestSpec {
    algorithm: DigestAlgorithm::Sha384,
    output_len: 48,
    hmac: hmac_with::<Sha384>,
};

static SHA512: DigestSpec = DigestSpec {
    algorithm: DigestAlgorithm::Sha512,
    output_len: 64,
    hmac: hmac_with::<Sha512>,
};

/// Resolves a digest name to its [`DigestSpec`]. No name selects SHA-512.
pub fn resolve(name: Option<&str>) -> Result<&'static DigestSpec> {
    match name {
        Some(name) => Ok(name.parse::<DigestAlgorithm>()?.spec()),
        None => Ok(DigestAlgorithm::default().spec()),
    }
}
