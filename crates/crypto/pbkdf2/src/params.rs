use std::{fs, path::Path};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{
    digest::DigestAlgorithm, errors::Pbkdf2Error, hex_serde, key::DerivedKey, pbkdf2::derive,
    request::Pbkdf2Options,
};

/// The `kdf` module of an EIP-2335 style keystore, e.g.
/// `{"function":"pbkdf2","params":{"c":262144,"dklen":32,"prf":"hmac-sha256","salt":"..."}}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "function", content = "params", rename_all = "lowercase")]
pub enum KdfParams {
    Pbkdf2 {
        c: u32,
        dklen: u32,
        prf: Prf,
        #[serde(with = "hex_serde")]
        salt: Vec<u8>,
    },
}

impl KdfParams {
    pub fn pbkdf2(prf: Prf, salt: Vec<u8>, c: u32, dklen: u32) -> Self {
        KdfParams::Pbkdf2 {
            c,
            dklen,
            prf,
            salt,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(serde_json::from_str(fs::read_to_string(path)?.as_str())?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn options(&self) -> Pbkdf2Options {
        match self {
            KdfParams::Pbkdf2 {
                c,
                dklen,
                prf,
                salt,
            } => Pbkdf2Options::new()
                .digest_algorithm(prf.digest())
                .salt(salt)
                .length(i64::from(*dklen))
                .iterations(*c),
        }
    }

    pub fn derive_key(&self, password: &[u8]) -> Result<DerivedKey, Pbkdf2Error> {
        derive(&self.options().password(password))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Prf {
    HmacSha1,
    HmacSha224,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl Prf {
    pub fn digest(&self) -> DigestAlgorithm {
        match self {
            Prf::HmacSha1 => DigestAlgorithm::Sha1,
            Prf::HmacSha224 => DigestAlgorithm::Sha224,
            Prf::HmacSha256 => DigestAlgorithm::Sha256,
            Prf::HmacSha384 => DigestAlgorithm::Sha384,
            Prf::HmacSha512 => DigestAlgorithm::Sha512,
        }
    }
}

impl From<DigestAlgorithm> for Prf {
    fn from(digest: DigestAlgorithm) -> Self {
        match digest {
            DigestAlgorithm::Sha1 => Prf::HmacSha1,
            DigestAlgorithm::Sha224 => Prf::HmacSha224,
            DigestAlgorithm::Sha256 => Prf::HmacSha256,
            DigestAlgorithm::Sha384 => Prf::HmacSha384,
            DigestAlgorithm::Sha512 => Prf::HmacSha512,
        }
    }
}
