use std::{fs, path::Path};

use anyhow::Result;
use brine_pbkdf2::{Pbkdf2Options, hex_serde};
use serde::Deserialize;

pub const VECTORS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/vectors/pbkdf2.json");

/// A published or independently computed PBKDF2 answer.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub digest: String,
    #[serde(with = "hex_serde")]
    pub password: Vec<u8>,
    #[serde(with = "hex_serde")]
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub length: i64,
    pub derived_key: String,
}

impl TestVector {
    pub fn options(&self) -> Pbkdf2Options {
        Pbkdf2Options::new()
            .digest(self.digest.as_str())
            .password(&self.password)
            .salt(&self.salt)
            .length(self.length)
            .iterations(self.iterations)
    }
}

pub fn load_vectors<P: AsRef<Path>>(path: P) -> Result<Vec<TestVector>> {
    Ok(serde_json::from_str(fs::read_to_string(path)?.as_str())?)
}
