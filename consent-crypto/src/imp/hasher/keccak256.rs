use sha3::{Digest, Keccak256};

use crate::{Hasher, HasherError};

pub const KECCAK_256: &str = "keccak-256";

pub struct Keccak256Hasher {}

impl Keccak256Hasher {
    pub fn digest(input: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(input);
        hasher.finalize().into()
    }
}

impl Hasher for Keccak256Hasher {
    fn hash_hex(&self, input: &[u8]) -> Result<String, HasherError> {
        Ok(format!("0x{}", hex::encode(Self::digest(input))))
    }

    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(Self::digest(input).to_vec())
    }
}
