use std::{collections::HashMap, sync::Arc};

use crate::{CryptoProvider, CryptoProviderError, Hasher, Signer};

pub mod hasher;
pub mod signer;
pub mod utilities;

#[cfg(test)]
mod test;

#[derive(Clone)]
pub struct CryptoProviderImpl {
    hashers: HashMap<String, Arc<dyn Hasher>>,
    signers: HashMap<String, Arc<dyn Signer>>,
}

impl CryptoProviderImpl {
    pub fn new(
        hashers: HashMap<String, Arc<dyn Hasher>>,
        signers: HashMap<String, Arc<dyn Signer>>,
    ) -> Self {
        Self { hashers, signers }
    }
}

impl Default for CryptoProviderImpl {
    fn default() -> Self {
        Self::new(
            HashMap::from_iter(vec![(
                hasher::keccak256::KECCAK_256.to_string(),
                Arc::new(hasher::keccak256::Keccak256Hasher {}) as _,
            )]),
            HashMap::from_iter(vec![(
                signer::personal_sign::PERSONAL_SIGN.to_string(),
                Arc::new(signer::personal_sign::PersonalSignSigner {}) as _,
            )]),
        )
    }
}

impl CryptoProvider for CryptoProviderImpl {
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError> {
        Ok(self
            .hashers
            .get(hasher)
            .ok_or(CryptoProviderError::MissingHasher(hasher.to_owned()))?
            .clone())
    }

    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError> {
        Ok(self
            .signers
            .get(signer)
            .ok_or(CryptoProviderError::MissingSigner(signer.to_owned()))?
            .clone())
    }
}
