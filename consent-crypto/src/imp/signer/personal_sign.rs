use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use rand::thread_rng;

use crate::{imp::hasher::keccak256::Keccak256Hasher, Signer, SignerError};

pub const PERSONAL_SIGN: &str = "SECP256K1_PERSONAL";

const MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";
const SIGNATURE_LENGTH: usize = 65;

/// secp256k1 signatures over personal messages (EIP-191, version `0x45`).
///
/// Signatures are `r || s || v` with `v` in `{27, 28}`. Public keys are SEC1
/// compressed points.
pub struct PersonalSignSigner {}

impl PersonalSignSigner {
    /// Keccak-256 over the prefixed message, as wallets compute it.
    pub fn message_digest(input: &[u8]) -> [u8; 32] {
        let mut prefixed = format!("{MESSAGE_PREFIX}{}", input.len()).into_bytes();
        prefixed.extend_from_slice(input);
        Keccak256Hasher::digest(&prefixed)
    }

    /// Returns `(private_key, public_key)`.
    pub fn random() -> (Vec<u8>, Vec<u8>) {
        let sk = SigningKey::random(&mut thread_rng());
        let pk = VerifyingKey::from(&sk);
        (
            sk.to_bytes().to_vec(),
            pk.to_encoded_point(true).as_bytes().to_vec(),
        )
    }

    pub fn public_key(private_key: &[u8]) -> Result<Vec<u8>, SignerError> {
        let sk = Self::signing_key(private_key)?;
        Ok(VerifyingKey::from(&sk)
            .to_encoded_point(true)
            .as_bytes()
            .to_vec())
    }

    /// Account address: the trailing 20 bytes of Keccak-256 over the uncompressed point.
    pub fn address(public_key: &[u8]) -> Result<[u8; 20], SignerError> {
        let vk = VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|err| SignerError::CouldNotExtractPublicKey(err.to_string()))?;
        Ok(address_of(&vk))
    }

    pub fn recover_address(input: &[u8], signature: &[u8]) -> Result<[u8; 20], SignerError> {
        let vk = recover(input, signature)?;
        Ok(address_of(&vk))
    }

    fn signing_key(private_key: &[u8]) -> Result<SigningKey, SignerError> {
        SigningKey::from_slice(private_key).map_err(|err| {
            SignerError::CouldNotExtractPublicKey(format!("couldn't initialize secret key: {err}"))
        })
    }
}

impl Signer for PersonalSignSigner {
    fn sign(
        &self,
        input: &[u8],
        public_key: &[u8],
        private_key: &[u8],
    ) -> Result<Vec<u8>, SignerError> {
        let sk = Self::signing_key(private_key)?;
        let pk = VerifyingKey::from(&sk);

        if pk.to_encoded_point(true).as_bytes() != public_key {
            return Err(SignerError::CouldNotExtractKeyPair);
        }

        let digest = Self::message_digest(input);
        let (signature, recovery_id) = sk
            .sign_prehash_recoverable(&digest)
            .map_err(|err| SignerError::CouldNotSign(err.to_string()))?;

        let mut result = signature.to_bytes().to_vec();
        result.push(27 + recovery_id.to_byte());
        Ok(result)
    }

    fn verify(&self, input: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), SignerError> {
        let recovered = recover(input, signature)?;

        if recovered.to_encoded_point(true).as_bytes() != public_key {
            return Err(SignerError::InvalidSignature);
        }
        Ok(())
    }
}

fn recover(input: &[u8], signature: &[u8]) -> Result<VerifyingKey, SignerError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignerError::InvalidSignature);
    }

    let (rs, v) = signature.split_at(64);
    let v = if v[0] >= 27 { v[0] - 27 } else { v[0] };
    let recovery_id = RecoveryId::from_byte(v).ok_or(SignerError::InvalidSignature)?;
    let signature = Signature::from_slice(rs).map_err(|_| SignerError::InvalidSignature)?;

    VerifyingKey::recover_from_prehash(&PersonalSignSigner::message_digest(input), &signature, recovery_id)
        .map_err(|err| SignerError::CouldNotVerify(format!("couldn't recover: {err}")))
}

fn address_of(vk: &VerifyingKey) -> [u8; 20] {
    let point = vk.to_encoded_point(false);
    let hash = Keccak256Hasher::digest(&point.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
