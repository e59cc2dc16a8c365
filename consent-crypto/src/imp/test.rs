use super::{
    hasher::keccak256::{Keccak256Hasher, KECCAK_256},
    signer::personal_sign::{PersonalSignSigner, PERSONAL_SIGN},
    utilities::generate_random_hex_32,
    CryptoProviderImpl,
};
use crate::{CryptoProvider, CryptoProviderError, Hasher, Signer, SignerError};

fn decode(value: &str) -> Vec<u8> {
    hex::decode(value).unwrap()
}

const PRIVATE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
const ADDRESS: &str = "2c7536e3605d9c16a7a3d7b1898e529396a65c23";

#[test]
fn test_keccak256_empty_input() {
    let result = Keccak256Hasher {}.hash_hex(b"").unwrap();

    assert_eq!(
        result,
        "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
    );
}

#[test]
fn test_address_from_known_key() {
    let public_key = PersonalSignSigner::public_key(&decode(PRIVATE_KEY)).unwrap();

    let address = PersonalSignSigner::address(&public_key).unwrap();

    assert_eq!(hex::encode(address), ADDRESS);
}

#[test]
fn test_sign_and_recover_address() {
    let private_key = decode(PRIVATE_KEY);
    let public_key = PersonalSignSigner::public_key(&private_key).unwrap();
    let message = b"I consent to: Research Study Participation for patient: patient-001";

    let signature = PersonalSignSigner {}
        .sign(message, &public_key, &private_key)
        .unwrap();

    assert_eq!(signature.len(), 65);
    assert!(signature[64] == 27 || signature[64] == 28);
    assert_eq!(
        hex::encode(PersonalSignSigner::recover_address(message, &signature).unwrap()),
        ADDRESS
    );
    assert!(PersonalSignSigner {}
        .verify(message, &signature, &public_key)
        .is_ok());
}

#[test]
fn test_verify_rejects_other_message() {
    let (private_key, public_key) = PersonalSignSigner::random();
    let signature = PersonalSignSigner {}
        .sign(b"original", &public_key, &private_key)
        .unwrap();

    let result = PersonalSignSigner {}.verify(b"tampered", &signature, &public_key);

    assert!(result.is_err());
}

#[test]
fn test_sign_with_mismatched_public_key() {
    let (private_key, _) = PersonalSignSigner::random();
    let (_, other_public_key) = PersonalSignSigner::random();

    let result = PersonalSignSigner {}.sign(b"data", &other_public_key, &private_key);

    assert_eq!(result, Err(SignerError::CouldNotExtractKeyPair));
}

#[test]
fn test_recover_rejects_truncated_signature() {
    let result = PersonalSignSigner::recover_address(b"data", &[0u8; 64]);

    assert_eq!(result, Err(SignerError::InvalidSignature));
}

#[test]
fn test_random_hex_32() {
    let result = generate_random_hex_32();

    assert_eq!(result.len(), 66);
    assert!(result.starts_with("0x"));
    assert!(result[2..].chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(result, generate_random_hex_32());
}

#[test]
fn test_provider_lookup() {
    let provider = CryptoProviderImpl::default();

    assert!(provider.get_hasher(KECCAK_256).is_ok());
    assert!(provider.get_signer(PERSONAL_SIGN).is_ok());
    assert_eq!(
        provider.get_signer("ES256").err(),
        Some(CryptoProviderError::MissingSigner("ES256".to_string()))
    );
}
