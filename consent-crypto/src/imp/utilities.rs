use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub fn generate_random_seed_32() -> [u8; 32] {
    let mut rng = ChaCha20Rng::from_entropy();
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    seed
}

/// `0x` followed by the lowercase hex of 32 random bytes.
pub fn generate_random_hex_32() -> String {
    format!("0x{}", hex::encode(generate_random_seed_32()))
}
