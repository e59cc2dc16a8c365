use thiserror::Error;

use consent_crypto::SignerError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("No wallet connected")]
    NotConnected,
    #[error("Signature request declined")]
    Declined,
    #[error("Signer error: `{0}`")]
    SignerError(#[from] SignerError),
    #[error("Wallet unavailable: `{0}`")]
    Unavailable(String),
}
