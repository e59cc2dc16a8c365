//! Wallet backed by a secp256k1 key held in process memory.
//!
//! Signs with the personal-message scheme browser wallets use, so consents
//! produced here verify the same way as ones signed in an extension wallet.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use consent_crypto::{
    imp::signer::personal_sign::{PersonalSignSigner, PERSONAL_SIGN},
    CryptoProvider, SignerError,
};
use zeroize::Zeroizing;

use crate::{
    common_models::wallet::WalletAddress,
    wallet::{error::WalletError, WalletSigner},
};


pub struct LocalWallet {
    crypto: Arc<dyn CryptoProvider>,
    address: WalletAddress,
    public_key: Vec<u8>,
    private_key: Zeroizing<Vec<u8>>,
    connected: AtomicBool,
    declining: AtomicBool,
}

impl LocalWallet {
    pub fn new(
        crypto: Arc<dyn CryptoProvider>,
        private_key: Zeroizing<Vec<u8>>,
    ) -> Result<Self, WalletError> {
        let public_key = PersonalSignSigner::public_key(&private_key)?;
        let address = WalletAddress::from_bytes(PersonalSignSigner::address(&public_key)?);

        Ok(Self {
            crypto,
            address,
            public_key,
            private_key,
            connected: AtomicBool::new(true),
            declining: AtomicBool::new(false),
        })
    }

    pub fn generate(crypto: Arc<dyn CryptoProvider>) -> Result<Self, WalletError> {
        let (private_key, _) = PersonalSignSigner::random();
        Self::new(crypto, Zeroizing::new(private_key))
    }

    pub fn address(&self) -> &WalletAddress {
        &self.address
    }

    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Emulates the holder rejecting every signature prompt.
    pub fn set_declining(&self, declining: bool) {
        self.declining.store(declining, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletSigner for LocalWallet {
    fn identity(&self) -> Option<WalletAddress> {
        self.connected
            .load(Ordering::SeqCst)
            .then(|| self.address.to_owned())
    }

    async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(WalletError::NotConnected);
        }
        if self.declining.load(Ordering::SeqCst) {
            tracing::debug!(address = %self.address, "signature request declined");
            return Err(WalletError::Declined);
        }

        let signer = self
            .crypto
            .get_signer(PERSONAL_SIGN)
            .map_err(SignerError::from)?;
        let signature = signer.sign(message.as_bytes(), &self.public_key, &self.private_key)?;

        Ok(format!("0x{}", hex::encode(signature)))
    }
}
