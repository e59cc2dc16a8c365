//! Wallet identities able to sign consent messages.

use crate::common_models::wallet::WalletAddress;

pub mod error;
pub mod imp;

use error::WalletError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait WalletSigner: Send + Sync {
    /// The connected account, `None` while no wallet is connected.
    fn identity(&self) -> Option<WalletAddress>;

    /// Signs `message` as text with the connected account.
    ///
    /// Returns the hex encoded signature. Fails when no account is connected
    /// or the holder declines the request.
    async fn sign_message(&self, message: &str) -> Result<String, WalletError>;
}
