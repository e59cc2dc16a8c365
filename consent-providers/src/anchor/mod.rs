//! Blockchain anchoring of consent activations.
//!
//! No chain integration ships with this crate. [`imp::placeholder`] stands in
//! for one and marks everything it produces as a placeholder;
//! [`imp::delegated`] leaves the hash to the consent backend.

use thiserror::Error;

use crate::common_models::consent::{Consent, TxHash};

pub mod imp;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnchorKind {
    /// Hash of a transaction confirmed on chain.
    Confirmed,
    /// Locally generated stand-in, nothing was submitted on chain.
    Placeholder,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnchorReceipt {
    pub tx_hash: TxHash,
    pub kind: AnchorKind,
}

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("Anchoring failed: `{0}`")]
    Failed(String),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait TransactionAnchor: Send + Sync {
    /// Transaction hash to attach when `consent` is activated.
    ///
    /// `None` means the hash is supplied by the consent backend.
    async fn anchor(&self, consent: &Consent) -> Result<Option<AnchorReceipt>, AnchorError>;
}
