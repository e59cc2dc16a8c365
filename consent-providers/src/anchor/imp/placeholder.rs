use async_trait::async_trait;
use consent_crypto::imp::utilities::generate_random_hex_32;

use crate::{
    anchor::{AnchorError, AnchorKind, AnchorReceipt, TransactionAnchor},
    common_models::consent::{Consent, TxHash},
};

/// Random 32-byte hash in transaction-hash format. Nothing is submitted on chain.
pub struct PlaceholderAnchor;

#[async_trait]
impl TransactionAnchor for PlaceholderAnchor {
    async fn anchor(&self, consent: &Consent) -> Result<Option<AnchorReceipt>, AnchorError> {
        let tx_hash = TxHash::from(generate_random_hex_32());
        tracing::warn!(
            id = %consent.id,
            %tx_hash,
            "attaching placeholder transaction hash, consent is not anchored on chain"
        );

        Ok(Some(AnchorReceipt {
            tx_hash,
            kind: AnchorKind::Placeholder,
        }))
    }
}
