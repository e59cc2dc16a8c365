use async_trait::async_trait;

use crate::{
    anchor::{AnchorError, AnchorReceipt, TransactionAnchor},
    common_models::consent::Consent,
};

/// The backend anchors activations itself and reports the hash on the record.
pub struct DelegatedAnchor;

#[async_trait]
impl TransactionAnchor for DelegatedAnchor {
    async fn anchor(&self, consent: &Consent) -> Result<Option<AnchorReceipt>, AnchorError> {
        tracing::debug!(id = %consent.id, "anchoring delegated to consent backend");
        Ok(None)
    }
}
