use consent_providers::{
    anchor::AnchorError,
    common_models::{
        consent::{ConsentId, ConsentStatus},
        wallet::WalletAddress,
    },
    consent_store::error::ConsentStoreError,
    wallet::error::WalletError,
};
use thiserror::Error;

use crate::model::Operation;

#[derive(Debug, Error)]
pub enum ConsentServiceError {
    #[error("Validation error during {operation}: {reason}")]
    Validation {
        operation: Operation,
        reason: ValidationError,
    },
    #[error("Invalid transition from `{from}` to `{to}`")]
    InvalidTransition {
        from: ConsentStatus,
        to: ConsentStatus,
    },
    #[error("Signing declined or failed: `{0}`")]
    SigningDeclinedOrFailed(#[source] WalletError),
    #[error("Store request failed during {operation}: `{source}`")]
    StoreRequestFailed {
        operation: Operation,
        #[source]
        source: ConsentStoreError,
    },
    #[error("Anchoring failed: `{0}`")]
    AnchoringFailed(#[from] AnchorError),
}

impl ConsentServiceError {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Validation { operation, .. } => *operation,
            Self::InvalidTransition { .. } => Operation::Transition,
            Self::SigningDeclinedOrFailed(_) => Operation::Signing,
            Self::StoreRequestFailed { operation, .. } => *operation,
            Self::AnchoringFailed(_) => Operation::Transition,
        }
    }

    /// True when the request was rejected before the wallet or the store was contacted.
    pub fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvalidTransition { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing wallet identity")]
    MissingIdentity,
    #[error("identity `{supplied}` is not the connected wallet `{connected}`")]
    IdentityMismatch {
        supplied: WalletAddress,
        connected: WalletAddress,
    },
    #[error("patient id is empty")]
    EmptyPatientId,
    #[error("purpose is empty")]
    EmptyPurpose,
    #[error("unknown purpose `{0}`")]
    UnknownPurpose(String),
    #[error("`{0}` is not a transition target")]
    InvalidTargetStatus(ConsentStatus),
    #[error("consent `{0}` was never loaded")]
    UnknownConsent(ConsentId),
}
