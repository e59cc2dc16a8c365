//! Derivation of what to display from a consent set and a status filter.
//!
//! Everything here is pure: no store access, no controller state.

use std::collections::HashSet;

use consent_providers::common_models::{
    consent::{Consent, ConsentId, ConsentStatus, TxHash},
    wallet::WalletAddress,
};
use time::{format_description::BorrowedFormatItem, macros::format_description, UtcOffset};

use crate::model::StatusFilter;

const CREATED_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year], [hour repr:12]:[minute] [period]"
);

/// Consents passing `filter`, in their original order.
pub fn project(consents: &[Consent], filter: StatusFilter) -> Vec<&Consent> {
    consents
        .iter()
        .filter(|consent| filter.matches(consent.status))
        .collect()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsentAction {
    Activate,
    Revoke,
}

impl ConsentAction {
    pub fn target(&self) -> ConsentStatus {
        match self {
            ConsentAction::Activate => ConsentStatus::Active,
            ConsentAction::Revoke => ConsentStatus::Revoked,
        }
    }

    fn for_target(status: ConsentStatus) -> Option<Self> {
        match status {
            ConsentStatus::Active => Some(ConsentAction::Activate),
            ConsentStatus::Revoked => Some(ConsentAction::Revoke),
            ConsentStatus::Pending => None,
        }
    }
}

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentView {
    pub id: ConsentId,
    pub purpose: String,
    pub status: ConsentStatus,
    pub patient_id: String,
    pub wallet_address: WalletAddress,
    /// Creation time in UTC, e.g. `Oct 18, 2026, 02:15 PM`.
    pub created: String,
    pub tx_hash: Option<TxHash>,
    /// `tx_hash` was generated locally and is not an on-chain transaction.
    pub tx_hash_placeholder: bool,
    pub actions: Vec<ConsentAction>,
}

impl ConsentView {
    /// Row for `consent`, flagging its hash when it is one of `placeholder_hashes`.
    pub fn new(consent: &Consent, placeholder_hashes: &HashSet<TxHash>) -> Self {
        let created_at = consent.created_at.to_offset(UtcOffset::UTC);

        Self {
            id: consent.id.to_owned(),
            purpose: consent.purpose.to_owned(),
            status: consent.status,
            patient_id: consent.patient_id.to_owned(),
            wallet_address: consent.wallet_address.to_owned(),
            created: created_at
                .format(CREATED_FORMAT)
                .unwrap_or_else(|_| created_at.to_string()),
            tx_hash: consent.blockchain_tx_hash.to_owned(),
            tx_hash_placeholder: consent
                .blockchain_tx_hash
                .as_ref()
                .is_some_and(|hash| placeholder_hashes.contains(hash)),
            actions: consent
                .status
                .allowed_transitions()
                .iter()
                .filter_map(|status| ConsentAction::for_target(*status))
                .collect(),
        }
    }
}

pub fn consent_views(
    consents: &[Consent],
    filter: StatusFilter,
    placeholder_hashes: &HashSet<TxHash>,
) -> Vec<ConsentView> {
    project(consents, filter)
        .into_iter()
        .map(|consent| ConsentView::new(consent, placeholder_hashes))
        .collect()
}
