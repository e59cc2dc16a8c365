use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::{
    macros::{impl_as_str, impl_display, impl_from},
    wallet::WalletAddress,
};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentId(String);
impl_display!(ConsentId);
impl_from!(ConsentId; String);
impl_as_str!(ConsentId);

impl From<&str> for ConsentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Opaque blockchain transaction identifier attached on activation.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);
impl_display!(TxHash);
impl_from!(TxHash; String);
impl_as_str!(TxHash);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Consent {
    pub id: ConsentId,
    pub patient_id: String,
    pub purpose: String,
    pub wallet_address: WalletAddress,
    pub signature: String,
    pub message: String,
    pub status: ConsentStatus,
    pub blockchain_tx_hash: Option<TxHash>,
    pub created_at: OffsetDateTime,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConsentStatus {
    Pending,
    Active,
    Revoked,
}

impl ConsentStatus {
    /// Statuses reachable from `self` in a single transition.
    pub fn allowed_transitions(&self) -> &'static [ConsentStatus] {
        match self {
            ConsentStatus::Pending => &[ConsentStatus::Active, ConsentStatus::Revoked],
            ConsentStatus::Active => &[ConsentStatus::Revoked],
            ConsentStatus::Revoked => &[],
        }
    }

    pub fn can_transition_to(&self, target: ConsentStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

/// The closed set of purposes a patient can consent to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString)]
pub enum ConsentPurpose {
    #[strum(serialize = "Research Study Participation")]
    ResearchStudyParticipation,
    #[strum(serialize = "Data Sharing with Research Institution")]
    DataSharingWithResearchInstitution,
    #[strum(serialize = "Third-Party Analytics Access")]
    ThirdPartyAnalyticsAccess,
    #[strum(serialize = "Insurance Provider Access")]
    InsuranceProviderAccess,
}

impl ConsentPurpose {
    pub const ALL: [ConsentPurpose; 4] = [
        ConsentPurpose::ResearchStudyParticipation,
        ConsentPurpose::DataSharingWithResearchInstitution,
        ConsentPurpose::ThirdPartyAnalyticsAccess,
        ConsentPurpose::InsuranceProviderAccess,
    ];
}

/// Creation payload. Everything else is assigned by the store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreateConsentRequest {
    pub patient_id: String,
    pub purpose: String,
    pub wallet_address: WalletAddress,
    pub signature: String,
    pub message: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateConsentRequest {
    pub status: ConsentStatus,
    pub blockchain_tx_hash: Option<TxHash>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GetConsentListQuery {
    pub patient_id: Option<String>,
    pub status: Option<ConsentStatus>,
}

#[cfg(test)]
mod test {
    use super::ConsentStatus;

    #[test]
    fn test_state_machine() {
        use ConsentStatus::*;

        assert!(Pending.can_transition_to(Active));
        assert!(Pending.can_transition_to(Revoked));
        assert!(Active.can_transition_to(Revoked));
        assert!(!Active.can_transition_to(Pending));
        assert!(!Active.can_transition_to(Active));
        assert!(!Revoked.can_transition_to(Active));
        assert!(!Revoked.can_transition_to(Pending));

        assert!(Revoked.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Active.is_terminal());
    }
}
