use consent_providers::common_models::consent::ConsentStatus;
use strum_macros::{Display, EnumString};

/// Status restriction applied when listing consents.
#[derive(Debug, Default, Copy, Clone, Display, EnumString, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Active,
    Revoked,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Active,
        StatusFilter::Revoked,
    ];

    /// The status sent to the store, `None` for [`StatusFilter::All`].
    pub fn status(&self) -> Option<ConsentStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(ConsentStatus::Pending),
            StatusFilter::Active => Some(ConsentStatus::Active),
            StatusFilter::Revoked => Some(ConsentStatus::Revoked),
        }
    }

    pub fn matches(&self, status: ConsentStatus) -> bool {
        self.status().map_or(true, |expected| expected == status)
    }
}

/// Operation an error originated from.
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Signing,
    Creation,
    Transition,
    Load,
}
