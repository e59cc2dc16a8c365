use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::common_models::consent::ConsentStatus;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentDTO {
    #[serde(alias = "_id")]
    pub id: String,
    pub patient_id: String,
    pub purpose: String,
    pub wallet_address: String,
    pub signature: String,
    pub message: String,
    pub status: ConsentStatus,
    #[serde(default)]
    pub blockchain_tx_hash: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// List shapes seen from consent backends.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ConsentListResponseDTO {
    Consents { consents: Vec<ConsentDTO> },
    Data { data: Vec<ConsentDTO> },
    Bare(Vec<ConsentDTO>),
}

/// Single-record shapes seen from consent backends.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ConsentResponseDTO {
    Data { data: ConsentDTO },
    Consent { consent: ConsentDTO },
    Bare(ConsentDTO),
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentListQueryDTO {
    pub patient_id: Option<String>,
    pub status: Option<ConsentStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsentRequestDTO {
    pub patient_id: String,
    pub purpose: String,
    pub wallet_address: String,
    pub signature: String,
    pub message: String,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsentRequestDTO {
    pub status: ConsentStatus,
    pub blockchain_tx_hash: Option<String>,
}
