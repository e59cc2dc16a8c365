use super::dto::{
    ConsentDTO, ConsentListQueryDTO, ConsentListResponseDTO, ConsentResponseDTO,
    CreateConsentRequestDTO, UpdateConsentRequestDTO,
};
use crate::{
    common_models::consent::{
        Consent, ConsentStatus, CreateConsentRequest, GetConsentListQuery, TxHash,
        UpdateConsentRequest,
    },
    consent_store::error::ConsentStoreError,
};

impl TryFrom<ConsentDTO> for Consent {
    type Error = ConsentStoreError;

    fn try_from(value: ConsentDTO) -> Result<Self, Self::Error> {
        let wallet_address =
            value
                .wallet_address
                .parse()
                .map_err(|err| ConsentStoreError::InvalidRecord {
                    id: value.id.to_owned(),
                    reason: format!("{err}"),
                })?;

        let blockchain_tx_hash = value
            .blockchain_tx_hash
            .filter(|hash| !hash.is_empty())
            .map(TxHash::from);

        if value.status == ConsentStatus::Pending && blockchain_tx_hash.is_some() {
            return Err(ConsentStoreError::InvalidRecord {
                id: value.id,
                reason: "pending consent carries a transaction hash".to_string(),
            });
        }

        Ok(Self {
            id: value.id.into(),
            patient_id: value.patient_id,
            purpose: value.purpose,
            wallet_address,
            signature: value.signature,
            message: value.message,
            status: value.status,
            blockchain_tx_hash,
            created_at: value.created_at,
        })
    }
}

impl ConsentListResponseDTO {
    pub fn into_consents(self) -> Result<Vec<Consent>, ConsentStoreError> {
        let consents = match self {
            Self::Consents { consents } => consents,
            Self::Data { data } => data,
            Self::Bare(consents) => consents,
        };

        consents.into_iter().map(Consent::try_from).collect()
    }
}

impl ConsentResponseDTO {
    pub fn into_consent(self) -> Result<Consent, ConsentStoreError> {
        match self {
            Self::Data { data } => data,
            Self::Consent { consent } => consent,
            Self::Bare(consent) => consent,
        }
        .try_into()
    }
}

impl From<GetConsentListQuery> for ConsentListQueryDTO {
    fn from(value: GetConsentListQuery) -> Self {
        Self {
            patient_id: value.patient_id,
            status: value.status,
        }
    }
}

impl From<CreateConsentRequest> for CreateConsentRequestDTO {
    fn from(value: CreateConsentRequest) -> Self {
        Self {
            patient_id: value.patient_id,
            purpose: value.purpose,
            wallet_address: value.wallet_address.into(),
            signature: value.signature,
            message: value.message,
        }
    }
}

impl From<UpdateConsentRequest> for UpdateConsentRequestDTO {
    fn from(value: UpdateConsentRequest) -> Self {
        Self {
            status: value.status,
            blockchain_tx_hash: value.blockchain_tx_hash.map(|hash| hash.as_str().to_owned()),
        }
    }
}
