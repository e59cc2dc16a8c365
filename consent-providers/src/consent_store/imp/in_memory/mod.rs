//! Store-side consent semantics kept in process memory.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common_models::consent::{
        Consent, ConsentId, ConsentStatus, CreateConsentRequest, GetConsentListQuery,
        UpdateConsentRequest,
    },
    consent_store::{error::ConsentStoreError, ConsentStore},
};

#[cfg(test)]
mod test;

/// A request as received by [`InMemoryConsentStore`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordedRequest {
    GetConsents(GetConsentListQuery),
    CreateConsent(CreateConsentRequest),
    UpdateConsent(ConsentId, UpdateConsentRequest),
}

#[derive(Default)]
struct State {
    consents: Vec<Consent>,
    requests: Vec<RecordedRequest>,
}

#[derive(Default, Clone)]
pub struct InMemoryConsentStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryConsentStore {
    pub fn new(consents: Vec<Consent>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                consents,
                requests: vec![],
            })),
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.to_owned()
    }

    pub async fn consents(&self) -> Vec<Consent> {
        self.state.lock().await.consents.to_owned()
    }
}

#[async_trait]
impl ConsentStore for InMemoryConsentStore {
    async fn get_consents(
        &self,
        query: GetConsentListQuery,
    ) -> Result<Vec<Consent>, ConsentStoreError> {
        let mut state = self.state.lock().await;
        state
            .requests
            .push(RecordedRequest::GetConsents(query.to_owned()));

        Ok(state
            .consents
            .iter()
            .filter(|consent| {
                query
                    .patient_id
                    .as_ref()
                    .map_or(true, |patient_id| &consent.patient_id == patient_id)
            })
            .filter(|consent| query.status.map_or(true, |status| consent.status == status))
            .cloned()
            .collect())
    }

    async fn create_consent(
        &self,
        request: CreateConsentRequest,
    ) -> Result<Consent, ConsentStoreError> {
        let mut state = self.state.lock().await;
        state
            .requests
            .push(RecordedRequest::CreateConsent(request.to_owned()));

        let consent = Consent {
            id: ConsentId::from(Uuid::new_v4().to_string()),
            patient_id: request.patient_id,
            purpose: request.purpose,
            wallet_address: request.wallet_address,
            signature: request.signature,
            message: request.message,
            status: ConsentStatus::Pending,
            blockchain_tx_hash: None,
            created_at: OffsetDateTime::now_utc(),
        };
        state.consents.push(consent.to_owned());

        Ok(consent)
    }

    async fn update_consent(
        &self,
        id: &ConsentId,
        request: UpdateConsentRequest,
    ) -> Result<Consent, ConsentStoreError> {
        let mut state = self.state.lock().await;
        state.requests.push(RecordedRequest::UpdateConsent(
            id.to_owned(),
            request.to_owned(),
        ));

        let consent = state
            .consents
            .iter_mut()
            .find(|consent| &consent.id == id)
            .ok_or_else(|| ConsentStoreError::NotFound(id.to_owned()))?;

        if !consent.status.can_transition_to(request.status) {
            return Err(ConsentStoreError::Rejected {
                status: 409,
                message: format!(
                    "Cannot change consent status from {} to {}",
                    consent.status, request.status
                ),
            });
        }

        consent.status = request.status;
        if request.blockchain_tx_hash.is_some() {
            consent.blockchain_tx_hash = request.blockchain_tx_hash;
        }

        Ok(consent.to_owned())
    }
}
