//! Consent store backed by the records platform REST API.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::{
    common_models::consent::{
        Consent, ConsentId, CreateConsentRequest, GetConsentListQuery, UpdateConsentRequest,
    },
    consent_store::{error::ConsentStoreError, ConsentStore},
    http_client::HttpClient,
};

use self::dto::{
    ConsentListQueryDTO, ConsentListResponseDTO, ConsentResponseDTO, CreateConsentRequestDTO,
    UpdateConsentRequestDTO,
};

pub mod dto;
pub mod mapper;

#[cfg(test)]
mod test;

const CONSENTS_PATH: &str = "consents";

pub struct HttpConsentStore {
    base_url: Url,
    client: Arc<dyn HttpClient>,
}

impl HttpConsentStore {
    pub fn new(base_url: &str, client: Arc<dyn HttpClient>) -> Result<Self, ConsentStoreError> {
        // `Url::join` drops the last segment unless the base ends with a slash
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        Ok(Self { base_url, client })
    }

    fn consents_url(&self) -> Result<Url, ConsentStoreError> {
        Ok(self.base_url.join(CONSENTS_PATH)?)
    }

    fn consent_url(&self, id: &ConsentId) -> Result<Url, ConsentStoreError> {
        let mut url = self.consents_url()?;
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|_| ConsentStoreError::Transport(format!("Cannot-be-a-base url `{base}`")))?
            .push(id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ConsentStore for HttpConsentStore {
    async fn get_consents(
        &self,
        query: GetConsentListQuery,
    ) -> Result<Vec<Consent>, ConsentStoreError> {
        let url = self.consents_url()?;

        let response: ConsentListResponseDTO = self
            .client
            .get(url.as_str())
            .query(ConsentListQueryDTO::from(query))?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        let consents = response.into_consents()?;
        tracing::debug!(count = consents.len(), "fetched consents");
        Ok(consents)
    }

    async fn create_consent(
        &self,
        request: CreateConsentRequest,
    ) -> Result<Consent, ConsentStoreError> {
        let url = self.consents_url()?;

        let response: ConsentResponseDTO = self
            .client
            .post(url.as_str())
            .json(CreateConsentRequestDTO::from(request))?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        let consent = response.into_consent()?;
        tracing::info!(id = %consent.id, "consent created");
        Ok(consent)
    }

    async fn update_consent(
        &self,
        id: &ConsentId,
        request: UpdateConsentRequest,
    ) -> Result<Consent, ConsentStoreError> {
        let url = self.consent_url(id)?;

        let response = self
            .client
            .patch(url.as_str())
            .json(UpdateConsentRequestDTO::from(request))?
            .send()
            .await?;

        if response.status.0 == 404 {
            return Err(ConsentStoreError::NotFound(id.to_owned()));
        }

        let consent = response
            .error_for_status()?
            .json::<ConsentResponseDTO>()?
            .into_consent()?;
        tracing::info!(id = %consent.id, status = %consent.status, "consent updated");
        Ok(consent)
    }
}
