//! Remote persistence of consent records.
//!
//! The store is the single source of truth: it assigns ids, creation time and
//! the initial `pending` status. Response shape differences between backends
//! are normalized inside each implementation.

use crate::common_models::consent::{
    Consent, ConsentId, CreateConsentRequest, GetConsentListQuery, UpdateConsentRequest,
};

pub mod error;
pub mod imp;

use error::ConsentStoreError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait ConsentStore: Send + Sync {
    /// Consents matching `query`, in the order returned by the backend.
    async fn get_consents(
        &self,
        query: GetConsentListQuery,
    ) -> Result<Vec<Consent>, ConsentStoreError>;

    async fn create_consent(
        &self,
        request: CreateConsentRequest,
    ) -> Result<Consent, ConsentStoreError>;

    async fn update_consent(
        &self,
        id: &ConsentId,
        request: UpdateConsentRequest,
    ) -> Result<Consent, ConsentStoreError>;
}
