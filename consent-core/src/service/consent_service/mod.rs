//! Consent lifecycle controller.
//!
//! [`ConsentService`] is the only place consents are created or transitioned.
//! It owns the consent set last loaded from the store together with the
//! active filter and progress flags. Every mutation ends with a reload, so the
//! visible set always mirrors the store rather than a locally patched copy.
//!
//! Loads may race each other and mutation workflows; whichever load completes
//! last defines the visible set and the active filter. Creation and transition
//! workflows run one at a time per service: a pending signature request holds
//! back the next action.
//!
//! Transitions are checked against the latest status the service has seen for
//! a consent, including consents the active filter hides. Statuses only move
//! forward along the state machine, so a late stale load cannot reopen a
//! revoked consent.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use consent_providers::{
    anchor::{AnchorKind, TransactionAnchor},
    common_models::{
        consent::{
            Consent, ConsentId, ConsentPurpose, ConsentStatus, CreateConsentRequest,
            GetConsentListQuery, TxHash, UpdateConsentRequest,
        },
        wallet::WalletAddress,
    },
    consent_store::ConsentStore,
    wallet::WalletSigner,
};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use super::error::{ConsentServiceError, ValidationError};
use crate::{
    message::canonical_message,
    model::{Operation, StatusFilter},
    projection::{consent_views, project, ConsentView},
};


/// Snapshot of the controller state for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsentState {
    pub consents: Vec<Consent>,
    pub filter: StatusFilter,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct ControllerState {
    consents: Vec<Consent>,
    filter: StatusFilter,
    loads_in_flight: usize,
    submitting: bool,
    error: Option<String>,
    /// Latest record seen per consent, regardless of the filter it was loaded with.
    known: HashMap<ConsentId, Consent>,
    /// Hashes produced by a placeholder anchor for activations that reached the store.
    placeholder_hashes: HashSet<TxHash>,
}

impl ControllerState {
    fn remember(&mut self, consent: &Consent) {
        if let Some(known) = self.known.get(&consent.id) {
            if consent.status.can_transition_to(known.status) {
                return;
            }
        }
        self.known.insert(consent.id.to_owned(), consent.to_owned());
    }
}

pub struct ConsentService {
    store: Arc<dyn ConsentStore>,
    wallet: Arc<dyn WalletSigner>,
    anchor: Arc<dyn TransactionAnchor>,
    state: RwLock<ControllerState>,
    actions: Mutex<()>,
}

impl ConsentService {
    pub fn new(
        store: Arc<dyn ConsentStore>,
        wallet: Arc<dyn WalletSigner>,
        anchor: Arc<dyn TransactionAnchor>,
    ) -> Self {
        Self {
            store,
            wallet,
            anchor,
            state: RwLock::new(ControllerState::default()),
            actions: Mutex::new(()),
        }
    }

    pub fn state(&self) -> ConsentState {
        let state = self.state.read();
        ConsentState {
            consents: state.consents.to_owned(),
            filter: state.filter,
            loading: state.loads_in_flight > 0,
            submitting: state.submitting,
            error: state.error.to_owned(),
        }
    }

    pub fn filter(&self) -> StatusFilter {
        self.state.read().filter
    }

    /// The loaded set restricted to the active filter.
    pub fn visible_consents(&self) -> Vec<Consent> {
        let state = self.state.read();
        project(&state.consents, state.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn consent_views(&self) -> Vec<ConsentView> {
        let state = self.state.read();
        consent_views(&state.consents, state.filter, &state.placeholder_hashes)
    }

    /// True when `tx_hash` was generated locally and never confirmed on chain.
    pub fn is_placeholder_hash(&self, tx_hash: &TxHash) -> bool {
        self.state.read().placeholder_hashes.contains(tx_hash)
    }

    /// Switches the active filter. Same as [`Self::load_consents`].
    pub async fn set_filter(&self, filter: StatusFilter) -> Result<Vec<Consent>, ConsentServiceError> {
        self.load_consents(filter).await
    }

    /// Drops the loaded set without contacting the store, e.g. after the wallet disconnected.
    ///
    /// Known statuses and placeholder marks are kept.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.consents.clear();
        state.error = None;
    }

    /// Replaces the loaded set with the store's consents matching `filter` and
    /// makes `filter` the active filter.
    ///
    /// On failure the previous set and filter stay in place.
    pub async fn load_consents(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<Consent>, ConsentServiceError> {
        self.state.write().loads_in_flight += 1;

        tracing::debug!(%filter, "loading consents");
        let result = self
            .store
            .get_consents(GetConsentListQuery {
                patient_id: None,
                status: filter.status(),
            })
            .await;

        let mut state = self.state.write();
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);

        match result {
            Ok(consents) => {
                tracing::debug!(%filter, count = consents.len(), "consents loaded");
                for consent in &consents {
                    state.remember(consent);
                }
                state.consents = consents.to_owned();
                state.filter = filter;
                state.error = None;
                Ok(consents)
            }
            Err(source) => {
                let error = ConsentServiceError::StoreRequestFailed {
                    operation: Operation::Load,
                    source,
                };
                tracing::warn!(%filter, %error, "loading consents failed");
                state.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Signs the canonical consent message with the wallet and submits the consent.
    ///
    /// The returned consent is the store's record. Whenever the store was
    /// contacted the set is reloaded with the active filter, whether the
    /// creation succeeded or not.
    pub async fn create_consent(
        &self,
        patient_id: &str,
        purpose: &str,
        identity: Option<&WalletAddress>,
    ) -> Result<Consent, ConsentServiceError> {
        let identity = self
            .validate_creation(patient_id, purpose, identity)
            .inspect_err(|error| self.record_error(error))?;

        let _action = self.actions.lock().await;
        let _submitting = Submitting::start(&self.state);

        let message = canonical_message(patient_id, purpose);
        let signature = self.wallet.sign_message(&message).await.map_err(|err| {
            let error = ConsentServiceError::SigningDeclinedOrFailed(err);
            tracing::info!(%error, "consent not signed");
            self.record_error(&error);
            error
        })?;

        let created = self
            .store
            .create_consent(CreateConsentRequest {
                patient_id: patient_id.to_owned(),
                purpose: purpose.to_owned(),
                wallet_address: identity.to_owned(),
                signature,
                message,
            })
            .await;

        self.reload().await;

        match created {
            Ok(consent) => {
                tracing::info!(id = %consent.id, "consent created");
                self.state.write().remember(&consent);
                Ok(consent)
            }
            Err(source) => {
                let error = ConsentServiceError::StoreRequestFailed {
                    operation: Operation::Creation,
                    source,
                };
                tracing::warn!(%error, "consent creation failed");
                self.record_error(&error);
                Err(error)
            }
        }
    }

    /// Moves a consent the service has seen to `target` and reloads the set.
    ///
    /// Activation attaches the transaction hash produced by the configured
    /// anchor, if any. Placeholder hashes are reported by
    /// [`Self::is_placeholder_hash`] and flagged on [`ConsentView`].
    pub async fn transition_status(
        &self,
        consent_id: &ConsentId,
        target: ConsentStatus,
    ) -> Result<(), ConsentServiceError> {
        if target == ConsentStatus::Pending {
            let error = ConsentServiceError::Validation {
                operation: Operation::Transition,
                reason: ValidationError::InvalidTargetStatus(target),
            };
            self.record_error(&error);
            return Err(error);
        }

        let _action = self.actions.lock().await;

        let consent = self
            .known_consent(consent_id, target)
            .inspect_err(|error| self.record_error(error))?;

        let _submitting = Submitting::start(&self.state);

        let receipt = if target == ConsentStatus::Active {
            self.anchor.anchor(&consent).await.map_err(|err| {
                let error = ConsentServiceError::from(err);
                self.record_error(&error);
                error
            })?
        } else {
            None
        };

        let placeholder = receipt
            .as_ref()
            .filter(|receipt| receipt.kind == AnchorKind::Placeholder)
            .map(|receipt| receipt.tx_hash.to_owned());
        if let Some(tx_hash) = &placeholder {
            tracing::warn!(
                id = %consent_id,
                %tx_hash,
                "activation carries a placeholder transaction hash"
            );
        }
        let blockchain_tx_hash = receipt.map(|receipt| receipt.tx_hash);

        let updated = self
            .store
            .update_consent(
                consent_id,
                UpdateConsentRequest {
                    status: target,
                    blockchain_tx_hash,
                },
            )
            .await;

        if let Ok(consent) = &updated {
            let mut state = self.state.write();
            state.remember(consent);
            state.placeholder_hashes.extend(placeholder);
        }

        self.reload().await;

        match updated {
            Ok(consent) => {
                tracing::info!(id = %consent.id, status = %consent.status, "consent status changed");
                Ok(())
            }
            Err(source) => {
                let error = ConsentServiceError::StoreRequestFailed {
                    operation: Operation::Transition,
                    source,
                };
                tracing::warn!(id = %consent_id, %error, "consent transition failed");
                self.record_error(&error);
                Err(error)
            }
        }
    }

    fn validate_creation<'a>(
        &self,
        patient_id: &str,
        purpose: &str,
        identity: Option<&'a WalletAddress>,
    ) -> Result<&'a WalletAddress, ConsentServiceError> {
        let invalid = |reason| ConsentServiceError::Validation {
            operation: Operation::Creation,
            reason,
        };

        let identity = identity.ok_or_else(|| invalid(ValidationError::MissingIdentity))?;
        if patient_id.trim().is_empty() {
            return Err(invalid(ValidationError::EmptyPatientId));
        }
        if purpose.trim().is_empty() {
            return Err(invalid(ValidationError::EmptyPurpose));
        }
        if purpose.parse::<ConsentPurpose>().is_err() {
            return Err(invalid(ValidationError::UnknownPurpose(purpose.to_owned())));
        }
        if let Some(connected) = self.wallet.identity() {
            if &connected != identity {
                return Err(invalid(ValidationError::IdentityMismatch {
                    supplied: identity.to_owned(),
                    connected,
                }));
            }
        }

        Ok(identity)
    }

    fn known_consent(
        &self,
        consent_id: &ConsentId,
        target: ConsentStatus,
    ) -> Result<Consent, ConsentServiceError> {
        let state = self.state.read();
        let consent =
            state
                .known
                .get(consent_id)
                .ok_or_else(|| ConsentServiceError::Validation {
                    operation: Operation::Transition,
                    reason: ValidationError::UnknownConsent(consent_id.to_owned()),
                })?;

        if consent.status.is_terminal() || !consent.status.can_transition_to(target) {
            return Err(ConsentServiceError::InvalidTransition {
                from: consent.status,
                to: target,
            });
        }

        Ok(consent.to_owned())
    }

    /// Terminal reload of a mutation workflow. A failure is kept in the state
    /// and does not undo the mutation.
    async fn reload(&self) {
        let filter = self.filter();
        if let Err(error) = self.load_consents(filter).await {
            tracing::warn!(%error, "reload after mutation failed");
        }
    }

    fn record_error(&self, error: &ConsentServiceError) {
        self.state.write().error = Some(error.to_string());
    }
}

/// Keeps the submitting flag raised while a mutation workflow runs.
struct Submitting<'a> {
    state: &'a RwLock<ControllerState>,
}

impl<'a> Submitting<'a> {
    fn start(state: &'a RwLock<ControllerState>) -> Self {
        state.write().submitting = true;
        Self { state }
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.state.write().submitting = false;
    }
}
