//! **Consent Vault Core** manages patient consents authorized by a wallet
//! signature.
//!
//! A consent is created when the holder signs a canonical statement naming the
//! patient and the purpose. The signed record is submitted to the records
//! platform, starts out `pending`, may be activated once and may be revoked.
//! Activation attaches a transaction hash anchoring the consent.
//!
//! ## Repository structure
//!
//! * **Crypto**: keccak-256 hashing and secp256k1 personal-message signatures
//! * **Providers**
//!   * Consent store (REST client and in-memory store)
//!   * Wallet signer
//!   * Transaction anchor
//! * **Core**
//!   * [Consent service][cs]: the lifecycle controller
//!   * Canonical consent message and display projection
//!
//! ## Getting started
//!
//! ```ignore rust
//! let wallet = Arc::new(LocalWallet::generate(Arc::new(CryptoProviderImpl::default()))?);
//! let core = ConsentVaultCore::new(None, Arc::new(ReqwestClient::default()), wallet.clone())?;
//!
//! core.consent_service
//!     .create_consent("patient-001", "Research Study Participation", wallet.identity().as_ref())
//!     .await?;
//! ```
//!
//! See `demos/consent_example` for a complete walk through the lifecycle.
//!
//! [cs]: service::consent_service::ConsentService

use std::error::Error;
use std::sync::Arc;

use config::{AnchorMode, CoreConfig};
use consent_providers::{
    anchor::{
        imp::{delegated::DelegatedAnchor, placeholder::PlaceholderAnchor},
        TransactionAnchor,
    },
    consent_store::imp::http::HttpConsentStore,
    http_client::HttpClient,
    wallet::WalletSigner,
};
use service::consent_service::ConsentService;

pub mod config;
pub mod message;
pub mod model;
pub mod projection;
pub mod service;

pub struct ConsentVaultCore {
    pub consent_service: ConsentService,
}

impl ConsentVaultCore {
    pub fn new(
        config: Option<CoreConfig>,
        client: Arc<dyn HttpClient>,
        wallet: Arc<dyn WalletSigner>,
    ) -> Result<Self, Box<dyn Error>> {
        let config = config.unwrap_or_default();

        let store = Arc::new(HttpConsentStore::new(
            &config.store_config.base_url,
            client,
        )?);

        let anchor: Arc<dyn TransactionAnchor> = match config.anchor_config.mode {
            AnchorMode::Placeholder => Arc::new(PlaceholderAnchor),
            AnchorMode::Delegated => Arc::new(DelegatedAnchor),
        };

        Ok(Self {
            consent_service: ConsentService::new(store, wallet, anchor),
        })
    }
}
