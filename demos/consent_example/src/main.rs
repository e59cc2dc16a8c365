use std::error::Error;
use std::sync::Arc;

use consent_core::{
    config::{CoreConfig, StoreConfig},
    model::StatusFilter,
    projection::ConsentView,
    service::consent_service::ConsentService,
    ConsentVaultCore,
};
use consent_crypto::imp::CryptoProviderImpl;
use consent_providers::{
    anchor::imp::placeholder::PlaceholderAnchor,
    common_models::consent::{ConsentPurpose, ConsentStatus},
    consent_store::imp::in_memory::InMemoryConsentStore,
    http_client::imp::reqwest_client::ReqwestClient,
    wallet::{imp::local::LocalWallet, WalletSigner},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Walks a consent through creation, activation and revocation.
///
/// Runs against an in-memory store unless `CONSENT_API_URL` points to a
/// records platform API, e.g. `http://localhost:3001/api`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let wallet = Arc::new(LocalWallet::generate(Arc::new(CryptoProviderImpl::default()))?);
    let identity = wallet.identity();

    let service = match std::env::var("CONSENT_API_URL") {
        Ok(base_url) => {
            let config = CoreConfig {
                store_config: StoreConfig { base_url },
                ..Default::default()
            };
            ConsentVaultCore::new(Some(config), Arc::new(ReqwestClient::default()), wallet)?
                .consent_service
        }
        Err(_) => ConsentService::new(
            Arc::new(InMemoryConsentStore::default()),
            wallet,
            Arc::new(PlaceholderAnchor),
        ),
    };

    let purpose = ConsentPurpose::ResearchStudyParticipation.to_string();
    let created = service
        .create_consent("patient-001", &purpose, identity.as_ref())
        .await?;
    print_views("created", &service);

    service
        .transition_status(&created.id, ConsentStatus::Active)
        .await?;
    print_views("activated", &service);

    service
        .transition_status(&created.id, ConsentStatus::Revoked)
        .await?;
    service.set_filter(StatusFilter::Revoked).await?;
    print_views("revoked", &service);

    match service
        .transition_status(&created.id, ConsentStatus::Active)
        .await
    {
        Ok(()) => println!("Revoked consent was reactivated"),
        Err(error) => println!("Reactivation rejected: {error}"),
    }

    Ok(())
}

fn print_views(label: &str, service: &ConsentService) {
    println!("{label}:");
    for ConsentView {
        id,
        purpose,
        status,
        patient_id,
        wallet_address,
        created,
        tx_hash,
        tx_hash_placeholder,
        actions,
    } in service.consent_views()
    {
        let tx_hash = match tx_hash {
            Some(hash) if tx_hash_placeholder => format!("{hash} (placeholder)"),
            Some(hash) => hash.to_string(),
            None => String::new(),
        };
        println!("  {id} [{status}] {purpose} / {patient_id} by {wallet_address} at {created} {tx_hash} actions: {actions:?}");
    }
}
