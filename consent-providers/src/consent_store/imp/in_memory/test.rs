use time::OffsetDateTime;

use super::{InMemoryConsentStore, RecordedRequest};
use crate::{
    common_models::consent::{
        Consent, ConsentStatus, CreateConsentRequest, GetConsentListQuery, TxHash,
        UpdateConsentRequest,
    },
    consent_store::{error::ConsentStoreError, ConsentStore},
};

fn consent(id: &str, patient_id: &str, status: ConsentStatus) -> Consent {
    Consent {
        id: id.into(),
        patient_id: patient_id.to_string(),
        purpose: "Insurance Provider Access".to_string(),
        wallet_address: "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23".parse().unwrap(),
        signature: "0xsigned".to_string(),
        message: format!("I consent to: Insurance Provider Access for patient: {patient_id}"),
        status,
        blockchain_tx_hash: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[tokio::test]
async fn test_filters_preserve_insertion_order() {
    let store = InMemoryConsentStore::new(vec![
        consent("c-1", "patient-001", ConsentStatus::Pending),
        consent("c-2", "patient-002", ConsentStatus::Active),
        consent("c-3", "patient-001", ConsentStatus::Active),
    ]);

    let active = store
        .get_consents(GetConsentListQuery {
            patient_id: None,
            status: Some(ConsentStatus::Active),
        })
        .await
        .unwrap();
    let for_patient = store
        .get_consents(GetConsentListQuery {
            patient_id: Some("patient-001".to_string()),
            status: None,
        })
        .await
        .unwrap();

    assert_eq!(
        active.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["c-2", "c-3"]
    );
    assert_eq!(
        for_patient.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["c-1", "c-3"]
    );
}

#[tokio::test]
async fn test_create_assigns_pending_status() {
    let store = InMemoryConsentStore::default();
    let request = CreateConsentRequest {
        patient_id: "patient-001".to_string(),
        purpose: "Research Study Participation".to_string(),
        wallet_address: "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23".parse().unwrap(),
        signature: "0xsigned".to_string(),
        message: "I consent to: Research Study Participation for patient: patient-001"
            .to_string(),
    };

    let created = store.create_consent(request.to_owned()).await.unwrap();

    assert_eq!(created.status, ConsentStatus::Pending);
    assert_eq!(created.blockchain_tx_hash, None);
    assert_eq!(store.consents().await, vec![created]);
    assert_eq!(
        store.requests().await,
        vec![RecordedRequest::CreateConsent(request)]
    );
}

#[tokio::test]
async fn test_update_rejects_transition_out_of_revoked() {
    let store = InMemoryConsentStore::new(vec![consent("c-1", "patient-001", ConsentStatus::Revoked)]);

    let result = store
        .update_consent(
            &"c-1".into(),
            UpdateConsentRequest {
                status: ConsentStatus::Active,
                blockchain_tx_hash: Some(TxHash::from("0xabc".to_string())),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(ConsentStoreError::Rejected { status: 409, .. })
    ));
    assert_eq!(store.consents().await[0].status, ConsentStatus::Revoked);
}

#[tokio::test]
async fn test_update_keeps_hash_on_revocation() {
    let mut active = consent("c-1", "patient-001", ConsentStatus::Active);
    active.blockchain_tx_hash = Some(TxHash::from("0xabc".to_string()));
    let store = InMemoryConsentStore::new(vec![active]);

    let updated = store
        .update_consent(
            &"c-1".into(),
            UpdateConsentRequest {
                status: ConsentStatus::Revoked,
                blockchain_tx_hash: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ConsentStatus::Revoked);
    assert_eq!(updated.blockchain_tx_hash, Some(TxHash::from("0xabc".to_string())));
}
