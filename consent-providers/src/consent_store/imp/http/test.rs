use std::sync::Arc;

use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

use super::HttpConsentStore;
use crate::{
    common_models::consent::{
        ConsentId, ConsentStatus, CreateConsentRequest, GetConsentListQuery, TxHash,
        UpdateConsentRequest,
    },
    consent_store::{error::ConsentStoreError, ConsentStore},
    http_client::imp::reqwest_client::ReqwestClient,
};

const WALLET: &str = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23";
const MESSAGE: &str = "I consent to: Research Study Participation for patient: patient-001";

fn consent_json(id: &str, status: &str, tx_hash: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "patientId": "patient-001",
        "purpose": "Research Study Participation",
        "walletAddress": WALLET,
        "signature": "0xsigned",
        "message": MESSAGE,
        "status": status,
        "blockchainTxHash": tx_hash,
        "createdAt": "2026-10-18T14:15:00Z"
    })
}

fn store(server: &MockServer) -> HttpConsentStore {
    HttpConsentStore::new(
        &format!("{}/api", server.uri()),
        Arc::new(ReqwestClient::default()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_consents_with_status_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/consents"))
        .and(query_param("status", "active"))
        .and(query_param_is_missing("patientId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consents": [consent_json("c-1", "active", Some("0xabc"))]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .get_consents(GetConsentListQuery {
            patient_id: None,
            status: Some(ConsentStatus::Active),
        })
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, ConsentId::from("c-1"));
    assert_eq!(result[0].status, ConsentStatus::Active);
    assert_eq!(
        result[0].blockchain_tx_hash,
        Some(TxHash::from("0xabc".to_string()))
    );
}

#[tokio::test]
async fn test_get_consents_without_filter_sends_no_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/consents"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("patientId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "consents": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .get_consents(GetConsentListQuery::default())
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_get_consents_normalizes_response_shapes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/consents"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [consent_json("c-1", "pending", None)]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/consents"))
        .and(query_param("status", "revoked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            consent_json("c-2", "revoked", Some("0xdef")),
            consent_json("c-3", "revoked", Some(""))
        ])))
        .mount(&mock_server)
        .await;

    let store = store(&mock_server);
    let pending = store
        .get_consents(GetConsentListQuery {
            patient_id: None,
            status: Some(ConsentStatus::Pending),
        })
        .await
        .unwrap();
    let revoked = store
        .get_consents(GetConsentListQuery {
            patient_id: None,
            status: Some(ConsentStatus::Revoked),
        })
        .await
        .unwrap();

    assert_eq!(pending[0].id.as_str(), "c-1");
    assert_eq!(
        revoked.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["c-2", "c-3"]
    );
    assert_eq!(revoked[1].blockchain_tx_hash, None);
}

#[tokio::test]
async fn test_get_consents_rejects_pending_with_tx_hash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/consents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consents": [consent_json("c-1", "pending", Some("0xabc"))]
        })))
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .get_consents(GetConsentListQuery::default())
        .await;

    assert!(matches!(
        result,
        Err(ConsentStoreError::InvalidRecord { id, .. }) if id == "c-1"
    ));
}

#[tokio::test]
async fn test_create_consent_posts_signed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/consents"))
        .and(body_json(json!({
            "patientId": "patient-001",
            "purpose": "Research Study Participation",
            "walletAddress": WALLET,
            "signature": "0xsigned",
            "message": MESSAGE
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": consent_json("c-9", "pending", None)
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .create_consent(CreateConsentRequest {
            patient_id: "patient-001".to_string(),
            purpose: "Research Study Participation".to_string(),
            wallet_address: WALLET.parse().unwrap(),
            signature: "0xsigned".to_string(),
            message: MESSAGE.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.id.as_str(), "c-9");
    assert_eq!(result.status, ConsentStatus::Pending);
    assert_eq!(result.blockchain_tx_hash, None);
}

#[tokio::test]
async fn test_create_consent_surfaces_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/consents"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid signature" })),
        )
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .create_consent(CreateConsentRequest {
            patient_id: "patient-001".to_string(),
            purpose: "Research Study Participation".to_string(),
            wallet_address: WALLET.parse().unwrap(),
            signature: "0xsigned".to_string(),
            message: MESSAGE.to_string(),
        })
        .await;

    assert!(matches!(
        result,
        Err(ConsentStoreError::Rejected { status: 400, message }) if message == "Invalid signature"
    ));
}

#[tokio::test]
async fn test_update_consent_patches_status_and_hash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/consents/c-1"))
        .and(body_json(json!({
            "status": "active",
            "blockchainTxHash": "0xabc"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(consent_json("c-1", "active", Some("0xabc"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .update_consent(
            &ConsentId::from("c-1"),
            UpdateConsentRequest {
                status: ConsentStatus::Active,
                blockchain_tx_hash: Some(TxHash::from("0xabc".to_string())),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.status, ConsentStatus::Active);
}

#[tokio::test]
async fn test_update_consent_omits_missing_hash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/consents/c-1"))
        .and(body_json(json!({ "status": "revoked" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "consent": consent_json("c-1", "revoked", None)
            })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .update_consent(
            &ConsentId::from("c-1"),
            UpdateConsentRequest {
                status: ConsentStatus::Revoked,
                blockchain_tx_hash: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.status, ConsentStatus::Revoked);
}

#[tokio::test]
async fn test_update_unknown_consent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/consents/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .update_consent(
            &ConsentId::from("missing"),
            UpdateConsentRequest {
                status: ConsentStatus::Revoked,
                blockchain_tx_hash: None,
            },
        )
        .await;

    assert!(matches!(result, Err(ConsentStoreError::NotFound(id)) if id.as_str() == "missing"));
}

#[test]
fn test_base_url_without_trailing_slash() {
    let store = HttpConsentStore::new(
        "http://localhost:3001/api",
        Arc::new(ReqwestClient::default()),
    )
    .unwrap();

    assert_eq!(
        store.consents_url().unwrap().as_str(),
        "http://localhost:3001/api/consents"
    );
    assert_eq!(
        store.consent_url(&ConsentId::from("a b")).unwrap().as_str(),
        "http://localhost:3001/api/consents/a%20b"
    );
}

#[tokio::test]
async fn test_update_consent_keeps_id_in_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/consents/c%2F1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(consent_json("c/1", "revoked", Some("0xabc"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = store(&mock_server)
        .update_consent(
            &ConsentId::from("c/1"),
            UpdateConsentRequest {
                status: ConsentStatus::Revoked,
                blockchain_tx_hash: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.id.as_str(), "c/1");
}
