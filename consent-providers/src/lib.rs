//! Traits and implementations of the collaborators around consent authorization:
//! the remote consent store, wallet signers and transaction anchoring.

pub mod anchor;
pub mod common_models;
pub mod consent_store;
pub mod http_client;
pub mod wallet;
