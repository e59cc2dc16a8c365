pub mod consent_service;
pub mod error;
