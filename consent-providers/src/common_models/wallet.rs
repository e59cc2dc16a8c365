use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::macros::{impl_as_str, impl_display};

const ADDRESS_HEX_LENGTH: usize = 40;

/// Account address of a wallet identity, `0x` + 40 hex characters.
///
/// Addresses compare case-insensitively, so the value is kept lowercase.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);
impl_display!(WalletAddress);
impl_as_str!(WalletAddress);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletAddressError {
    #[error("Missing `0x` prefix: `{0}`")]
    MissingPrefix(String),
    #[error("Invalid address `{0}`")]
    Invalid(String),
}

impl WalletAddress {
    pub fn from_bytes(address: [u8; 20]) -> Self {
        Self(format!("0x{}", hex::encode(address)))
    }
}

impl FromStr for WalletAddress {
    type Err = WalletAddressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .ok_or_else(|| WalletAddressError::MissingPrefix(value.to_owned()))?;

        if digits.len() != ADDRESS_HEX_LENGTH || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletAddressError::Invalid(value.to_owned()));
        }

        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = WalletAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}
