//! Utilities for the deploy scripts.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};

use crate::{errors::ScriptError, types::DeployClient};

/// Errors converting a hex string to bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    /// The string contains a character that is not a hex digit
    InvalidHex,
    /// The string has an odd number of hex digits
    OddLength,
}

impl Display for HexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HexError::InvalidHex => write!(f, "invalid hex string"),
            HexError::OddLength => write!(f, "the hex string has an odd length"),
        }
    }
}

impl Error for HexError {}

/// Strip an optional `0x` prefix
pub fn strip_0x(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

/// Convert a hex string, optionally `0x`-prefixed, to bytes
///
/// The digits are validated before the length, so `"0xZ"` is reported as invalid rather than odd
pub fn hex_to_bytes(hex_string: &str) -> Result<Vec<u8>, HexError> {
    let digits = strip_0x(hex_string);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidHex);
    }
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength);
    }

    hex::decode(digits).map_err(|_| HexError::InvalidHex)
}

/// Convert bytes to a `0x`-prefixed lowercase hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse an address from its hex representation
pub fn parse_address(value: &str) -> Result<Address, ScriptError> {
    Address::from_str(value)
        .map_err(|e| ScriptError::InvalidConfig(format!("invalid address {}: {}", value, e)))
}

/// Sets up the client with which to send transactions, signing with the given private key.
///
/// Returns the client along with the address of the deployer.
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(DeployClient, Address), ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok((DynProvider::new(provider), deployer))
}

#[cfg(test)]
mod tests {
    use super::{bytes_to_hex, hex_to_bytes, setup_client, HexError};
    use crate::constants::{LOCAL_DEV_PRIVATE_KEY, LOCAL_RPC_URL};

    #[test]
    fn test_hex_round_trip() {
        let cases = ["0x00ff10ab", "00ff10ab", "0xDEADbeef", "0123456789abcdefABCDEF00"];
        for case in cases {
            let bytes = hex_to_bytes(case).unwrap();
            let expected = case.strip_prefix("0x").unwrap_or(case).to_lowercase();
            assert_eq!(bytes_to_hex(&bytes), format!("0x{}", expected));
        }
    }

    #[test]
    fn test_hex_values() {
        assert_eq!(hex_to_bytes("0x0aff").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
        assert_eq!(hex_to_bytes("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(hex_to_bytes("0xZZ"), Err(HexError::InvalidHex));
        assert_eq!(hex_to_bytes("12 4"), Err(HexError::InvalidHex));
        assert_eq!(hex_to_bytes("0X12"), Err(HexError::InvalidHex));
        assert_eq!(hex_to_bytes("0xabc"), Err(HexError::OddLength));
        assert_eq!(hex_to_bytes("1"), Err(HexError::OddLength));
        assert_eq!(hex_to_bytes("0xZ"), Err(HexError::InvalidHex));

        assert_eq!(HexError::InvalidHex.to_string(), "invalid hex string");
        assert_eq!(
            HexError::OddLength.to_string(),
            "the hex string has an odd length"
        );
    }

    #[tokio::test]
    async fn test_setup_client() {
        let (_, deployer) = setup_client(LOCAL_DEV_PRIVATE_KEY, LOCAL_RPC_URL).unwrap();
        assert_eq!(
            format!("{deployer:#x}"),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );

        assert!(setup_client("not a key", LOCAL_RPC_URL).is_err());
        assert!(setup_client(LOCAL_DEV_PRIVATE_KEY, "not a url").is_err());
    }
}
