//! Definitions of errors that can occur during the execution of the DAO deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use dao_abi::token_voting::SetupDataError;

use crate::utils::HexError;

/// Errors that can occur during the execution of the DAO deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// A required configuration value is not set
    MissingConfig(String),
    /// A configuration value is set but malformed
    InvalidConfig(String),
    /// Error reading the deploy settings file
    ReadSettings(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error parsing a hex string
    Hex(HexError),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A transaction was mined but reverted
    TransactionReverted(String),
    /// The transaction receipt holds no log for the expected event
    NoMatchingEvent(&'static str),
    /// Error decoding an event log
    EventDecoding(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::MissingConfig(s) => write!(f, "missing configuration: {}", s),
            ScriptError::InvalidConfig(s) => write!(f, "invalid configuration: {}", s),
            ScriptError::ReadSettings(s) => write!(f, "error reading deploy settings: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::Hex(e) => write!(f, "{}", e),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::TransactionReverted(s) => write!(f, "transaction reverted: {}", s),
            ScriptError::NoMatchingEvent(event) => write!(f, "no matching event: {}", event),
            ScriptError::EventDecoding(s) => write!(f, "error decoding event: {}", s),
        }
    }
}

impl Error for ScriptError {}

impl From<HexError> for ScriptError {
    fn from(e: HexError) -> Self {
        ScriptError::Hex(e)
    }
}

impl From<SetupDataError> for ScriptError {
    fn from(e: SetupDataError) -> Self {
        ScriptError::CalldataConstruction(e.to_string())
    }
}
