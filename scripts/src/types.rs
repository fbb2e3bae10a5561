//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, TxHash},
    providers::DynProvider,
};
use clap::ValueEnum;

/// The provider type with which the scripts sign and send transactions
pub type DeployClient = DynProvider<Ethereum>;

/// The network profiles the scripts can deploy to
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Network {
    /// A local development node
    #[default]
    Hardhat,
    /// The Goerli testnet, reached through Alchemy
    Goerli,
    /// A custom devnet
    Devnet,
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Hardhat => write!(f, "hardhat"),
            Network::Goerli => write!(f, "goerli"),
            Network::Devnet => write!(f, "devnet"),
        }
    }
}

/// The outcome of a deploy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The DAO was created
    Deployed {
        /// The address of the new DAO
        dao: Address,
        /// The hash of the `createDao` transaction
        tx_hash: TxHash,
    },
    /// A dry run stopped short of submitting the transaction
    DryRun {
        /// The `createDao` calldata that would have been sent
        calldata: Bytes,
    },
}
