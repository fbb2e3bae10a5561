//! Solidity ABI bindings for the Aragon OSx contracts used when deploying a DAO,
//! along with the token-voting plugin's setup data schema.

pub mod osx;
pub mod token_voting;
