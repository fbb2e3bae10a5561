//! Scripts for deploying an Aragon DAO with a token-voting plugin.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod settings;
pub mod types;
pub mod utils;
