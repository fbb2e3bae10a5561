//! Definitions of CLI arguments for the deploy script

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser};
use tracing::info;

use crate::{
    commands::{deploy_dao, OnchainPluginRepo},
    config::EnvConfig,
    constants::{DAO_FACTORY_ADDRESS, DEFAULT_DOTENV_PATH, TOKEN_VOTING_REPO_ADDRESS},
    errors::ScriptError,
    types::{DeployOutcome, Network},
    utils::{parse_address, setup_client},
};

/// Deploy an Aragon DAO with a token-voting plugin
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The network to deploy to
    #[arg(short, long, value_enum, default_value_t = Network::Hardhat)]
    pub network: Network,

    /// Path to the dotenv file holding credentials
    #[arg(long, env = "DOTENV_CONFIG_PATH", default_value = DEFAULT_DOTENV_PATH)]
    pub env_file: PathBuf,

    /// The deploy options
    #[command(flatten)]
    pub deploy: DeployDaoArgs,
}

/// Create a DAO through the `DAOFactory`, installing the latest token-voting plugin
#[derive(Args)]
pub struct DeployDaoArgs {
    /// Path to a JSON file with DAO, voting, token, and mint settings
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Pre-encoded token-voting setup data in hex, used in place of the
    /// voting, token, and mint settings
    #[arg(long)]
    pub setup_data: Option<String>,

    /// Address of the token-voting plugin repository
    #[arg(long, default_value = TOKEN_VOTING_REPO_ADDRESS)]
    pub plugin_repo: String,

    /// Address of the DAO factory
    #[arg(long, default_value = DAO_FACTORY_ADDRESS)]
    pub dao_factory: String,

    /// Resolve the plugin and encode the transaction without sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Load the configuration and run the deploy
    pub async fn run(self) -> Result<DeployOutcome, ScriptError> {
        let config = EnvConfig::load(&self.env_file)?;
        let profile = config.network_profile(self.network)?;

        let (client, deployer) = setup_client(&profile.private_key, &profile.rpc_url)?;
        info!("Network: {}", profile.network);
        info!("Wallet address: {:#x}", deployer);

        let plugin_repo = parse_address(&self.deploy.plugin_repo)?;
        let repo = OnchainPluginRepo::new(plugin_repo, client.clone());
        deploy_dao(self.deploy, &repo, client, deployer).await
    }
}

/// The exit code for arguments that failed to parse
///
/// Help and version requests surface as parse errors but are not failures
pub fn parse_error_exit_code(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
