//! The DAO deploy procedure
//!
//! The steps run strictly in order and none is retried:
//! 1. resolve the latest version of the token-voting plugin
//! 2. encode the plugin's setup data
//! 3. submit the `createDao` transaction
//! 4. wait for the receipt and read the new DAO's address from its logs

use alloy::{
    primitives::{Address, Bytes, Log},
    rpc::types::TransactionReceipt,
};
use alloy_sol_types::{SolCall, SolEvent};
use dao_abi::{
    osx::{
        DAOFactory, DAORegistered, DAOSettings, PluginRepo, PluginSettings, PluginSetupRef,
        Version,
    },
    token_voting::TokenVotingSetup,
};
use tracing::info;

use crate::{
    cli::DeployDaoArgs,
    constants::CREATE_DAO_GAS_LIMIT,
    errors::ScriptError,
    settings::DeploySettings,
    types::{DeployClient, DeployOutcome},
    utils::{bytes_to_hex, hex_to_bytes, parse_address},
};

// ---------------------
// | Plugin Versioning |
// ---------------------

/// A source of published plugin versions
#[allow(async_fn_in_trait)]
pub trait PluginVersionSource {
    /// The address of the plugin repository
    fn address(&self) -> Address;

    /// The number of the latest release
    async fn latest_release(&self) -> Result<u8, ScriptError>;

    /// The latest version published in the given release
    async fn latest_version(&self, release: u8) -> Result<Version, ScriptError>;
}

/// A `PluginRepo` contract reached over RPC
pub struct OnchainPluginRepo {
    /// The address of the repository
    address: Address,
    /// The client used to query the repository
    client: DeployClient,
}

impl OnchainPluginRepo {
    /// Create a handle to the repository at the given address
    pub fn new(address: Address, client: DeployClient) -> Self {
        Self { address, client }
    }
}

impl PluginVersionSource for OnchainPluginRepo {
    fn address(&self) -> Address {
        self.address
    }

    async fn latest_release(&self) -> Result<u8, ScriptError> {
        let repo = PluginRepo::new(self.address, self.client.clone());
        let release = repo
            .latestRelease()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(release._0)
    }

    async fn latest_version(&self, release: u8) -> Result<Version, ScriptError> {
        let repo = PluginRepo::new(self.address, self.client.clone());
        let version = repo
            .getLatestVersion(release)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(version._0)
    }
}

/// Resolve a reference to the latest version of the plugin in the given repository
pub async fn resolve_latest_version(
    repo: &impl PluginVersionSource,
) -> Result<PluginSetupRef, ScriptError> {
    let release = repo.latest_release().await?;
    // Releases are numbered from 1
    if release == 0 {
        return Err(ScriptError::ContractInteraction(format!(
            "plugin repository {:#x} has no releases",
            repo.address()
        )));
    }

    let version = repo.latest_version(release).await?;
    info!(
        "Latest plugin version: release {}, build {}",
        version.tag.release, version.tag.build
    );

    Ok(PluginSetupRef {
        versionTag: version.tag,
        pluginSetupRepo: repo.address(),
    })
}

// ----------------
// | Installation |
// ----------------

/// Resolve the latest plugin version and pair it with the encoded setup data
pub async fn prepare_installation(
    repo: &impl PluginVersionSource,
    setup_data: Bytes,
) -> Result<PluginSettings, ScriptError> {
    let plugin_setup_ref = resolve_latest_version(repo).await?;

    Ok(PluginSettings {
        pluginSetupRef: plugin_setup_ref,
        data: setup_data,
    })
}

/// Produce the token-voting setup data, either from raw hex or from the deploy settings
///
/// Raw setup data must decode as token-voting setup data
pub fn token_voting_setup_data(
    raw_setup_data: Option<&str>,
    settings: &DeploySettings,
    deployer: Address,
) -> Result<Bytes, ScriptError> {
    let data = match raw_setup_data {
        Some(hex_string) => {
            let data = hex_to_bytes(hex_string)?;
            TokenVotingSetup::decode(&data)?;
            data.into()
        }
        None => settings.token_voting_setup(deployer)?.encode()?,
    };

    Ok(data)
}

// ----------------
// | DAO Creation |
// ----------------

/// Submit the `createDao` transaction and wait for its receipt
pub async fn create_dao(
    factory_address: Address,
    client: DeployClient,
    dao_settings: DAOSettings,
    plugin_settings: Vec<PluginSettings>,
) -> Result<TransactionReceipt, ScriptError> {
    let factory = DAOFactory::new(factory_address, client);

    factory
        .createDao(dao_settings, plugin_settings)
        .gas(CREATE_DAO_GAS_LIMIT)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
}

/// Find the `DAORegistered` event in the given logs and return the address of the new DAO
pub fn parse_dao_address<'a>(
    logs: impl IntoIterator<Item = &'a Log>,
) -> Result<Address, ScriptError> {
    let log = logs
        .into_iter()
        .find(|log| log.data.topics().first() == Some(&DAORegistered::SIGNATURE_HASH))
        .ok_or(ScriptError::NoMatchingEvent(DAORegistered::SIGNATURE))?;

    let event = DAORegistered::decode_log(log, true /* validate */)
        .map_err(|e| ScriptError::EventDecoding(e.to_string()))?;

    Ok(event.data.dao)
}

/// Read the address of the new DAO from a `createDao` receipt
///
/// A reverted transaction is an error even though its receipt was mined
pub fn dao_address_from_receipt(receipt: &TransactionReceipt) -> Result<Address, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::TransactionReverted(format!(
            "{:#x}",
            receipt.transaction_hash
        )));
    }

    parse_dao_address(receipt.inner.logs().iter().map(|log| &log.inner))
}

// --------------
// | Entrypoint |
// --------------

/// Deploy a DAO with the token-voting plugin installed
///
/// The plugin version is resolved through `repo`; `args.plugin_repo` is only read by callers
/// that build an [`OnchainPluginRepo`]
pub async fn deploy_dao(
    args: DeployDaoArgs,
    repo: &impl PluginVersionSource,
    client: DeployClient,
    deployer: Address,
) -> Result<DeployOutcome, ScriptError> {
    let settings = match &args.settings {
        Some(path) => DeploySettings::load(path)?,
        None => DeploySettings::default(),
    };

    let factory_address = parse_address(&args.dao_factory)?;

    let setup_data = token_voting_setup_data(args.setup_data.as_deref(), &settings, deployer)?;
    let installation = prepare_installation(repo, setup_data).await?;
    let dao_settings = settings.dao_settings()?;
    info!("Creating DAO with subdomain {}", dao_settings.subdomain);

    if args.dry_run {
        let calldata: Bytes = DAOFactory::createDaoCall {
            _daoSettings: dao_settings,
            _pluginSettings: vec![installation],
        }
        .abi_encode()
        .into();
        info!("Dry run, createDao calldata: {}", bytes_to_hex(&calldata));

        return Ok(DeployOutcome::DryRun { calldata });
    }

    let receipt = create_dao(factory_address, client, dao_settings, vec![installation]).await?;
    let dao = dao_address_from_receipt(&receipt)?;
    info!("Deployed DAO at {:#x}", dao);

    Ok(DeployOutcome::Deployed {
        dao,
        tx_hash: receipt.transaction_hash,
    })
}
