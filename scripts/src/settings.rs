//! Deploy settings: the DAO metadata and the token-voting plugin parameters
//!
//! Settings are read from an optional JSON file; any field left out falls back to a default.
//! Ratios are given in the plugin's base of `10^6`, token amounts in whole tokens, e.g.
//!
//! ```json
//! {
//!     "dao": { "subdomain": "my-dao" },
//!     "voting": { "supportThreshold": 600000 },
//!     "mint": [{ "receiver": "0x...", "amount": "2.5" }]
//! }
//! ```

use std::{fs, path::Path};

use alloy::primitives::{
    utils::{parse_units, ParseUnits},
    Address, Bytes, U256,
};
use dao_abi::{
    osx::DAOSettings,
    token_voting::{
        ratio_from_percent, MintSettings, TokenSettings, TokenVotingSetup, VotingMode,
        VotingSettings, RATIO_BASE,
    },
};
use rand::{thread_rng, Rng};
use serde::Deserialize;

use crate::{
    constants::{
        DEFAULT_DAO_URI, DEFAULT_METADATA_URI, DEFAULT_MINT_AMOUNT, DEFAULT_MIN_DURATION,
        DEFAULT_MIN_PARTICIPATION_PERCENT, DEFAULT_SUBDOMAIN_PREFIX,
        DEFAULT_SUPPORT_THRESHOLD_PERCENT, DEFAULT_TOKEN_DECIMALS, DEFAULT_TOKEN_NAME,
        DEFAULT_TOKEN_SYMBOL, SUBDOMAIN_SUFFIX_BOUND,
    },
    errors::ScriptError,
    utils::parse_address,
};

/// The settings of a deploy run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DeploySettings {
    /// The DAO to create
    pub dao: DaoConfig,
    /// The voting parameters of the plugin
    pub voting: VotingConfig,
    /// The governance token
    pub token: TokenConfig,
    /// The initial token distribution, defaulting to a mint to the deployer
    pub mint: Option<Vec<MintEntry>>,
}

/// The settings of the DAO itself
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DaoConfig {
    /// The metadata URI, stored as UTF-8 bytes
    pub metadata: String,
    /// The ENS subdomain, generated when unset
    pub subdomain: Option<String>,
    /// The DAO URI
    pub dao_uri: String,
    /// The trusted forwarder address
    pub trusted_forwarder: String,
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            metadata: DEFAULT_METADATA_URI.to_string(),
            subdomain: None,
            dao_uri: DEFAULT_DAO_URI.to_string(),
            trusted_forwarder: Address::ZERO.to_string(),
        }
    }
}

/// The voting parameters of the plugin
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct VotingConfig {
    /// 0: standard, 1: early execution, 2: vote replacement
    pub voting_mode: u8,
    /// The support threshold in the plugin's ratio base
    pub support_threshold: u64,
    /// The minimum participation in the plugin's ratio base
    pub min_participation: u64,
    /// The minimum vote duration in seconds
    pub min_duration: u64,
    /// The voting power needed to create a proposal, in whole tokens
    pub min_proposer_voting_power: String,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            voting_mode: VotingMode::EarlyExecution.into(),
            support_threshold: ratio_from_percent(DEFAULT_SUPPORT_THRESHOLD_PERCENT),
            min_participation: ratio_from_percent(DEFAULT_MIN_PARTICIPATION_PERCENT),
            min_duration: DEFAULT_MIN_DURATION,
            min_proposer_voting_power: "0".to_string(),
        }
    }
}

/// The governance token
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenConfig {
    /// The address of an existing token, or zero to deploy a new one
    pub address: String,
    /// The token name
    pub name: String,
    /// The token symbol
    pub symbol: String,
    /// The token decimals, used to scale amounts given in whole tokens
    pub decimals: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            address: Address::ZERO.to_string(),
            name: DEFAULT_TOKEN_NAME.to_string(),
            symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            decimals: DEFAULT_TOKEN_DECIMALS,
        }
    }
}

/// A single initial mint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MintEntry {
    /// The receiver of the tokens
    pub receiver: String,
    /// The amount in whole tokens
    pub amount: String,
}

impl DeploySettings {
    /// Read the settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadSettings(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Parse the settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::ReadSettings(e.to_string()))
    }

    /// Build the DAO settings passed to the factory
    pub fn dao_settings(&self) -> Result<DAOSettings, ScriptError> {
        let subdomain = match &self.dao.subdomain {
            Some(subdomain) => subdomain.clone(),
            None => random_subdomain(),
        };

        Ok(DAOSettings {
            trustedForwarder: parse_address(&self.dao.trusted_forwarder)?,
            daoURI: self.dao.dao_uri.clone(),
            subdomain,
            metadata: Bytes::copy_from_slice(self.dao.metadata.as_bytes()),
        })
    }

    /// Build the token-voting setup data, minting to the deployer if no mints are configured
    pub fn token_voting_setup(&self, deployer: Address) -> Result<TokenVotingSetup, ScriptError> {
        let decimals = self.token.decimals;

        VotingMode::try_from(self.voting.voting_mode).map_err(|mode| {
            ScriptError::InvalidConfig(format!("unknown voting mode {}", mode))
        })?;
        for (name, ratio) in [
            ("support threshold", self.voting.support_threshold),
            ("min participation", self.voting.min_participation),
        ] {
            if ratio > RATIO_BASE {
                return Err(ScriptError::InvalidConfig(format!(
                    "{} {} exceeds the ratio base {}",
                    name, ratio, RATIO_BASE
                )));
            }
        }

        let voting_settings = VotingSettings {
            votingMode: self.voting.voting_mode,
            supportThreshold: self.voting.support_threshold,
            minParticipation: self.voting.min_participation,
            minDuration: self.voting.min_duration,
            minProposerVotingPower: parse_token_amount(
                &self.voting.min_proposer_voting_power,
                decimals,
            )?,
        };

        let token_settings = TokenSettings {
            addr: parse_address(&self.token.address)?,
            name: self.token.name.clone(),
            symbol: self.token.symbol.clone(),
        };

        let mint_settings = match &self.mint {
            Some(entries) => {
                let mut receivers = Vec::with_capacity(entries.len());
                let mut amounts = Vec::with_capacity(entries.len());
                for entry in entries {
                    receivers.push(parse_address(&entry.receiver)?);
                    amounts.push(parse_token_amount(&entry.amount, decimals)?);
                }
                MintSettings { receivers, amounts }
            }
            None => MintSettings {
                receivers: vec![deployer],
                amounts: vec![parse_token_amount(DEFAULT_MINT_AMOUNT, decimals)?],
            },
        };

        Ok(TokenVotingSetup {
            voting_settings,
            token_settings,
            mint_settings,
        })
    }
}

/// Generate a DAO subdomain with a random numeric suffix
fn random_subdomain() -> String {
    let suffix = thread_rng().gen_range(0..SUBDOMAIN_SUFFIX_BOUND);
    format!("{}{}", DEFAULT_SUBDOMAIN_PREFIX, suffix)
}

/// Scale an amount in whole tokens by the token decimals
fn parse_token_amount(amount: &str, decimals: u8) -> Result<U256, ScriptError> {
    match parse_units(amount, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(ScriptError::InvalidConfig(format!(
            "negative token amount {}",
            amount
        ))),
        Err(e) => Err(ScriptError::InvalidConfig(format!(
            "invalid token amount {}: {}",
            amount, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, U256};

    use super::{parse_token_amount, DeploySettings};
    use crate::errors::ScriptError;

    /// One token with 18 decimals
    const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_defaults() {
        let settings = DeploySettings::from_json("{}").unwrap();
        let deployer = Address::repeat_byte(0x42);
        let setup = settings.token_voting_setup(deployer).unwrap();

        assert_eq!(setup.voting_settings.votingMode, 1);
        assert_eq!(setup.voting_settings.supportThreshold, 500_000);
        assert_eq!(setup.voting_settings.minParticipation, 100_000);
        assert_eq!(setup.voting_settings.minDuration, 86_400);
        assert_eq!(setup.voting_settings.minProposerVotingPower, U256::ZERO);

        assert_eq!(setup.token_settings.addr, Address::ZERO);
        assert_eq!(setup.token_settings.name, "BG Token");
        assert_eq!(setup.token_settings.symbol, "BGTOK");

        assert_eq!(setup.mint_settings.receivers, vec![deployer]);
        assert_eq!(
            setup.mint_settings.amounts,
            vec![U256::from(100 * ONE_TOKEN)]
        );

        let dao = settings.dao_settings().unwrap();
        assert_eq!(&dao.metadata[..], b"ipfs://Qm...");
        assert_eq!(dao.daoURI, "https://daobox.app");
        assert_eq!(dao.trustedForwarder, Address::ZERO);
        let suffix: u32 = dao.subdomain.strip_prefix("some-dao-w").unwrap().parse().unwrap();
        assert!(suffix < 1000);
    }

    #[test]
    fn test_overrides() {
        let json = r#"{
            "dao": { "subdomain": "my-dao", "daoUri": "https://example.org" },
            "voting": { "votingMode": 0, "supportThreshold": 600000, "minProposerVotingPower": "1" },
            "token": { "name": "Gov", "symbol": "GOV", "decimals": 6 },
            "mint": [
                { "receiver": "0x1111111111111111111111111111111111111111", "amount": "2.5" },
                { "receiver": "0x2222222222222222222222222222222222222222", "amount": "3" }
            ]
        }"#;
        let settings = DeploySettings::from_json(json).unwrap();
        let setup = settings.token_voting_setup(Address::ZERO).unwrap();

        assert_eq!(setup.voting_settings.votingMode, 0);
        assert_eq!(setup.voting_settings.supportThreshold, 600_000);
        assert_eq!(setup.voting_settings.minParticipation, 100_000);
        assert_eq!(
            setup.voting_settings.minProposerVotingPower,
            U256::from(1_000_000u64)
        );
        assert_eq!(setup.token_settings.symbol, "GOV");
        assert_eq!(
            setup.mint_settings.receivers,
            vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)]
        );
        assert_eq!(
            setup.mint_settings.amounts,
            vec![U256::from(2_500_000u64), U256::from(3_000_000u64)]
        );

        let dao = settings.dao_settings().unwrap();
        assert_eq!(dao.subdomain, "my-dao");
        assert_eq!(dao.daoURI, "https://example.org");
    }

    #[test]
    fn test_empty_mint() {
        let settings = DeploySettings::from_json(r#"{ "mint": [] }"#).unwrap();
        let setup = settings.token_voting_setup(Address::ZERO).unwrap();
        assert!(setup.mint_settings.receivers.is_empty());
        assert!(setup.mint_settings.amounts.is_empty());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            DeploySettings::from_json(r#"{ "unknown": 1 }"#),
            Err(ScriptError::ReadSettings(_))
        ));

        let settings = DeploySettings::from_json(r#"{ "voting": { "votingMode": 3 } }"#).unwrap();
        assert!(matches!(
            settings.token_voting_setup(Address::ZERO),
            Err(ScriptError::InvalidConfig(_))
        ));

        let settings =
            DeploySettings::from_json(r#"{ "voting": { "supportThreshold": 1000001 } }"#)
                .unwrap();
        assert!(matches!(
            settings.token_voting_setup(Address::ZERO),
            Err(ScriptError::InvalidConfig(_))
        ));

        let settings =
            DeploySettings::from_json(r#"{ "mint": [{ "receiver": "0x12", "amount": "1" }] }"#)
                .unwrap();
        assert!(matches!(
            settings.token_voting_setup(Address::ZERO),
            Err(ScriptError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_token_amount() {
        assert_eq!(parse_token_amount("100", 18).unwrap(), U256::from(100 * ONE_TOKEN));
        assert_eq!(parse_token_amount("0.5", 2).unwrap(), U256::from(50u64));
        assert!(parse_token_amount("-1", 18).is_err());
        assert!(parse_token_amount("abc", 18).is_err());
    }
}
