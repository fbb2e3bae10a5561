//! Environment configuration and network profiles
//!
//! All credentials are read once at startup into an [`EnvConfig`]. The Alchemy API key is
//! required; the remaining values are optional and only become errors when a network profile
//! that needs them is selected.

use std::{env, path::Path};

use tracing::{debug, warn};

use crate::{
    constants::{
        ALCHEMY_API_KEY_VAR, DEVNET_RPC_VAR, GOERLI_ALCHEMY_URL, LOCAL_DEV_PRIVATE_KEY,
        LOCAL_RPC_URL, PRIVATE_KEY_DEVNET_VAR, PRIVATE_KEY_GOERLI_VAR,
    },
    errors::ScriptError,
    types::Network,
};

/// Credentials and endpoints read from the environment
#[derive(Clone)]
pub struct EnvConfig {
    /// The Alchemy API key
    pub alchemy_api_key: String,
    /// The private key used on Goerli
    pub private_key_goerli: Option<String>,
    /// The private key used on the devnet
    pub private_key_devnet: Option<String>,
    /// The RPC URL of the devnet
    pub devnet_rpc: Option<String>,
}

/// The endpoint and signing key of a network
#[derive(Clone)]
pub struct NetworkProfile {
    /// The network this profile targets
    pub network: Network,
    /// The RPC URL of the network
    pub rpc_url: String,
    /// The private key of the deployer
    pub private_key: String,
}

impl EnvConfig {
    /// Load the dotenv file at the given path into the process environment, then read the
    /// config from the environment.
    ///
    /// A missing dotenv file is not an error; variables may be set directly.
    pub fn load(dotenv_path: &Path) -> Result<Self, ScriptError> {
        match dotenvy::from_path(dotenv_path) {
            Ok(()) => debug!("loaded environment from {}", dotenv_path.display()),
            Err(e) if e.not_found() => {
                debug!("no env file at {}", dotenv_path.display())
            }
            Err(e) => {
                return Err(ScriptError::InvalidConfig(format!(
                    "error loading {}: {}",
                    dotenv_path.display(),
                    e
                )))
            }
        }

        Self::from_env()
    }

    /// Read the config from the process environment
    pub fn from_env() -> Result<Self, ScriptError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the config through the given variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScriptError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let optional = |key: &str| {
            let value = get(key);
            if value.is_none() {
                warn!("{} not set", key);
            }
            value
        };

        let alchemy_api_key = get(ALCHEMY_API_KEY_VAR)
            .ok_or_else(|| ScriptError::MissingConfig(format!("{} not set", ALCHEMY_API_KEY_VAR)))?;

        Ok(Self {
            alchemy_api_key,
            private_key_goerli: optional(PRIVATE_KEY_GOERLI_VAR),
            private_key_devnet: optional(PRIVATE_KEY_DEVNET_VAR),
            devnet_rpc: optional(DEVNET_RPC_VAR),
        })
    }

    /// Resolve the profile of the given network
    pub fn network_profile(&self, network: Network) -> Result<NetworkProfile, ScriptError> {
        let (rpc_url, private_key) = match network {
            Network::Hardhat => (LOCAL_RPC_URL.to_string(), LOCAL_DEV_PRIVATE_KEY.to_string()),
            Network::Goerli => (
                format!("{}{}", GOERLI_ALCHEMY_URL, self.alchemy_api_key),
                require(&self.private_key_goerli, PRIVATE_KEY_GOERLI_VAR, network)?,
            ),
            Network::Devnet => (
                require(&self.devnet_rpc, DEVNET_RPC_VAR, network)?,
                require(&self.private_key_devnet, PRIVATE_KEY_DEVNET_VAR, network)?,
            ),
        };

        Ok(NetworkProfile {
            network,
            rpc_url,
            private_key,
        })
    }
}

/// Unwrap an optional config value that the given network needs
fn require(value: &Option<String>, key: &str, network: Network) -> Result<String, ScriptError> {
    value
        .clone()
        .ok_or_else(|| ScriptError::MissingConfig(format!("{} is required on {}", key, network)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::EnvConfig;
    use crate::{
        constants::{LOCAL_DEV_PRIVATE_KEY, LOCAL_RPC_URL},
        errors::ScriptError,
        types::Network,
    };

    fn config_from(vars: &[(&str, &str)]) -> Result<EnvConfig, ScriptError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_api_key() {
        let res = config_from(&[("PRIVATE_KEY_GOERLI", "0x01")]);
        assert!(matches!(res, Err(ScriptError::MissingConfig(_))));

        let res = config_from(&[("ALCHEMY_API_KEY", "")]);
        assert!(matches!(res, Err(ScriptError::MissingConfig(_))));
    }

    #[test]
    fn test_optional_values() {
        let config = config_from(&[("ALCHEMY_API_KEY", "key"), ("DEVNET_RPC", "")]).unwrap();
        assert_eq!(config.alchemy_api_key, "key");
        assert_eq!(config.private_key_goerli, None);
        assert_eq!(config.private_key_devnet, None);
        assert_eq!(config.devnet_rpc, None);
    }

    #[test]
    fn test_hardhat_profile() {
        let config = config_from(&[("ALCHEMY_API_KEY", "key")]).unwrap();
        let profile = config.network_profile(Network::Hardhat).unwrap();
        assert_eq!(profile.rpc_url, LOCAL_RPC_URL);
        assert_eq!(profile.private_key, LOCAL_DEV_PRIVATE_KEY);
    }

    #[test]
    fn test_goerli_profile() {
        let config = config_from(&[("ALCHEMY_API_KEY", "key")]).unwrap();
        assert!(matches!(
            config.network_profile(Network::Goerli),
            Err(ScriptError::MissingConfig(_))
        ));

        let config =
            config_from(&[("ALCHEMY_API_KEY", "key"), ("PRIVATE_KEY_GOERLI", "0x02")]).unwrap();
        let profile = config.network_profile(Network::Goerli).unwrap();
        assert_eq!(profile.rpc_url, "https://eth-goerli.g.alchemy.com/v2/key");
        assert_eq!(profile.private_key, "0x02");
        assert_eq!(profile.network, Network::Goerli);
    }

    #[test]
    fn test_devnet_profile() {
        let config =
            config_from(&[("ALCHEMY_API_KEY", "key"), ("PRIVATE_KEY_DEVNET", "0x03")]).unwrap();
        assert!(matches!(
            config.network_profile(Network::Devnet),
            Err(ScriptError::MissingConfig(_))
        ));

        let config = config_from(&[
            ("ALCHEMY_API_KEY", "key"),
            ("PRIVATE_KEY_DEVNET", "0x03"),
            ("DEVNET_RPC", "http://devnet:8545"),
        ])
        .unwrap();
        let profile = config.network_profile(Network::Devnet).unwrap();
        assert_eq!(profile.rpc_url, "http://devnet:8545");
        assert_eq!(profile.private_key, "0x03");
    }
}
