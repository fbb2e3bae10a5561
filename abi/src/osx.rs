//! Bindings for the Aragon OSx framework contracts
//!
//! Only the subset of each interface touched by the deploy scripts is declared.
//! Struct layouts follow OSx v1.x:
//! https://github.com/aragon/osx/tree/main/packages/contracts/src/framework

use alloy::sol;

// The shared structs live outside the interfaces so that `PluginRepo` and `DAOFactory`
// refer to the same Rust types.
sol! {
    #![sol(all_derives)]

    /// The version tag of a plugin build
    struct Tag {
        uint8 release;
        uint16 build;
    }

    /// A published plugin version
    struct Version {
        Tag tag;
        address pluginSetup;
        bytes buildMetadata;
    }

    /// A reference to a plugin setup contract in a plugin repository
    struct PluginSetupRef {
        Tag versionTag;
        address pluginSetupRepo;
    }

    /// The settings of a DAO to create
    struct DAOSettings {
        address trustedForwarder;
        string daoURI;
        string subdomain;
        bytes metadata;
    }

    /// A plugin to install on DAO creation, with its encoded setup data
    struct PluginSettings {
        PluginSetupRef pluginSetupRef;
        bytes data;
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface PluginRepo {
        function latestRelease() external view returns (uint8);
        function getLatestVersion(uint8 _release) external view returns (Version memory);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface DAOFactory {
        function createDao(DAOSettings calldata _daoSettings, PluginSettings[] calldata _pluginSettings)
            external
            returns (address createdDao);
    }

    #[allow(missing_docs)]
    interface DAORegistry {
        event DAORegistered(address indexed dao, address indexed creator, string subdomain);
    }
}

pub use DAORegistry::DAORegistered;

#[cfg(test)]
mod tests {
    use alloy::primitives::keccak256;
    use alloy_sol_types::{SolCall, SolEvent, SolStruct};

    use super::{DAOFactory, DAORegistered, DAOSettings, PluginRepo, PluginSetupRef};

    #[test]
    fn test_event_signature() {
        assert_eq!(
            DAORegistered::SIGNATURE,
            "DAORegistered(address,address,string)"
        );
        assert_eq!(
            DAORegistered::SIGNATURE_HASH,
            keccak256("DAORegistered(address,address,string)")
        );
    }

    #[test]
    fn test_function_signatures() {
        assert_eq!(PluginRepo::latestReleaseCall::SIGNATURE, "latestRelease()");
        assert_eq!(
            PluginRepo::getLatestVersionCall::SIGNATURE,
            "getLatestVersion(uint8)"
        );
        assert_eq!(
            DAOFactory::createDaoCall::SIGNATURE,
            "createDao((address,string,string,bytes),(((uint8,uint16),address),bytes)[])"
        );
    }

    #[test]
    fn test_struct_layouts() {
        assert_eq!(
            DAOSettings::eip712_root_type(),
            "DAOSettings(address trustedForwarder,string daoURI,string subdomain,bytes metadata)"
        );
        assert_eq!(
            PluginSetupRef::eip712_root_type(),
            "PluginSetupRef(Tag versionTag,address pluginSetupRepo)"
        );
    }
}
