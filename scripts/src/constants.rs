//! Constants used in the deploy scripts

/// The address of the Aragon OSx `DAOFactory` on Ethereum mainnet
pub const DAO_FACTORY_ADDRESS: &str = "0x7a62da7b56fb3bfcdf70e900787010bc4c9ca42e";

/// The address of the Aragon OSx token-voting `PluginRepo` on Ethereum mainnet
pub const TOKEN_VOTING_REPO_ADDRESS: &str = "0xb7401cd221ceafc54093168b814cc3d42579287f";

/// The gas limit of the `createDao` transaction
pub const CREATE_DAO_GAS_LIMIT: u64 = 5_000_000;

// -----------------
// | Configuration |
// -----------------

/// The default path of the dotenv file
pub const DEFAULT_DOTENV_PATH: &str = "./.env";

/// The environment variable holding the Alchemy API key
pub const ALCHEMY_API_KEY_VAR: &str = "ALCHEMY_API_KEY";

/// The environment variable holding the Goerli deployer's private key
pub const PRIVATE_KEY_GOERLI_VAR: &str = "PRIVATE_KEY_GOERLI";

/// The environment variable holding the devnet deployer's private key
pub const PRIVATE_KEY_DEVNET_VAR: &str = "PRIVATE_KEY_DEVNET";

/// The environment variable holding the devnet RPC URL
pub const DEVNET_RPC_VAR: &str = "DEVNET_RPC";

/// The Alchemy Goerli endpoint, to which the API key is appended
pub const GOERLI_ALCHEMY_URL: &str = "https://eth-goerli.g.alchemy.com/v2/";

/// The RPC URL of a local development node
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// The private key of the first prefunded account of a local development node
pub const LOCAL_DEV_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

// ---------------------------
// | Deploy Setting Defaults |
// ---------------------------

/// The default DAO metadata URI
pub const DEFAULT_METADATA_URI: &str = "ipfs://Qm...";

/// The prefix of a generated DAO subdomain
pub const DEFAULT_SUBDOMAIN_PREFIX: &str = "some-dao-w";

/// The exclusive upper bound of the random suffix of a generated DAO subdomain
pub const SUBDOMAIN_SUFFIX_BOUND: u32 = 1000;

/// The default DAO URI
pub const DEFAULT_DAO_URI: &str = "https://daobox.app";

/// The default minimum vote duration, one day in seconds
pub const DEFAULT_MIN_DURATION: u64 = 60 * 60 * 24;

/// The default support threshold as a whole percentage
pub const DEFAULT_SUPPORT_THRESHOLD_PERCENT: u8 = 50;

/// The default minimum participation as a whole percentage
pub const DEFAULT_MIN_PARTICIPATION_PERCENT: u8 = 10;

/// The default governance token name
pub const DEFAULT_TOKEN_NAME: &str = "BG Token";

/// The default governance token symbol
pub const DEFAULT_TOKEN_SYMBOL: &str = "BGTOK";

/// The default number of decimals of the governance token
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// The default amount of tokens minted to the deployer, in whole tokens
pub const DEFAULT_MINT_AMOUNT: &str = "100";
