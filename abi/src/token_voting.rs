//! The setup data schema of the token-voting plugin
//!
//! `TokenVotingSetup.prepareInstallation` decodes its `_data` argument as the parameter tuple
//! `(VotingSettings, TokenSettings, MintSettings)`, see:
//! https://github.com/aragon/osx/blob/527474bb14529f2892e8277f6d7a1ca2da637a55/packages/contracts/src/plugins/governance/majority-voting/token/TokenVotingSetup.sol#L88
//!
//! A payload that does not match this layout byte for byte makes the `createDao` transaction
//! revert on-chain, so the layout is pinned by the tests below.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use alloy::{primitives::Bytes, sol};
use alloy_sol_types::SolValue;

/// The base in which the plugin expresses ratios, `RATIO_BASE` is 100%
pub const RATIO_BASE: u64 = 1_000_000;

sol! {
    #![sol(all_derives)]

    /// The majority voting parameters of the plugin
    struct VotingSettings {
        uint8 votingMode;
        uint64 supportThreshold;
        uint64 minParticipation;
        uint64 minDuration;
        uint256 minProposerVotingPower;
    }

    /// The governance token; a zero `addr` has the setup deploy a new token
    struct TokenSettings {
        address addr;
        string name;
        string symbol;
    }

    /// The initial distribution of a newly deployed governance token
    struct MintSettings {
        address[] receivers;
        uint256[] amounts;
    }
}

/// The voting modes supported by the majority voting plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VotingMode {
    /// Votes are final and the proposal executes after the vote ends
    Standard = 0,
    /// A proposal may execute as soon as its outcome can no longer change
    EarlyExecution = 1,
    /// Voters may replace their vote while the vote is open
    VoteReplacement = 2,
}

impl From<VotingMode> for u8 {
    fn from(mode: VotingMode) -> Self {
        mode as u8
    }
}

impl TryFrom<u8> for VotingMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VotingMode::Standard),
            1 => Ok(VotingMode::EarlyExecution),
            2 => Ok(VotingMode::VoteReplacement),
            _ => Err(value),
        }
    }
}

/// Express a whole percentage in the plugin's ratio base, e.g. 50 -> 500_000
///
/// Percentages above 100 saturate at `RATIO_BASE`
pub const fn ratio_from_percent(percent: u8) -> u64 {
    let percent = if percent > 100 { 100 } else { percent };
    percent as u64 * RATIO_BASE / 100
}

/// Errors building or validating token-voting setup data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupDataError {
    /// The mint receivers and amounts are not parallel sequences
    MintLengthMismatch {
        /// The number of receivers
        receivers: usize,
        /// The number of amounts
        amounts: usize,
    },
    /// The bytes do not decode as setup data
    Decoding(String),
    /// The bytes decode, but are not the canonical encoding of what they decode to
    NonCanonical,
}

impl Display for SetupDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SetupDataError::MintLengthMismatch { receivers, amounts } => write!(
                f,
                "mint settings have {} receivers but {} amounts",
                receivers, amounts
            ),
            SetupDataError::Decoding(s) => write!(f, "error decoding setup data: {}", s),
            SetupDataError::NonCanonical => write!(f, "setup data is not canonically encoded"),
        }
    }
}

impl Error for SetupDataError {}

impl MintSettings {
    /// Check that every receiver is paired with exactly one amount
    pub fn validate(&self) -> Result<(), SetupDataError> {
        if self.receivers.len() != self.amounts.len() {
            return Err(SetupDataError::MintLengthMismatch {
                receivers: self.receivers.len(),
                amounts: self.amounts.len(),
            });
        }

        Ok(())
    }
}

/// The full setup data passed to the token-voting plugin on installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVotingSetup {
    /// The voting parameters
    pub voting_settings: VotingSettings,
    /// The governance token
    pub token_settings: TokenSettings,
    /// The initial token distribution
    pub mint_settings: MintSettings,
}

impl TokenVotingSetup {
    /// ABI-encode the setup data as the parameter tuple expected by the plugin setup
    pub fn encode(&self) -> Result<Bytes, SetupDataError> {
        self.mint_settings.validate()?;

        let params = (
            self.voting_settings.clone(),
            self.token_settings.clone(),
            self.mint_settings.clone(),
        );
        Ok(params.abi_encode_params().into())
    }

    /// Decode and validate raw setup data
    ///
    /// Only the canonical encoding of well-formed setup data is accepted
    pub fn decode(data: &[u8]) -> Result<Self, SetupDataError> {
        let (voting_settings, token_settings, mint_settings) =
            <(VotingSettings, TokenSettings, MintSettings)>::abi_decode_params(
                data, true, /* validate */
            )
            .map_err(|e| SetupDataError::Decoding(e.to_string()))?;

        let setup = Self {
            voting_settings,
            token_settings,
            mint_settings,
        };

        if setup.encode()?[..] != *data {
            return Err(SetupDataError::NonCanonical);
        }

        Ok(setup)
    }
}
