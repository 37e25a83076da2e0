//! Per-chain address conventions.

use crate::{AddressError, ScriptType};
use std::convert::TryFrom;

/// The version prefixes one ledger uses for its Base58Check addresses.
///
/// Prefixes are byte slices so chains with multi-byte versions need no special handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChainParams {
    /// Lookup name, e.g. `"bitcoin"`
    pub name: &'static str,
    /// Prefix for pay-to-public-key-hash addresses
    pub p2pkh_version: &'static [u8],
    /// Prefix for pay-to-script-hash addresses
    pub p2sh_version: &'static [u8],
}

/// Bitcoin mainnet: `1…` and `3…` addresses.
pub const BITCOIN: ChainParams = ChainParams {
    name: "bitcoin",
    p2pkh_version: &[0x00],
    p2sh_version: &[0x05],
};

/// Bitcoin testnet: `m…`/`n…` and `2…` addresses.
pub const BITCOIN_TESTNET: ChainParams = ChainParams {
    name: "bitcoin-testnet",
    p2pkh_version: &[0x6F],
    p2sh_version: &[0xC4],
};

/// Litecoin mainnet: `L…` and `M…` addresses.
pub const LITECOIN: ChainParams = ChainParams {
    name: "litecoin",
    p2pkh_version: &[0x30],
    p2sh_version: &[0x32],
};

/// Dogecoin mainnet: `D…` and `9…`/`A…` addresses.
pub const DOGECOIN: ChainParams = ChainParams {
    name: "dogecoin",
    p2pkh_version: &[0x1E],
    p2sh_version: &[0x16],
};

impl ChainParams {
    /// The chain used when none is named.
    pub const DEFAULT: ChainParams = BITCOIN;

    /// Every built-in chain.
    pub const ALL: &'static [ChainParams] = &[BITCOIN, BITCOIN_TESTNET, LITECOIN, DOGECOIN];

    /// Version prefix for addresses of `script_type` on this chain.
    #[must_use]
    pub fn version_for(&self, script_type: ScriptType) -> &'static [u8] {
        match script_type {
            ScriptType::Normal => self.p2pkh_version,
            ScriptType::P2sh => self.p2sh_version,
        }
    }

    /// Reverse lookup from a version prefix to the script type it denotes.
    ///
    /// If both prefixes are equal the address is reported as [`ScriptType::Normal`].
    #[must_use]
    pub fn script_type_for(&self, version: &[u8]) -> Option<ScriptType> {
        if version == self.p2pkh_version {
            Some(ScriptType::Normal)
        } else if version == self.p2sh_version {
            Some(ScriptType::P2sh)
        } else {
            None
        }
    }

    /// Finds a built-in chain by name (case-insensitive).
    ///
    /// # Errors
    /// Returns [`AddressError::UnknownChain`] if no built-in chain has that name.
    pub fn by_name(name: &str) -> Result<&'static ChainParams, AddressError> {
        Self::ALL
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AddressError::UnknownChain(name.to_string()))
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Attempts to parse a built-in chain from its name.
impl TryFrom<&str> for ChainParams {
    type Error = AddressError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::by_name(s).copied()
    }
}
