//! A Base58Check address deriver for Bitcoin-family chains.
//!
//! This crate supports:
//! - Addresses from a public key (via Hash160) or directly from a 20-byte hash.
//! - P2PKH and P2SH script types with per-chain version prefixes.
//! - Multi-byte version prefixes.
//! - Lazy, write-once caching of the derived hash and the encoded string.
//! - Base58Check decoding back to `version || hash`.
//!
//! ```
//! use b58_address::{Address, ChainParams, ScriptType};
//!
//! let hash = hex::decode("62e907b15cbf27d5425399ebf6f0fb50ebb88f18").unwrap();
//! let addr = Address::from_ripemd160(&hash, ScriptType::Normal, &ChainParams::DEFAULT).unwrap();
//! assert_eq!(addr.address().unwrap(), "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
//! ```

pub mod base58;
pub mod chain;
mod decode;
mod hasher;

pub use chain::{BITCOIN, BITCOIN_TESTNET, ChainParams, DOGECOIN, LITECOIN};
pub use decode::{DecodedAddress, decode_address, decode_address_with_version_len};
pub use hasher::{AddressHasher, HASH160_LENGTH, Hasher};

use hex::encode as hex_encode;
use log::{debug, trace};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Which kind of script an address pays to.
///
/// This determines which version prefix of the chain is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScriptType {
    /// Pay-to-public-key-hash
    #[default]
    Normal,
    /// Pay-to-script-hash
    P2sh,
}

/// Errors that can occur while building or resolving an address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// A supplied hash was not exactly 20 bytes
    #[error("invalid hash length: got {got}, expected {expected}")]
    InvalidHashLength { got: usize, expected: usize },

    /// The hash could not be derived
    #[error("hash derivation failed: {0}")]
    HashDerivation(String),

    /// No built-in chain has this name
    #[error("unknown chain: {0}")]
    UnknownChain(String),
}

/// Errors that can occur during address decoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressDecodeError {
    /// Invalid Base58 text or checksum
    #[error("Base58 error: {0}")]
    Base58(#[from] base58::DecodeError),

    /// Decoded payload is not `version || hash`
    #[error("invalid payload length: got {got}, expected {expected}")]
    InvalidPayloadLength { got: usize, expected: usize },

    /// Version prefix belongs to neither script type of the chain
    #[error("unknown version prefix 0x{version} for chain {chain}")]
    UnknownVersion { version: String, chain: &'static str },
}

/// A Base58Check address.
///
/// The hash and the encoded string are computed on first use and cached for the lifetime of
/// the value. Concurrent first reads may both compute; the first result stored wins and every
/// reader sees it.
#[derive(Clone)]
pub struct Address<'c, H = Hasher> {
    hash: OnceLock<[u8; HASH160_LENGTH]>,
    public_key: Option<Vec<u8>>,
    encoded: OnceLock<String>,
    script_type: ScriptType,
    chain: &'c ChainParams,
    hasher: H,
}

impl<'c> Address<'c, Hasher> {
    /// Address for a public key. The key is only checked when [`Address::hash`] first runs.
    #[must_use]
    pub fn from_public_key(public_key: impl Into<Vec<u8>>, chain: &'c ChainParams) -> Self {
        Self::from_public_key_with_hasher(public_key, chain, Hasher)
    }

    /// Address for a known RIPEMD-160 (Hash160) digest.
    ///
    /// # Errors
    /// Returns [`AddressError::InvalidHashLength`] unless `hash` is exactly 20 bytes.
    pub fn from_ripemd160(
        hash: &[u8],
        script_type: ScriptType,
        chain: &'c ChainParams,
    ) -> Result<Self, AddressError> {
        Self::from_ripemd160_with_hasher(hash, script_type, chain, Hasher)
    }

    /// Parses a Base58Check address belonging to `chain`.
    ///
    /// The script type is taken from the version prefix. When the chain's two prefixes differ
    /// in length, the P2PKH length is tried first and then the P2SH one.
    ///
    /// # Errors
    /// Returns `AddressDecodeError` if the text does not decode, or the version prefix is not
    /// one of `chain`'s.
    pub fn parse(s: &str, chain: &'c ChainParams) -> Result<Self, AddressDecodeError> {
        let attempt = |version_len: usize| -> Result<Self, AddressDecodeError> {
            let decoded = decode_address_with_version_len(s, version_len)?;
            let script_type = decoded
                .script_type(chain)
                .ok_or_else(|| AddressDecodeError::UnknownVersion {
                    version: hex_encode(&decoded.version),
                    chain: chain.name,
                })?;
            Ok(Self::with_parts(
                OnceLock::from(decoded.hash),
                None,
                script_type,
                chain,
                Hasher,
            ))
        };

        let p2pkh_len = chain.p2pkh_version.len();
        let p2sh_len = chain.p2sh_version.len();
        match attempt(p2pkh_len) {
            // a bad character or checksum fails the same way at any prefix length
            Err(e @ AddressDecodeError::Base58(_)) => Err(e),
            Err(_) if p2sh_len != p2pkh_len => attempt(p2sh_len),
            result => result,
        }
    }
}

impl<'c, H: AddressHasher> Address<'c, H> {
    fn with_parts(
        hash: OnceLock<[u8; HASH160_LENGTH]>,
        public_key: Option<Vec<u8>>,
        script_type: ScriptType,
        chain: &'c ChainParams,
        hasher: H,
    ) -> Self {
        Address {
            hash,
            public_key,
            encoded: OnceLock::new(),
            script_type,
            chain,
            hasher,
        }
    }

    /// Like [`Address::from_public_key`], with a custom hasher.
    #[must_use]
    pub fn from_public_key_with_hasher(
        public_key: impl Into<Vec<u8>>,
        chain: &'c ChainParams,
        hasher: H,
    ) -> Self {
        Self::with_parts(
            OnceLock::new(),
            Some(public_key.into()),
            ScriptType::Normal,
            chain,
            hasher,
        )
    }

    /// Like [`Address::from_ripemd160`], with a custom hasher.
    ///
    /// # Errors
    /// Returns [`AddressError::InvalidHashLength`] unless `hash` is exactly 20 bytes.
    pub fn from_ripemd160_with_hasher(
        hash: &[u8],
        script_type: ScriptType,
        chain: &'c ChainParams,
        hasher: H,
    ) -> Result<Self, AddressError> {
        let hash: [u8; HASH160_LENGTH] =
            hash.try_into().map_err(|_| AddressError::InvalidHashLength {
                got: hash.len(),
                expected: HASH160_LENGTH,
            })?;
        Ok(Self::with_parts(
            OnceLock::from(hash),
            None,
            script_type,
            chain,
            hasher,
        ))
    }

    /// The RIPEMD-160 hash behind this address, derived from the public key on first call.
    ///
    /// # Errors
    /// Returns [`AddressError::HashDerivation`] if the hasher rejects the public key, or if
    /// there is neither a hash nor a key.
    pub fn hash(&self) -> Result<&[u8; HASH160_LENGTH], AddressError> {
        if let Some(hash) = self.hash.get() {
            return Ok(hash);
        }
        let public_key = self.public_key.as_deref().ok_or_else(|| {
            AddressError::HashDerivation("neither a hash nor a public key is present".to_string())
        })?;
        let derived = self.hasher.hash160(public_key)?;
        debug!("derived hash160 {} from public key", hex_encode(derived));
        Ok(self.hash.get_or_init(|| derived))
    }

    /// The hex representation of the hash
    ///
    /// # Errors
    /// Same as [`Address::hash`].
    pub fn hash_hex(&self) -> Result<String, AddressError> {
        self.hash().map(hex_encode)
    }

    /// The Base58Check string, encoded on first call.
    ///
    /// # Errors
    /// Same as [`Address::hash`]; nothing else can fail.
    pub fn address(&self) -> Result<&str, AddressError> {
        if let Some(encoded) = self.encoded.get() {
            return Ok(encoded);
        }
        let hash = self.hash()?;
        let version = self.chain.version_for(self.script_type);

        // payload = version || hash
        let mut payload = Vec::with_capacity(version.len() + HASH160_LENGTH);
        payload.extend_from_slice(version);
        payload.extend_from_slice(hash);
        trace!("address payload {}", hex_encode(&payload));

        let encoded = base58::encode_check(&self.hasher, &payload);
        debug!(
            "encoded {:?} address {encoded} on {}",
            self.script_type, self.chain.name
        );
        Ok(self.encoded.get_or_init(|| encoded))
    }

    /// `true` iff this is a pay-to-script-hash address.
    #[must_use]
    pub fn is_p2sh(&self) -> bool {
        self.script_type == ScriptType::P2sh
    }

    /// The script type
    #[must_use]
    pub fn script_type(&self) -> ScriptType {
        self.script_type
    }

    /// The public key, if the address was built from one
    #[must_use]
    pub fn public_key(&self) -> Option<&[u8]> {
        self.public_key.as_deref()
    }

    /// The chain parameters
    #[must_use]
    pub fn chain(&self) -> &'c ChainParams {
        self.chain
    }
}

impl<H: AddressHasher> fmt::Display for Address<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // an unresolvable hash has no textual form
        let s = self.address().map_err(|_| fmt::Error)?;
        f.write_str(s)
    }
}

impl<H: AddressHasher> fmt::Debug for Address<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            Ok(s) => write!(f, "Address(addr={s})"),
            Err(e) => write!(f, "Address(unresolved: {e})"),
        }
    }
}
