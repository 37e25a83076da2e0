//! Base58Check address decoding.

use crate::base58::{decode_check, encode_check};
use crate::chain::ChainParams;
use crate::hasher::{HASH160_LENGTH, Hasher};
use crate::{AddressDecodeError, ScriptType};
use hex::encode as hex_encode;
use std::fmt;

/// The decoded components of a Base58Check address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// The version prefix bytes
    pub version: Vec<u8>,
    /// The Hash160 payload
    pub hash: [u8; HASH160_LENGTH],
}

impl DecodedAddress {
    /// The hex representation of the hash
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex_encode(self.hash)
    }

    /// The script type this version denotes on `chain`, if any.
    #[must_use]
    pub fn script_type(&self, chain: &ChainParams) -> Option<ScriptType> {
        chain.script_type_for(&self.version)
    }

    /// The first built-in chain that recognises this version prefix.
    #[must_use]
    pub fn chain(&self) -> Option<&'static ChainParams> {
        ChainParams::ALL
            .iter()
            .find(|c| c.script_type_for(&self.version).is_some())
    }
}

impl fmt::Display for DecodedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // rebuild the raw payload: [ version…, hash… ]
        let mut payload = Vec::with_capacity(self.version.len() + HASH160_LENGTH);
        payload.extend_from_slice(&self.version);
        payload.extend_from_slice(&self.hash);
        write!(f, "{}", encode_check(&Hasher, &payload))
    }
}

/// Decode a Base58Check address with a single-byte version prefix.
///
/// # Errors
/// See [`decode_address_with_version_len`].
pub fn decode_address(s: &str) -> Result<DecodedAddress, AddressDecodeError> {
    decode_address_with_version_len(s, 1)
}

/// Decode a Base58Check address whose version prefix is `version_len` bytes long.
///
/// # Errors
/// Returns `AddressDecodeError` on any failure:
/// - Bad character or checksum
/// - Payload length other than `version_len + 20`
pub fn decode_address_with_version_len(
    s: &str,
    version_len: usize,
) -> Result<DecodedAddress, AddressDecodeError> {
    let payload = decode_check(&Hasher, s)?;

    let expected = version_len + HASH160_LENGTH;
    if payload.len() != expected {
        return Err(AddressDecodeError::InvalidPayloadLength {
            got: payload.len(),
            expected,
        });
    }

    let (version, hash_bytes) = payload.split_at(version_len);
    let mut hash = [0u8; HASH160_LENGTH];
    hash.copy_from_slice(hash_bytes);

    Ok(DecodedAddress {
        version: version.to_vec(),
        hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base58::DecodeError;
    use crate::chain::{BITCOIN, BITCOIN_TESTNET, DOGECOIN};
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_mainnet_p2pkh() {
        let decoded = decode_address("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2").unwrap();
        assert_eq!(decoded.version, vec![0x00]);
        assert_eq!(decoded.hash, hex!("77bff20c60e522dfaa3350c39b030a5d004e839a"));
        assert_eq!(decoded.hash_hex(), "77bff20c60e522dfaa3350c39b030a5d004e839a");
        assert_eq!(decoded.script_type(&BITCOIN), Some(ScriptType::Normal));
        assert_eq!(decoded.chain(), Some(&BITCOIN));
        assert_eq!(decoded.to_string(), "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2");
    }

    #[test]
    fn decode_mainnet_p2sh() {
        let decoded = decode_address("3Ai1JZ8pdJb2ksieUV8FsxSNVJCpoPi8W6").unwrap();
        assert_eq!(decoded.version, vec![0x05]);
        assert_eq!(decoded.hash, hex!("62e907b15cbf27d5425399ebf6f0fb50ebb88f18"));
        assert_eq!(decoded.script_type(&BITCOIN), Some(ScriptType::P2sh));
        assert_eq!(decoded.script_type(&DOGECOIN), None);
    }

    #[test]
    fn decode_testnet() {
        let decoded = decode_address("mpXwg4jMtRhuSpVq4xS3HFHmCmWp9NyGKt").unwrap();
        assert_eq!(decoded.chain(), Some(&BITCOIN_TESTNET));
    }

    #[test]
    fn decode_two_byte_version() {
        let decoded =
            decode_address_with_version_len("11A1zP1eP5QGefi2DMPTfTL5SLmv7CF73PR", 2).unwrap();
        assert_eq!(decoded.version, vec![0x00, 0x00]);
        assert_eq!(decoded.hash, hex!("62e907b15cbf27d5425399ebf6f0fb50ebb88f18"));
        assert_eq!(decoded.to_string(), "11A1zP1eP5QGefi2DMPTfTL5SLmv7CF73PR");
    }

    #[test]
    fn decode_rejects_wrong_payload_length() {
        assert!(matches!(
            decode_address("11A1zP1eP5QGefi2DMPTfTL5SLmv7CF73PR"),
            Err(AddressDecodeError::InvalidPayloadLength { got: 22, expected: 21 })
        ));
    }

    #[test]
    fn decode_rejects_bad_checksum() {
        assert!(matches!(
            decode_address("1B1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"),
            Err(AddressDecodeError::Base58(DecodeError::ChecksumMismatch { .. }))
        ));
    }
}
