//! Base58 and Base58Check codecs.
//!
//! The radix conversion is `bs58`'s. Each leading zero byte becomes one leading `'1'`.
//! The checksum goes through [`AddressHasher`] so callers can swap the digest backend.

use crate::hasher::AddressHasher;
use log::trace;
use thiserror::Error;

/// Length of the Base58Check checksum in bytes.
pub const CHECKSUM_LENGTH: usize = 4;

/// Errors that can occur while decoding Base58 or Base58Check text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Text is not Base58
    #[error("bs58 error: {0}")]
    Bs58(#[from] bs58::decode::Error),

    /// Decoded data cannot even hold the checksum
    #[error("base58check data too short: {0} bytes")]
    TooShort(usize),

    /// Trailing four bytes do not match the double-SHA256 of the payload
    #[error("checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: String, got: String },
}

/// Encodes raw bytes as Base58 with the Bitcoin alphabet (no `0`, `O`, `I` or `l`).
#[must_use]
pub fn encode(input: &[u8]) -> String {
    bs58::encode(input)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decodes Base58 text into raw bytes.
///
/// # Errors
/// Returns [`DecodeError::Bs58`] for any character outside the Bitcoin alphabet.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(bs58::decode(input)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()?)
}

/// First four bytes of `DoubleSHA256(payload)`.
#[must_use]
pub fn checksum<H>(hasher: &H, payload: &[u8]) -> [u8; CHECKSUM_LENGTH]
where
    H: AddressHasher + ?Sized,
{
    let digest = hasher.double_sha256(payload);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// Appends the checksum to `payload` and Base58-encodes the result.
#[must_use]
pub fn encode_check<H: AddressHasher + ?Sized>(hasher: &H, payload: &[u8]) -> String {
    let mut full = Vec::with_capacity(payload.len() + CHECKSUM_LENGTH);
    full.extend_from_slice(payload);
    full.extend_from_slice(&checksum(hasher, payload));
    trace!("base58check encoding {} byte payload", full.len());
    encode(&full)
}

/// Decodes Base58Check text, verifies the checksum, and returns the payload without it.
///
/// # Errors
/// - [`DecodeError::Bs58`] on a bad character
/// - [`DecodeError::TooShort`] if fewer than four bytes decode
/// - [`DecodeError::ChecksumMismatch`] if the checksum does not verify
pub fn decode_check<H>(hasher: &H, input: &str) -> Result<Vec<u8>, DecodeError>
where
    H: AddressHasher + ?Sized,
{
    let mut full = decode(input)?;
    if full.len() < CHECKSUM_LENGTH {
        return Err(DecodeError::TooShort(full.len()));
    }
    let split = full.len() - CHECKSUM_LENGTH;
    let expected = checksum(hasher, &full[..split]);
    if expected[..] != full[split..] {
        return Err(DecodeError::ChecksumMismatch {
            expected: hex::encode(expected),
            got: hex::encode(&full[split..]),
        });
    }
    full.truncate(split);
    Ok(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Hasher;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(&[0]), "1");
        assert_eq!(encode(&[0, 0, 1]), "112");
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(encode(&hex::decode("0000287fb4cd").unwrap()), "11233QC4");
    }

    #[test]
    fn decode_known_values() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("1").unwrap(), vec![0]);
        assert_eq!(decode("112").unwrap(), vec![0, 0, 1]);
        assert_eq!(decode("StV1DL6CwTryKyV").unwrap(), b"hello world".to_vec());
    }

    #[test]
    fn decode_rejects_characters_outside_alphabet() {
        let cases = [("0abc", '0', 0), ("abOc", 'O', 2), ("1I", 'I', 1), ("zzl", 'l', 2)];
        for (input, bad, at) in cases {
            assert!(matches!(
                decode(input),
                Err(DecodeError::Bs58(bs58::decode::Error::InvalidCharacter { character, index }))
                    if character == bad && index == at
            ));
        }
        assert!(matches!(
            decode("ab€"),
            Err(DecodeError::Bs58(bs58::decode::Error::NonAsciiCharacter { index: 2 }))
        ));
    }

    #[test]
    fn checksum_detects_tampering() {
        let addr = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
        let payload = decode_check(&Hasher, addr).unwrap();
        assert_eq!(payload.len(), 21);

        let tampered = addr.replacen('A', "B", 1);
        assert!(matches!(
            decode_check(&Hasher, &tampered),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn decode_check_requires_checksum_bytes() {
        assert_eq!(decode_check(&Hasher, "111").unwrap_err(), DecodeError::TooShort(3));
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }

        #[test]
        fn leading_zero_bytes_become_ones(
            zeros in 0usize..25,
            tail in proptest::collection::vec(1u8..=255, 1..16),
        ) {
            let mut bytes = vec![0u8; zeros];
            bytes.extend(&tail);
            let encoded = encode(&bytes);
            let ones = encoded.chars().take_while(|&c| c == '1').count();
            prop_assert_eq!(ones, zeros);
            let decoded = decode(&encoded).unwrap();
            prop_assert_eq!(decoded.iter().take_while(|&&b| b == 0).count(), zeros);
        }
    }
}
