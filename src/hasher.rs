//! Hash collaborators used by address derivation.

use crate::AddressError;
use ripemd::Ripemd160;
use sha2::{Digest as ShaDigest, Sha256};

/// Length of a Hash160 digest in bytes.
pub const HASH160_LENGTH: usize = 20;

/// The two digests an address needs.
///
/// [`Hasher`] is the real implementation. Anything else (a counting double in tests, an
/// accelerated backend) only has to agree with it byte for byte.
pub trait AddressHasher {
    /// `RIPEMD160(SHA256(public_key))`.
    ///
    /// # Errors
    /// Returns [`AddressError::HashDerivation`] if `public_key` is not an acceptable key.
    fn hash160(&self, public_key: &[u8]) -> Result<[u8; HASH160_LENGTH], AddressError>;

    /// `SHA256(SHA256(data))`.
    fn double_sha256(&self, data: &[u8]) -> [u8; 32];
}

/// The default hasher for `b58_address`: SHA-256 and RIPEMD-160 from RustCrypto.
///
/// Public keys must have a SEC1 shape: 33 bytes starting `0x02`/`0x03`, or 65 bytes
/// starting `0x04` (or the hybrid `0x06`/`0x07`). The curve point itself is not checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hasher;

impl Hasher {
    /// Compute SHA-256(data).
    #[must_use]
    pub fn sha256(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    fn check_public_key(public_key: &[u8]) -> Result<(), AddressError> {
        match (public_key.len(), public_key.first()) {
            (33, Some(0x02 | 0x03)) | (65, Some(0x04 | 0x06 | 0x07)) => Ok(()),
            (0, _) => Err(AddressError::HashDerivation("public key is empty".to_string())),
            (len, Some(prefix)) => Err(AddressError::HashDerivation(format!(
                "malformed public key: {len} bytes with prefix 0x{prefix:02x}"
            ))),
            (len, None) => Err(AddressError::HashDerivation(format!(
                "malformed public key: {len} bytes"
            ))),
        }
    }
}

impl AddressHasher for Hasher {
    fn hash160(&self, public_key: &[u8]) -> Result<[u8; HASH160_LENGTH], AddressError> {
        Self::check_public_key(public_key)?;
        let sha = Sha256::digest(public_key);
        Ok(Ripemd160::digest(sha).into())
    }

    fn double_sha256(&self, data: &[u8]) -> [u8; 32] {
        Self::sha256(&Self::sha256(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const GENESIS_PUBKEY: [u8; 65] = hex!(
        "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb6"
        "49f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f"
    );

    #[test]
    fn hash160_uncompressed_key() {
        assert_eq!(
            Hasher.hash160(&GENESIS_PUBKEY).unwrap(),
            hex!("62e907b15cbf27d5425399ebf6f0fb50ebb88f18")
        );
    }

    #[test]
    fn hash160_compressed_key() {
        let pubkey = hex!("0250863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352");
        assert_eq!(
            Hasher.hash160(&pubkey).unwrap(),
            hex!("f54a5851e9372b87810a8e60cdd2e7cfd80b6e31")
        );
    }

    #[test]
    fn hash160_rejects_malformed_keys() {
        assert!(matches!(Hasher.hash160(&[]), Err(AddressError::HashDerivation(_))));
        assert!(matches!(Hasher.hash160(&[0x02; 32]), Err(AddressError::HashDerivation(_))));
        assert!(matches!(Hasher.hash160(&[0x05; 33]), Err(AddressError::HashDerivation(_))));
        let mut wrong_prefix = GENESIS_PUBKEY;
        wrong_prefix[0] = 0x02;
        assert!(matches!(Hasher.hash160(&wrong_prefix), Err(AddressError::HashDerivation(_))));
    }

    #[test]
    fn double_sha256_known_value() {
        let data = hex!("0123456789abcdef");
        assert_eq!(
            hex::encode(Hasher.double_sha256(&data)),
            "137ad663f79da06e282ed0abbec4d70523ced5ff8e39d5c2e5641d978c5925aa"
        );
    }
}
