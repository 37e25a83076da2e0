use b58_address::{
    Address, AddressDecodeError, AddressError, ChainParams, HASH160_LENGTH, ScriptType,
    decode_address_with_version_len,
};

/// Genesis block coinbase public key, used when no input is given.
const DEFAULT_INPUT: &str = concat!(
    "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb6",
    "49f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f",
);

/// Usage: `b58_address [HEX] [normal|p2sh] [CHAIN]`
///
/// `HEX` is a 20-byte Hash160 or a SEC1 public key.
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let script_type = match args.next().as_deref() {
        None | Some("normal") => ScriptType::Normal,
        Some("p2sh") => ScriptType::P2sh,
        Some(other) => {
            eprintln!("Unknown script type “{other}”, expected normal or p2sh");
            std::process::exit(2);
        }
    };
    let chain = match args.next() {
        None => &ChainParams::DEFAULT,
        Some(name) => match ChainParams::by_name(&name) {
            Ok(chain) => chain,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        },
    };

    let bytes = match hex::decode(&input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Invalid hex input: {e}");
            std::process::exit(2);
        }
    };

    let addr = match build_address(bytes, script_type, chain) {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let encoded = match addr.address() {
        Ok(encoded) => encoded,
        // Public key rejected by the hasher
        Err(AddressError::HashDerivation(e)) => {
            eprintln!("Hash derivation error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Encoding error: {e}");
            std::process::exit(1);
        }
    };
    println!("Chain                    : {}", chain.name);
    println!("Script Type              : {:?}", addr.script_type());
    println!("Encoded Address          : {encoded}");

    match decode_address_with_version_len(encoded, chain.version_for(addr.script_type()).len()) {
        Ok(decoded) => {
            println!("Decoded Version          : 0x{}", hex::encode(&decoded.version));
            println!("Decoded Hash160 (hex)    : {}", decoded.hash_hex());
        }
        // Bad character or checksum
        Err(AddressDecodeError::Base58(e)) => {
            eprintln!("Base58 decoding error: {e}");
        }
        Err(AddressDecodeError::InvalidPayloadLength { got, expected }) => {
            eprintln!("Invalid payload length: got {got} bytes, expected {expected}");
        }
        Err(AddressDecodeError::UnknownVersion { version, chain }) => {
            eprintln!("Unknown version 0x{version} on {chain}");
        }
    }
}

/// A 20-byte input is a Hash160; anything longer is a public key, which only has a P2PKH form.
fn build_address(
    bytes: Vec<u8>,
    script_type: ScriptType,
    chain: &ChainParams,
) -> Result<Address<'_>, String> {
    if bytes.len() == HASH160_LENGTH {
        return Address::from_ripemd160(&bytes, script_type, chain)
            .map_err(|e| format!("Invalid hash: {e}"));
    }
    match script_type {
        ScriptType::Normal => Ok(Address::from_public_key(bytes, chain)),
        ScriptType::P2sh => Err("A public key only yields a normal (P2PKH) address".to_string()),
    }
}
