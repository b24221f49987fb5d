mod keys;
mod signer;

pub use keys::{pubkey_to_address, Secp256k1Wallet, DEFAULT_PREFIX};
pub use signer::OfflineSigner;
