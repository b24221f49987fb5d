use anyhow::Result;
use bip39::Mnemonic;
use bip32::{XPrv, ChildNumber};
use ripemd::Ripemd160;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use bech32::{self, Hrp};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Cosmos coin type from SLIP-44
const COSMOS_COIN_TYPE: u32 = 118;
pub const DEFAULT_PREFIX: &str = "cosmos";

/// Secure wallet for a Cosmos SDK chain
/// Implements BIP32 HD derivation on m/44'/118'/0'/0/0 and zeroizes key material on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Secp256k1Wallet {
    #[zeroize(skip)] // Public data doesn't need zeroizing
    pub address: String,

    private_key_bytes: [u8; 32],
    public_key_bytes: [u8; 33],
}

impl Secp256k1Wallet {
    /// Create a wallet from a BIP39 mnemonic phrase, a passphrase and a bech32 prefix
    pub fn from_mnemonic(mnemonic_str: &str, passphrase: &str, prefix: &str) -> Result<Self> {
        let mnemonic = Mnemonic::parse(mnemonic_str)?;
        let mut seed = mnemonic.to_seed(passphrase);

        let mut private_key = derive_private_key_bip32(&seed)?;
        seed.zeroize();

        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_slice(&private_key)?;
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);

        let public_key_bytes = public_key.serialize();
        let address = pubkey_to_address(&public_key_bytes, prefix)?;

        let private_key_bytes = private_key;
        private_key.zeroize();

        Ok(Self {
            address,
            private_key_bytes,
            public_key_bytes,
        })
    }

    /// Create a `cosmos`-prefixed wallet with no passphrase
    pub fn from_mnemonic_default(mnemonic_str: &str) -> Result<Self> {
        Self::from_mnemonic(mnemonic_str, "", DEFAULT_PREFIX)
    }

    /// Get the private key as a SecretKey (for signing)
    /// Note: Caller is responsible for secure handling
    pub fn private_key(&self) -> Result<SecretKey> {
        SecretKey::from_slice(&self.private_key_bytes)
            .map_err(|e| anyhow::anyhow!("Invalid private key: {}", e))
    }

    /// Compressed public key (33 bytes)
    pub fn public_key_compressed(&self) -> [u8; 33] {
        self.public_key_bytes
    }
}

impl std::fmt::Debug for Secp256k1Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derive the account 0 / index 0 key for coin type 118
fn derive_private_key_bip32(seed: &[u8]) -> Result<[u8; 32]> {
    let xprv = XPrv::new(seed)
        .map_err(|e| anyhow::anyhow!("Failed to create XPrv from seed: {}", e))?;

    let derived = xprv
        .derive_child(ChildNumber::new(44, true)?)  // 44'
        .and_then(|k| k.derive_child(ChildNumber::new(COSMOS_COIN_TYPE, true)?))  // 118'
        .and_then(|k| k.derive_child(ChildNumber::new(0, true)?))   // 0'
        .and_then(|k| k.derive_child(ChildNumber::new(0, false)?))  // 0
        .and_then(|k| k.derive_child(ChildNumber::new(0, false)?))  // 0
        .map_err(|e| anyhow::anyhow!("Failed to derive key: {}", e))?;

    Ok(derived.to_bytes())
}

/// bech32(prefix, ripemd160(sha256(compressed pubkey)))
pub fn pubkey_to_address(compressed: &[u8; 33], prefix: &str) -> Result<String> {
    let sha = Sha256::digest(compressed);
    let addr_bytes = Ripemd160::digest(sha);

    let hrp = Hrp::parse(prefix)?;
    let encoded = bech32::encode::<bech32::Bech32>(hrp, &addr_bytes)?;

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_wallet_generation_with_bip32() {
        let wallet = Secp256k1Wallet::from_mnemonic_default(MNEMONIC).unwrap();

        assert!(wallet.address.starts_with("cosmos1"));
        assert_eq!(wallet.address.len(), 45);

        let pubkey = wallet.public_key_compressed();
        assert!(pubkey[0] == 0x02 || pubkey[0] == 0x03);
        assert_eq!(pubkey_to_address(&pubkey, "cosmos").unwrap(), wallet.address);
    }

    #[test]
    fn test_wallet_with_passphrase() {
        let wallet1 = Secp256k1Wallet::from_mnemonic(MNEMONIC, "", "cosmos").unwrap();
        let wallet2 = Secp256k1Wallet::from_mnemonic(MNEMONIC, "test123", "cosmos").unwrap();
        assert_ne!(wallet1.address, wallet2.address);

        let wallet3 = Secp256k1Wallet::from_mnemonic(MNEMONIC, "test123", "cosmos").unwrap();
        assert_eq!(wallet2.address, wallet3.address);
    }

    #[test]
    fn test_prefix_changes_only_the_hrp() {
        let cosmos = Secp256k1Wallet::from_mnemonic(MNEMONIC, "", "cosmos").unwrap();
        let osmo = Secp256k1Wallet::from_mnemonic(MNEMONIC, "", "osmo").unwrap();
        assert!(osmo.address.starts_with("osmo1"));
        let (_, a) = bech32::decode(&cosmos.address).unwrap();
        let (_, b) = bech32::decode(&osmo.address).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn test_invalid_mnemonic() {
        assert!(Secp256k1Wallet::from_mnemonic_default("not a mnemonic").is_err());
    }
}
