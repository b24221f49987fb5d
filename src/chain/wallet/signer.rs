use anyhow::Result;
use secp256k1::{Message, Secp256k1};
use sha2::{Digest, Sha256};

use super::Secp256k1Wallet;
use crate::chain::proto::SignDoc;
use prost::Message as _;

/// Anything able to produce SIGN_MODE_DIRECT signatures for one account
pub trait OfflineSigner: Send + Sync {
    /// Bech32 account address
    fn address(&self) -> &str;

    /// Compressed secp256k1 public key
    fn public_key(&self) -> [u8; 33];

    /// 64-byte compact signature over sha256 of the encoded `SignDoc`
    fn sign_direct(&self, sign_doc: &SignDoc) -> Result<Vec<u8>>;
}

impl OfflineSigner for Secp256k1Wallet {
    fn address(&self) -> &str {
        &self.address
    }

    fn public_key(&self) -> [u8; 33] {
        self.public_key_compressed()
    }

    fn sign_direct(&self, sign_doc: &SignDoc) -> Result<Vec<u8>> {
        let sign_doc_bytes = sign_doc.encode_to_vec();
        let sign_hash: [u8; 32] = Sha256::digest(&sign_doc_bytes).into();

        let secp = Secp256k1::signing_only();
        let message = Message::from_digest_slice(&sign_hash)?;
        let private_key = self.private_key()?;
        let signature = secp.sign_ecdsa(&message, &private_key);

        Ok(signature.serialize_compact().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::ecdsa::Signature;
    use secp256k1::PublicKey;

    fn wallet() -> Secp256k1Wallet {
        Secp256k1Wallet::from_mnemonic_default(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap()
    }

    fn sign_doc() -> SignDoc {
        SignDoc {
            body_bytes: vec![1, 2, 3],
            auth_info_bytes: vec![4, 5, 6],
            chain_id: "incorrectgetsigners".to_string(),
            account_number: 7,
        }
    }

    #[test]
    fn test_sign_direct_verifies() {
        let wallet = wallet();
        let signature = wallet.sign_direct(&sign_doc()).unwrap();
        assert_eq!(signature.len(), 64);

        // Deterministic (RFC 6979)
        assert_eq!(signature, wallet.sign_direct(&sign_doc()).unwrap());

        let hash: [u8; 32] = Sha256::digest(sign_doc().encode_to_vec()).into();
        let secp = Secp256k1::verification_only();
        let message = Message::from_digest_slice(&hash).unwrap();
        let sig = Signature::from_compact(&signature).unwrap();
        let pubkey = PublicKey::from_slice(&wallet.public_key()).unwrap();
        assert!(secp.verify_ecdsa(&message, &sig, &pubkey).is_ok());
    }

    #[test]
    fn test_signature_covers_chain_id() {
        let wallet = wallet();
        let mut other = sign_doc();
        other.chain_id = "other".to_string();
        assert_ne!(
            wallet.sign_direct(&sign_doc()).unwrap(),
            wallet.sign_direct(&other).unwrap()
        );
    }
}
