//! SIGN_MODE_DIRECT transaction builder over the cosmos-sdk tx protos

use anyhow::{Result, anyhow};
use prost::Message;

use crate::chain::proto::{
    Any, AuthInfo, Coin, Fee, ModeInfo, SignDoc, SignMode, SignerInfo, TxBody, TxRaw,
};
use crate::chain::proto::cosmos::crypto::secp256k1::{PubKey, PUB_KEY_TYPE_URL};
use crate::chain::proto::cosmos::tx::v1beta1::mode_info;
use crate::chain::wallet::OfflineSigner;

/// Gas limit used by the module's generated tx client
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// Complete transaction builder for a single-signer Cosmos SDK transaction
pub struct TxBuilder<'a> {
    chain_id: String,
    account_number: u64,
    sequence: u64,
    gas_limit: u64,
    fee_amount: Vec<Coin>,
    signer: &'a dyn OfflineSigner,
}

impl<'a> TxBuilder<'a> {
    pub fn new(
        chain_id: String,
        account_number: u64,
        sequence: u64,
        signer: &'a dyn OfflineSigner,
    ) -> Self {
        Self {
            chain_id,
            account_number,
            sequence,
            gas_limit: DEFAULT_GAS_LIMIT,
            fee_amount: Vec::new(),
            signer,
        }
    }

    /// Builder pattern method to set gas limit
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Builder pattern method to set the fee coins
    pub fn with_fee(mut self, amount: Vec<Coin>) -> Self {
        self.fee_amount = amount;
        self
    }

    /// Build and sign a transaction carrying `messages`; returns encoded `TxRaw` bytes
    pub fn build_tx(&self, messages: Vec<Any>, memo: &str) -> Result<Vec<u8>> {
        if messages.is_empty() {
            return Err(anyhow!("Transaction must carry at least one message"));
        }

        let tx_body = TxBody {
            messages,
            memo: memo.to_string(),
            timeout_height: 0,
        };

        let fee = Fee {
            amount: self.fee_amount.clone(),
            gas_limit: self.gas_limit,
            payer: String::new(),
            granter: String::new(),
        };

        let pub_key_any = Any {
            type_url: PUB_KEY_TYPE_URL.to_string(),
            value: PubKey {
                key: self.signer.public_key().to_vec(),
            }
            .encode_to_vec(),
        };

        let signer_info = SignerInfo {
            public_key: Some(pub_key_any),
            mode_info: Some(ModeInfo {
                sum: Some(mode_info::Sum::Single(mode_info::Single {
                    mode: SignMode::Direct as i32,
                })),
            }),
            sequence: self.sequence,
        };

        let auth_info = AuthInfo {
            signer_infos: vec![signer_info],
            fee: Some(fee),
        };

        let body_bytes = tx_body.encode_to_vec();
        let auth_info_bytes = auth_info.encode_to_vec();

        let sign_doc = SignDoc {
            body_bytes: body_bytes.clone(),
            auth_info_bytes: auth_info_bytes.clone(),
            chain_id: self.chain_id.clone(),
            account_number: self.account_number,
        };

        let signature = self.signer.sign_direct(&sign_doc)?;

        let tx_raw = TxRaw {
            body_bytes,
            auth_info_bytes,
            signatures: vec![signature],
        };

        Ok(tx_raw.encode_to_vec())
    }
}

/// Parse a coin list like "100stake" or "100stake,5token"; empty input means no fee
pub fn parse_coins(input: &str) -> Result<Vec<Coin>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_coin)
        .collect()
}

fn parse_coin(coin: &str) -> Result<Coin> {
    let split_pos = coin
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| anyhow!("Invalid coin format (missing denom): {}", coin))?;

    let (amount_str, denom) = coin.split_at(split_pos);
    if amount_str.is_empty() {
        return Err(anyhow!("Invalid coin format (missing amount): {}", coin));
    }
    let amount: u128 = amount_str.parse()?;

    Ok(Coin {
        denom: denom.to_string(),
        amount: amount.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::wallet::Secp256k1Wallet;

    fn wallet() -> Secp256k1Wallet {
        Secp256k1Wallet::from_mnemonic_default(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap()
    }

    #[test]
    fn test_transaction_building() {
        let wallet = wallet();
        let builder = TxBuilder::new("incorrectgetsigners".to_string(), 3, 9, &wallet)
            .with_fee(parse_coins("10stake").unwrap());

        let msg = Any {
            type_url: "/trailofbits.incorrect_getsigners.incorrectgetsigners.MsgCreatePost".to_string(),
            value: vec![0x0a, 0x01, b'a'],
        };
        let tx = builder.build_tx(vec![msg.clone()], "memo").unwrap();

        let raw = TxRaw::decode(&tx[..]).unwrap();
        assert_eq!(raw.signatures.len(), 1);
        assert_eq!(raw.signatures[0].len(), 64);

        let body = TxBody::decode(&raw.body_bytes[..]).unwrap();
        assert_eq!(body.messages, vec![msg]);
        assert_eq!(body.memo, "memo");

        let auth_info = AuthInfo::decode(&raw.auth_info_bytes[..]).unwrap();
        let fee = auth_info.fee.unwrap();
        assert_eq!(fee.gas_limit, DEFAULT_GAS_LIMIT);
        assert_eq!(fee.amount[0].denom, "stake");
        assert_eq!(auth_info.signer_infos[0].sequence, 9);
        let key = auth_info.signer_infos[0].public_key.as_ref().unwrap();
        assert_eq!(key.type_url, PUB_KEY_TYPE_URL);
    }

    #[test]
    fn test_empty_messages_rejected() {
        let wallet = wallet();
        let builder = TxBuilder::new("c".to_string(), 0, 0, &wallet);
        assert!(builder.build_tx(vec![], "").is_err());
    }

    #[test]
    fn test_coin_parsing() {
        let coins = parse_coins("100stake, 5token").unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].amount, "100");
        assert_eq!(coins[0].denom, "stake");
        assert_eq!(coins[1].denom, "token");

        assert!(parse_coins("").unwrap().is_empty());
        assert!(parse_coins("stake").is_err());
        assert!(parse_coins("100").is_err());
    }
}
