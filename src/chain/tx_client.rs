use std::sync::Arc;

use prost::Message;
use serde::Serialize;
use tonic::Status;

use crate::chain::proto::cosmos::auth::v1beta1::{self as auth, BASE_ACCOUNT_TYPE_URL};
use crate::chain::proto::cosmos::base::tendermint::v1beta1 as tendermint;
use crate::chain::proto::cosmos::tx::v1beta1 as tx;
use crate::chain::proto::{
    Any, BaseAccount, BroadcastMode, BroadcastTxRequest, BroadcastTxResponse, Coin,
    GetLatestBlockRequest, GetLatestBlockResponse, QueryAccountRequest, QueryAccountResponse,
};
use crate::chain::rpc::Rpc;
use crate::chain::tx_builder::{TxBuilder, DEFAULT_GAS_LIMIT};
use crate::chain::wallet::OfflineSigner;
use crate::error::{ClientError, CodecError};

/// Account number and sequence needed to sign
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub address: String,
    pub account_number: u64,
    pub sequence: u64,
}

/// Outcome of a broadcast. A non-zero `code` is a chain-side rejection, not a client error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastResult {
    pub height: i64,
    pub txhash: String,
    pub code: u32,
    pub codespace: String,
    pub raw_log: String,
    pub gas_wanted: i64,
    pub gas_used: i64,
}

impl BroadcastResult {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

impl From<tx::TxResponse> for BroadcastResult {
    fn from(response: tx::TxResponse) -> Self {
        Self {
            height: response.height,
            txhash: response.txhash,
            code: response.code,
            codespace: response.codespace,
            raw_log: response.raw_log,
            gas_wanted: response.gas_wanted,
            gas_used: response.gas_used,
        }
    }
}

/// Signs with one account and broadcasts through the tx service
pub struct TxClient {
    rpc: Arc<dyn Rpc>,
    signer: Arc<dyn OfflineSigner>,
    chain_id: Option<String>,
    gas_limit: u64,
}

impl TxClient {
    /// `chain_id` may be left empty, in which case it is read from the latest block header
    pub fn new(rpc: Arc<dyn Rpc>, signer: Arc<dyn OfflineSigner>, chain_id: &str) -> Self {
        Self {
            rpc,
            signer,
            chain_id: (!chain_id.is_empty()).then(|| chain_id.to_string()),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn address(&self) -> &str {
        self.signer.address()
    }

    /// Fetch the signer's account. An account the chain has never seen is reported as
    /// sequence 0 / account number 0.
    pub async fn account(&self) -> Result<AccountInfo, ClientError> {
        let address = self.signer.address().to_string();
        let request = QueryAccountRequest { address: address.clone() };

        let bytes = match self
            .rpc
            .request(auth::QUERY_SERVICE, "Account", request.encode_to_vec())
            .await
        {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => {
                log::info!("Account {} not found on chain, using sequence 0", address);
                return Ok(AccountInfo { address, ..Default::default() });
            }
            Err(e) => return Err(e),
        };

        let response = QueryAccountResponse::decode(&bytes[..]).map_err(CodecError::from)?;
        let any = response
            .account
            .ok_or_else(|| ClientError::UnsupportedAccount("<empty>".to_string()))?;
        decode_account(&any)
    }

    /// Chain id from config, falling back to the latest block header
    pub async fn chain_id(&self) -> Result<String, ClientError> {
        if let Some(chain_id) = &self.chain_id {
            return Ok(chain_id.clone());
        }
        let bytes = self
            .rpc
            .request(tendermint::SERVICE, "GetLatestBlock", GetLatestBlockRequest {}.encode_to_vec())
            .await?;
        let response = GetLatestBlockResponse::decode(&bytes[..]).map_err(CodecError::from)?;
        response
            .block
            .and_then(|b| b.header)
            .map(|h| h.chain_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ClientError::Status(Status::failed_precondition("latest block carries no chain id")))
    }

    /// Sign `messages` and broadcast them in BROADCAST_MODE_SYNC
    pub async fn sign_and_broadcast(
        &self,
        messages: Vec<Any>,
        fee: Vec<Coin>,
        memo: &str,
    ) -> Result<BroadcastResult, ClientError> {
        let account = self.account().await?;
        let chain_id = self.chain_id().await?;

        log::debug!(
            "Signing {} message(s) for {} (account {}, sequence {}) on {}",
            messages.len(),
            account.address,
            account.account_number,
            account.sequence,
            chain_id
        );

        let tx_bytes = TxBuilder::new(chain_id, account.account_number, account.sequence, self.signer.as_ref())
            .with_gas_limit(self.gas_limit)
            .with_fee(fee)
            .build_tx(messages, memo)?;

        let request = BroadcastTxRequest {
            tx_bytes,
            mode: BroadcastMode::Sync as i32,
        };
        let bytes = self
            .rpc
            .request(tx::SERVICE, "BroadcastTx", request.encode_to_vec())
            .await?;
        let response = BroadcastTxResponse::decode(&bytes[..]).map_err(CodecError::from)?;
        let result: BroadcastResult = response
            .tx_response
            .ok_or_else(|| ClientError::Status(Status::internal("broadcast returned no tx_response")))?
            .into();

        if result.is_ok() {
            log::info!("Broadcast {} accepted", result.txhash);
        } else {
            log::warn!("Broadcast {} rejected with code {}: {}", result.txhash, result.code, result.raw_log);
        }
        Ok(result)
    }
}

fn decode_account(any: &Any) -> Result<AccountInfo, ClientError> {
    if any.type_url != BASE_ACCOUNT_TYPE_URL {
        log::warn!("Unsupported account type: {}", any.type_url);
        return Err(ClientError::UnsupportedAccount(any.type_url.clone()));
    }
    let account = BaseAccount::decode(&any.value[..]).map_err(CodecError::from)?;
    Ok(AccountInfo {
        address: account.address,
        account_number: account.account_number,
        sequence: account.sequence,
    })
}
