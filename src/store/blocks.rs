use std::sync::Arc;
use std::time::Duration;

use prost::Message;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::chain::proto::cosmos::base::tendermint::v1beta1::SERVICE;
use crate::chain::proto::{GetLatestBlockRequest, GetLatestBlockResponse};
use crate::chain::rpc::Rpc;
use crate::error::{ClientError, CodecError};

/// "A new block was committed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBlock {
    pub height: i64,
}

/// Polls the latest block height and emits [`NewBlock`] for every height increase
pub struct BlockWatcher {
    rpc: Arc<dyn Rpc>,
    poll_interval: Duration,
}

impl BlockWatcher {
    pub fn new(rpc: Arc<dyn Rpc>, poll_interval: Duration) -> Self {
        Self { rpc, poll_interval }
    }

    pub async fn latest_height(&self) -> Result<i64, ClientError> {
        let bytes = self
            .rpc
            .request(SERVICE, "GetLatestBlock", GetLatestBlockRequest {}.encode_to_vec())
            .await?;
        let response = GetLatestBlockResponse::decode(&bytes[..]).map_err(CodecError::from)?;
        Ok(response
            .block
            .and_then(|b| b.header)
            .map(|h| h.height)
            .unwrap_or_default())
    }

    /// Run until the receiving side is dropped, checked on every tick
    pub fn spawn(self, events: mpsc::Sender<NewBlock>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last_height = 0i64;

            info!(interval_ms = self.poll_interval.as_millis() as u64, "block watcher started");
            loop {
                ticker.tick().await;
                if events.is_closed() {
                    break;
                }

                let height = match self.latest_height().await {
                    Ok(height) => height,
                    Err(e) => {
                        warn!("failed to fetch latest block: {}", e);
                        continue;
                    }
                };
                if height <= last_height {
                    continue;
                }
                last_height = height;

                debug!(height, "new block");
                if events.send(NewBlock { height }).await.is_err() {
                    break;
                }
            }
            info!("block watcher stopped");
        })
    }
}
