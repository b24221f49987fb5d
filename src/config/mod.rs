use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chain::ClientConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chain: ChainConfig,
    pub tx: TxConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub grpc_endpoint: String,
    /// Empty means "read it from the latest block"
    #[serde(default)]
    pub chain_id: String,
    pub address_prefix: String,
    pub connection_timeout: u64,
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxConfig {
    // Note: Mnemonic should be provided via environment variable GETSIGNERS_MNEMONIC
    // Never store sensitive keys in config files!
    pub gas_limit: u64,
    /// Fee coins, e.g. "0stake" or "200stake,1token"
    #[serde(default)]
    pub fee: String,
    #[serde(default)]
    pub memo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Block height poll interval for `watch`, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain: ChainConfig {
                grpc_endpoint: "http://localhost:9090".to_string(),
                chain_id: String::new(),
                address_prefix: "cosmos".to_string(),
                connection_timeout: 10,
                request_timeout: 30,
            },
            tx: TxConfig {
                gas_limit: 200_000,
                fee: String::new(),
                memo: String::new(),
            },
            store: StoreConfig {
                poll_interval_ms: 1_000,
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            grpc_endpoint: self.chain.grpc_endpoint.clone(),
            connection_timeout: self.chain.connection_timeout,
            request_timeout: self.chain.request_timeout,
        }
    }
}
