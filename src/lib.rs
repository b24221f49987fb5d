// Library exports for getsigners_client

pub mod chain;
pub mod config;
pub mod error;
pub mod store;

// Re-export main types for convenience
pub use chain::{GrpcTransport, MessageCodec, QueryClient, Rpc, Secp256k1Wallet, TxClient};
pub use error::{ClientError, CodecError, StoreError};
pub use store::{ModuleStore, NewBlock, QueryOptions};
