pub mod codec;
pub mod messages;
pub mod proto;
pub mod rpc;
pub mod tx_builder;
pub mod tx_client;
pub mod wallet;

pub use codec::MessageCodec;
pub use messages::{ModuleMessage, ModuleMsg};
pub use rpc::{ClientConfig, GrpcTransport, MsgClient, QueryClient, Rpc, UnaryMethod};
pub use tx_builder::{parse_coins, TxBuilder, DEFAULT_GAS_LIMIT};
pub use tx_client::{AccountInfo, BroadcastResult, TxClient};
pub use wallet::{OfflineSigner, Secp256k1Wallet};
