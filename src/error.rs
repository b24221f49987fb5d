//! Error types shared by the codec, the RPC clients and the query store

/// Failures raised while converting a single message to or from bytes/JSON
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("wire decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("{type_name}.{field} = {value} is larger than Number.MAX_SAFE_INTEGER")]
    Overflow {
        type_name: &'static str,
        field: &'static str,
        value: u64,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures at the RPC boundary (transport, chain-side rejection, signing)
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("rpc status {}: {}", .0.code(), .0.message())]
    Status(#[from] tonic::Status),

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("client not connected, call connect() first")]
    NotConnected,

    #[error("invalid rpc path: {0}")]
    InvalidPath(String),

    #[error("unsupported account type: {0}")]
    UnsupportedAccount(String),

    #[error("unknown message type url: {0}")]
    UnknownTypeUrl(String),

    #[error("{0}")]
    InvalidMsg(String),

    #[error(transparent)]
    Wallet(#[from] anyhow::Error),
}

impl ClientError {
    /// True when the node answered with gRPC `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status(status) if status.code() == tonic::Code::NotFound)
    }
}

/// Errors surfaced by the module store, each naming the failing operation
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("QueryClient:{query} API Node Unavailable. Could not perform query: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("TxClient:{msg}:Init Could not initialize signing client. Wallet is required.")]
    MissingWallet { msg: &'static str },

    #[error("TxClient:{msg}:Send Could not broadcast Tx: {source}")]
    Broadcast {
        msg: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("TxClient:{msg}:Create Could not create message: {source}")]
    Create {
        msg: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("Subscriptions: {0}")]
    Subscription(#[source] Box<StoreError>),
}
