//! Protobuf types for the incorrect_getsigners module and the cosmos/ibc messages the
//! client touches. The structs mirror what prost-build emits for the schemas; the module
//! types additionally carry serde attributes for the JSON codec.

pub mod cosmos;
pub mod ibc;
pub mod incorrectgetsigners;

// Re-export commonly used types for convenience
pub use cosmos::base::v1beta1::Coin;
pub use cosmos::tx::v1beta1::{
    AuthInfo, BroadcastMode, BroadcastTxRequest, BroadcastTxResponse, Fee, ModeInfo, SignDoc,
    SignMode, SignerInfo, TxBody, TxRaw, TxResponse,
};
pub use cosmos::auth::v1beta1::{BaseAccount, QueryAccountRequest, QueryAccountResponse};
pub use cosmos::base::tendermint::v1beta1::{GetLatestBlockRequest, GetLatestBlockResponse};
pub use incorrectgetsigners::{
    Delegation, GenesisState, MsgCreatePost, MsgCreatePostResponse, MsgDelegate,
    MsgDelegatePost, MsgDelegatePostResponse, MsgDelegateResponse, Params, Post,
    QueryDelegationsRequest, QueryDelegationsResponse, QueryParamsRequest, QueryParamsResponse,
    QueryPostsRequest, QueryPostsResponse,
};
pub use prost_types::Any;
