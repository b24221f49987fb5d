//------------------------------------------------------------------------
// trailofbits/incorrect_getsigners/incorrectgetsigners/{params,post,delegation,genesis,tx,query}.proto
//

use serde::{Deserialize, Serialize};

use crate::chain::codec::{ensure_safe, json, MessageCodec};
use crate::error::CodecError;

pub const PACKAGE: &str = "trailofbits.incorrect_getsigners.incorrectgetsigners";
pub const QUERY_SERVICE: &str = "trailofbits.incorrect_getsigners.incorrectgetsigners.Query";
pub const MSG_SERVICE: &str = "trailofbits.incorrect_getsigners.incorrectgetsigners.Msg";

/// Params defines the parameters for the module.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "json::string")]
    pub author: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "json::string")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    #[serde(deserialize_with = "json::string")]
    pub body: ::prost::alloc::string::String,
    #[prost(uint64, tag = "4")]
    #[serde(deserialize_with = "json::uint64")]
    pub id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Delegation {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "json::string")]
    pub delegator: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "json::string")]
    pub delegatee: ::prost::alloc::string::String,
}

/// GenesisState defines the module's genesis state.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisState {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "json::message")]
    pub params: ::core::option::Option<Params>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgCreatePost {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "json::string")]
    pub author: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "json::string")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    #[serde(deserialize_with = "json::string")]
    pub body: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgCreatePostResponse {
    #[prost(uint64, tag = "1")]
    #[serde(deserialize_with = "json::uint64")]
    pub id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgDelegate {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "json::string")]
    pub delegator: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "json::string")]
    pub delegatee: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgDelegateResponse {}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgDelegatePost {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "json::string")]
    pub delegator: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "json::string")]
    pub delegatee: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "json::message")]
    pub post: ::core::option::Option<Post>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgDelegatePostResponse {
    #[prost(uint64, tag = "1")]
    #[serde(deserialize_with = "json::uint64")]
    pub id: u64,
}

/// QueryParamsRequest is request type for the Query/Params RPC method.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParamsRequest {}

/// QueryParamsResponse is response type for the Query/Params RPC method.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParamsResponse {
    /// params holds all the parameters of this module.
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "json::message")]
    pub params: ::core::option::Option<Params>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryPostsRequest {}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryPostsResponse {
    #[prost(message, repeated, tag = "1")]
    #[serde(rename = "Post", deserialize_with = "json::messages")]
    pub post: ::prost::alloc::vec::Vec<Post>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDelegationsRequest {}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDelegationsResponse {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "json::messages")]
    pub delegation: ::prost::alloc::vec::Vec<Delegation>,
}

macro_rules! impl_codec {
    ($($ty:ident),* $(,)?) => {
        $(
            impl MessageCodec for $ty {
                const TYPE_NAME: &'static str =
                    concat!("trailofbits.incorrect_getsigners.incorrectgetsigners.", stringify!($ty));
            }
        )*
    };
}

impl_codec!(
    Params,
    Delegation,
    GenesisState,
    MsgCreatePost,
    MsgDelegate,
    MsgDelegateResponse,
    QueryParamsRequest,
    QueryParamsResponse,
    QueryPostsRequest,
    QueryDelegationsRequest,
    QueryDelegationsResponse,
);

impl MessageCodec for Post {
    const TYPE_NAME: &'static str = "trailofbits.incorrect_getsigners.incorrectgetsigners.Post";

    fn check_safe_integers(&self) -> Result<(), CodecError> {
        ensure_safe("Post", "id", self.id)
    }
}

impl MessageCodec for MsgCreatePostResponse {
    const TYPE_NAME: &'static str =
        "trailofbits.incorrect_getsigners.incorrectgetsigners.MsgCreatePostResponse";

    fn check_safe_integers(&self) -> Result<(), CodecError> {
        ensure_safe("MsgCreatePostResponse", "id", self.id)
    }
}

impl MessageCodec for MsgDelegatePost {
    const TYPE_NAME: &'static str =
        "trailofbits.incorrect_getsigners.incorrectgetsigners.MsgDelegatePost";

    fn check_safe_integers(&self) -> Result<(), CodecError> {
        match &self.post {
            Some(post) => post.check_safe_integers(),
            None => Ok(()),
        }
    }
}

impl MessageCodec for MsgDelegatePostResponse {
    const TYPE_NAME: &'static str =
        "trailofbits.incorrect_getsigners.incorrectgetsigners.MsgDelegatePostResponse";

    fn check_safe_integers(&self) -> Result<(), CodecError> {
        ensure_safe("MsgDelegatePostResponse", "id", self.id)
    }
}

impl MessageCodec for QueryPostsResponse {
    const TYPE_NAME: &'static str =
        "trailofbits.incorrect_getsigners.incorrectgetsigners.QueryPostsResponse";

    fn check_safe_integers(&self) -> Result<(), CodecError> {
        self.post.iter().try_for_each(Post::check_safe_integers)
    }
}
