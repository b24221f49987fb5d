//------------------------------------------------------------------------
// Subsets of the cosmos-sdk protos needed to sign, broadcast and follow blocks.
// Only the fields this client reads or writes are declared; anything else the node
// sends is skipped by the decoder.
//

pub mod base {
    pub mod v1beta1 {
        /// Coin defines a token with a denomination and an amount.
        #[derive(Clone, PartialEq, Eq, ::prost::Message)]
        pub struct Coin {
            #[prost(string, tag = "1")]
            pub denom: ::prost::alloc::string::String,
            #[prost(string, tag = "2")]
            pub amount: ::prost::alloc::string::String,
        }
    }

    pub mod tendermint {
        pub mod v1beta1 {
            pub const SERVICE: &str = "cosmos.base.tendermint.v1beta1.Service";

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GetLatestBlockRequest {}

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GetLatestBlockResponse {
                #[prost(message, optional, tag = "2")]
                pub block: ::core::option::Option<Block>,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Block {
                #[prost(message, optional, tag = "1")]
                pub header: ::core::option::Option<Header>,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Header {
                #[prost(string, tag = "2")]
                pub chain_id: ::prost::alloc::string::String,
                #[prost(int64, tag = "3")]
                pub height: i64,
            }
        }
    }
}

pub mod crypto {
    pub mod secp256k1 {
        pub const PUB_KEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

        /// Compressed 33-byte secp256k1 public key
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct PubKey {
            #[prost(bytes = "vec", tag = "1")]
            pub key: ::prost::alloc::vec::Vec<u8>,
        }
    }
}

pub mod auth {
    pub mod v1beta1 {
        pub const QUERY_SERVICE: &str = "cosmos.auth.v1beta1.Query";
        pub const BASE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.BaseAccount";

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct BaseAccount {
            #[prost(string, tag = "1")]
            pub address: ::prost::alloc::string::String,
            #[prost(message, optional, tag = "2")]
            pub pub_key: ::core::option::Option<::prost_types::Any>,
            #[prost(uint64, tag = "3")]
            pub account_number: u64,
            #[prost(uint64, tag = "4")]
            pub sequence: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct QueryAccountRequest {
            #[prost(string, tag = "1")]
            pub address: ::prost::alloc::string::String,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct QueryAccountResponse {
            #[prost(message, optional, tag = "1")]
            pub account: ::core::option::Option<::prost_types::Any>,
        }
    }
}

pub mod tx {
    pub mod v1beta1 {
        use super::super::base::v1beta1::Coin;

        pub const SERVICE: &str = "cosmos.tx.v1beta1.Service";

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct TxBody {
            #[prost(message, repeated, tag = "1")]
            pub messages: ::prost::alloc::vec::Vec<::prost_types::Any>,
            #[prost(string, tag = "2")]
            pub memo: ::prost::alloc::string::String,
            #[prost(uint64, tag = "3")]
            pub timeout_height: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct AuthInfo {
            #[prost(message, repeated, tag = "1")]
            pub signer_infos: ::prost::alloc::vec::Vec<SignerInfo>,
            #[prost(message, optional, tag = "2")]
            pub fee: ::core::option::Option<Fee>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct SignerInfo {
            #[prost(message, optional, tag = "1")]
            pub public_key: ::core::option::Option<::prost_types::Any>,
            #[prost(message, optional, tag = "2")]
            pub mode_info: ::core::option::Option<ModeInfo>,
            #[prost(uint64, tag = "3")]
            pub sequence: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ModeInfo {
            #[prost(oneof = "mode_info::Sum", tags = "1")]
            pub sum: ::core::option::Option<mode_info::Sum>,
        }

        /// Nested message and enum types in `ModeInfo`.
        pub mod mode_info {
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Single {
                #[prost(enumeration = "super::SignMode", tag = "1")]
                pub mode: i32,
            }

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum Sum {
                #[prost(message, tag = "1")]
                Single(Single),
            }
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum SignMode {
            Unspecified = 0,
            Direct = 1,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Fee {
            #[prost(message, repeated, tag = "1")]
            pub amount: ::prost::alloc::vec::Vec<Coin>,
            #[prost(uint64, tag = "2")]
            pub gas_limit: u64,
            #[prost(string, tag = "3")]
            pub payer: ::prost::alloc::string::String,
            #[prost(string, tag = "4")]
            pub granter: ::prost::alloc::string::String,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct SignDoc {
            #[prost(bytes = "vec", tag = "1")]
            pub body_bytes: ::prost::alloc::vec::Vec<u8>,
            #[prost(bytes = "vec", tag = "2")]
            pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
            #[prost(string, tag = "3")]
            pub chain_id: ::prost::alloc::string::String,
            #[prost(uint64, tag = "4")]
            pub account_number: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct TxRaw {
            #[prost(bytes = "vec", tag = "1")]
            pub body_bytes: ::prost::alloc::vec::Vec<u8>,
            #[prost(bytes = "vec", tag = "2")]
            pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
            #[prost(bytes = "vec", repeated, tag = "3")]
            pub signatures: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum BroadcastMode {
            Unspecified = 0,
            Block = 1,
            Sync = 2,
            Async = 3,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct BroadcastTxRequest {
            #[prost(bytes = "vec", tag = "1")]
            pub tx_bytes: ::prost::alloc::vec::Vec<u8>,
            #[prost(enumeration = "BroadcastMode", tag = "2")]
            pub mode: i32,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct BroadcastTxResponse {
            #[prost(message, optional, tag = "1")]
            pub tx_response: ::core::option::Option<TxResponse>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct TxResponse {
            #[prost(int64, tag = "1")]
            pub height: i64,
            #[prost(string, tag = "2")]
            pub txhash: ::prost::alloc::string::String,
            #[prost(string, tag = "3")]
            pub codespace: ::prost::alloc::string::String,
            #[prost(uint32, tag = "4")]
            pub code: u32,
            #[prost(string, tag = "6")]
            pub raw_log: ::prost::alloc::string::String,
            #[prost(int64, tag = "9")]
            pub gas_wanted: i64,
            #[prost(int64, tag = "10")]
            pub gas_used: i64,
        }
    }
}
