//------------------------------------------------------------------------
// ibc/core/channel/v1/channel.proto (subset) and ibc/core/port/v1/query.proto
//

pub mod core {
    pub mod channel {
        pub mod v1 {
            use serde::{Deserialize, Serialize};

            use crate::chain::codec::{json, MessageCodec};

            /// Order defines if a channel is ORDERED or UNORDERED
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
            #[repr(i32)]
            pub enum Order {
                /// zero-value for channel ordering
                NoneUnspecified = 0,
                /// packets can be delivered in any order, which may differ from the order in
                /// which they were sent.
                Unordered = 1,
                /// packets are delivered exactly in the order which they were sent
                Ordered = 2,
            }

            /// JSON value used for enum numbers outside the schema
            pub const UNRECOGNIZED: i32 = -1;

            impl Order {
                pub fn as_str_name(&self) -> &'static str {
                    match self {
                        Order::NoneUnspecified => "ORDER_NONE_UNSPECIFIED",
                        Order::Unordered => "ORDER_UNORDERED",
                        Order::Ordered => "ORDER_ORDERED",
                    }
                }

                pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
                    match value {
                        "ORDER_NONE_UNSPECIFIED" => Some(Self::NoneUnspecified),
                        "ORDER_UNORDERED" => Some(Self::Unordered),
                        "ORDER_ORDERED" => Some(Self::Ordered),
                        _ => None,
                    }
                }
            }

            /// Serde adapter for an `Order` stored as a raw `i32` field
            pub mod order_json {
                use super::{Order, UNRECOGNIZED};
                use serde::{Deserialize, Deserializer, Serializer};
                use serde_json::Value;

                pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
                    match Order::try_from(*value) {
                        Ok(order) => serializer.serialize_str(order.as_str_name()),
                        Err(_) => serializer.serialize_str("UNKNOWN"),
                    }
                }

                pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
                    let value = match Option::<Value>::deserialize(deserializer)? {
                        None | Some(Value::Null) => return Ok(Order::NoneUnspecified as i32),
                        Some(value) => value,
                    };
                    let order = match &value {
                        Value::Number(n) => n
                            .as_i64()
                            .and_then(|n| i32::try_from(n).ok())
                            .and_then(|n| Order::try_from(n).ok()),
                        Value::String(s) => Order::from_str_name(s),
                        _ => None,
                    };
                    Ok(order.map(|o| o as i32).unwrap_or(UNRECOGNIZED))
                }
            }

            /// Counterparty defines a channel end counterparty
            #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
            #[serde(default)]
            pub struct Counterparty {
                /// port on the counterparty chain which owns the other end of the channel.
                #[prost(string, tag = "1")]
                #[serde(deserialize_with = "json::string")]
                pub port_id: ::prost::alloc::string::String,
                /// channel end on the counterparty chain
                #[prost(string, tag = "2")]
                #[serde(deserialize_with = "json::string")]
                pub channel_id: ::prost::alloc::string::String,
            }

            impl MessageCodec for Counterparty {
                const TYPE_NAME: &'static str = "ibc.core.channel.v1.Counterparty";
            }
        }
    }

    pub mod port {
        pub mod v1 {
            use serde::{Deserialize, Serialize};

            use super::super::channel::v1::{order_json, Counterparty};
            use crate::chain::codec::{json, MessageCodec};

            pub const QUERY_SERVICE: &str = "ibc.core.port.v1.Query";

            /// QueryAppVersionRequest is the request type for the Query/AppVersion RPC method
            #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
            #[serde(default)]
            pub struct QueryAppVersionRequest {
                /// port unique identifier
                #[prost(string, tag = "1")]
                #[serde(deserialize_with = "json::string")]
                pub port_id: ::prost::alloc::string::String,
                /// connection unique identifier
                #[prost(string, tag = "2")]
                #[serde(deserialize_with = "json::string")]
                pub connection_id: ::prost::alloc::string::String,
                /// whether the channel is ordered or unordered
                #[prost(enumeration = "super::super::channel::v1::Order", tag = "3")]
                #[serde(with = "order_json")]
                pub ordering: i32,
                /// counterparty channel end
                #[prost(message, optional, tag = "4")]
                #[serde(skip_serializing_if = "Option::is_none")]
                pub counterparty: ::core::option::Option<Counterparty>,
                /// proposed version
                #[prost(string, tag = "5")]
                #[serde(deserialize_with = "json::string")]
                pub proposed_version: ::prost::alloc::string::String,
            }

            /// QueryAppVersionResponse is the response type for the Query/AppVersion RPC method.
            #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
            #[serde(default)]
            pub struct QueryAppVersionResponse {
                /// port id associated with the request identifiers
                #[prost(string, tag = "1")]
                #[serde(deserialize_with = "json::string")]
                pub port_id: ::prost::alloc::string::String,
                /// supported app version
                #[prost(string, tag = "2")]
                #[serde(deserialize_with = "json::string")]
                pub version: ::prost::alloc::string::String,
            }

            impl MessageCodec for QueryAppVersionRequest {
                const TYPE_NAME: &'static str = "ibc.core.port.v1.QueryAppVersionRequest";
            }

            impl MessageCodec for QueryAppVersionResponse {
                const TYPE_NAME: &'static str = "ibc.core.port.v1.QueryAppVersionResponse";
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::core::channel::v1::{Counterparty, Order, UNRECOGNIZED};
    use super::core::port::v1::QueryAppVersionRequest;
    use crate::chain::codec::MessageCodec;
    use serde_json::json;

    fn request() -> QueryAppVersionRequest {
        QueryAppVersionRequest {
            port_id: "transfer".to_string(),
            connection_id: "connection-0".to_string(),
            ordering: Order::Ordered as i32,
            counterparty: Some(Counterparty {
                port_id: "transfer".to_string(),
                channel_id: "channel-3".to_string(),
            }),
            proposed_version: "ics20-1".to_string(),
        }
    }

    #[test]
    fn test_enum_round_trip() {
        let req = request();
        let bytes = req.to_bytes();
        // ordering is field 3, varint: tag byte 0x18 followed by 2
        assert!(bytes.windows(2).any(|w| w == [0x18, 2]));
        assert_eq!(QueryAppVersionRequest::from_bytes(&bytes).unwrap(), req);
        assert_eq!(req.ordering(), Order::Ordered);
    }

    #[test]
    fn test_enum_json_by_name_or_number() {
        let value = request().to_json().unwrap();
        assert_eq!(value["ordering"], "ORDER_ORDERED");

        let by_number = QueryAppVersionRequest::from_json(&json!({"ordering": 1})).unwrap();
        assert_eq!(by_number.ordering, Order::Unordered as i32);

        let by_name = QueryAppVersionRequest::from_json(&json!({"ordering": "ORDER_ORDERED"})).unwrap();
        assert_eq!(by_name.ordering, Order::Ordered as i32);

        let missing = QueryAppVersionRequest::from_json(&json!({})).unwrap();
        assert_eq!(missing.ordering, 0);
        assert_eq!(missing.counterparty, None);
    }

    #[test]
    fn test_unknown_enum_value() {
        let unknown = QueryAppVersionRequest::from_json(&json!({"ordering": "SIDEWAYS"})).unwrap();
        assert_eq!(unknown.ordering, UNRECOGNIZED);
        assert_eq!(unknown.to_json().unwrap()["ordering"], "UNKNOWN");

        let out_of_range = QueryAppVersionRequest::from_json(&json!({"ordering": 9})).unwrap();
        assert_eq!(out_of_range.ordering, UNRECOGNIZED);
    }
}
