//! Generic message codec shared by every module type
//!
//! Binary framing is delegated to `prost`; the JSON side follows the conventions of the
//! generated TypeScript bindings: missing or null fields take the type default, string
//! fields coerce scalars, integer fields accept numbers or decimal strings, and every
//! 64-bit integer must stay within `Number.MAX_SAFE_INTEGER`.

use prost::Message;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::CodecError;

/// Largest integer a JSON consumer can represent without losing precision (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// encode / decode / from_json / to_json / from_partial for one message type
pub trait MessageCodec: Message + Default + Serialize + DeserializeOwned + Sized {
    /// Fully-qualified protobuf name, without the leading slash
    const TYPE_NAME: &'static str;

    /// Type URL used when the message is packed into an `Any`
    fn type_url() -> String {
        format!("/{}", Self::TYPE_NAME)
    }

    /// Reject integer fields that would overflow a JSON number. Types without 64-bit
    /// integers keep the default.
    fn check_safe_integers(&self) -> Result<(), CodecError> {
        Ok(())
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    fn from_bytes(buf: &[u8]) -> Result<Self, CodecError> {
        let message = Self::decode(buf)?;
        message.check_safe_integers()?;
        Ok(message)
    }

    fn from_json(value: &Value) -> Result<Self, CodecError> {
        if !value.is_object() {
            return Ok(Self::default());
        }
        let message: Self = serde_json::from_value(value.clone())?;
        message.check_safe_integers()?;
        Ok(message)
    }

    fn to_json(&self) -> Result<Value, CodecError> {
        self.check_safe_integers()?;
        Ok(serde_json::to_value(self)?)
    }

    /// Deep-merge `partial` onto the default instance
    fn from_partial(partial: &Value) -> Result<Self, CodecError> {
        let base = Self::default().to_json()?;
        Self::from_json(&deep_merge(base, partial))
    }
}

/// Fail with [`CodecError::Overflow`] when `value` exceeds [`MAX_SAFE_INTEGER`]
pub fn ensure_safe(type_name: &'static str, field: &'static str, value: u64) -> Result<(), CodecError> {
    if value > MAX_SAFE_INTEGER {
        return Err(CodecError::Overflow { type_name, field, value });
    }
    Ok(())
}

/// Recursively overlay `partial` on `base`. Objects merge key by key, `null` keeps the
/// base value, anything else replaces it.
pub fn deep_merge(base: Value, partial: &Value) -> Value {
    match (base, partial) {
        (Value::Object(mut base), Value::Object(partial)) => {
            for (key, value) in partial {
                let current = base.remove(key).unwrap_or(Value::Null);
                base.insert(key.clone(), deep_merge(current, value));
            }
            Value::Object(base)
        }
        (base, Value::Null) => base,
        (_, partial) => partial.clone(),
    }
}

/// Fold a follow-up page into the accumulated result: arrays are concatenated, every
/// other property is replaced by the newer page's value.
pub fn merge_results(value: Value, next: Value) -> Value {
    let (mut value, next) = match (value, next) {
        (Value::Object(value), Value::Object(next)) => (value, next),
        (_, next) => return next,
    };
    for (key, incoming) in next {
        match (value.remove(&key), incoming) {
            (Some(Value::Array(mut existing)), Value::Array(more)) => {
                existing.extend(more);
                value.insert(key, Value::Array(existing));
            }
            (_, incoming) => {
                value.insert(key, incoming);
            }
        }
    }
    Value::Object(value)
}

/// Serialize `value` with object keys sorted at every level, so structurally equal
/// values always produce the same string regardless of insertion order.
///
/// Plain `Value::to_string` only sorts while serde_json's `preserve_order` feature is off,
/// and any crate in the graph can turn it on.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Helpers for `#[serde(deserialize_with = ...)]` on message fields
pub mod json {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// String field: null/missing becomes "", other scalars are stringified
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        })
    }

    /// 64-bit unsigned field: accepts a JSON number or a decimal string
    pub fn uint64<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
                .ok_or_else(|| D::Error::custom(format!("invalid unsigned integer {}", n))),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|e| D::Error::custom(format!("invalid unsigned integer {:?}: {}", s, e))),
            Some(other) => Err(D::Error::custom(format!("expected an integer, found {}", other))),
        }
    }

    /// Optional nested message: null/missing is absent, any other non-object is the
    /// default instance
    pub fn message<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => element(value).map(Some).map_err(D::Error::custom),
        }
    }

    /// Repeated message field: a non-array becomes an empty sequence, non-object
    /// elements become default instances
    pub fn messages<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(element)
                .collect::<Result<_, _>>()
                .map_err(D::Error::custom),
            _ => Ok(Vec::new()),
        }
    }

    fn element<T: DeserializeOwned + Default>(value: Value) -> Result<T, serde_json::Error> {
        match value {
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(T::default()),
        }
    }
}

/// Read `pagination.next_key` (base64, as emitted by the REST gateway) from a response.
/// An empty key means there are no more pages.
pub fn next_page_key(response: &Value) -> Option<Vec<u8>> {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

    let key = response.get("pagination")?.get("next_key")?.as_str()?;
    if key.is_empty() {
        return None;
    }
    BASE64.decode(key).ok().filter(|bytes| !bytes.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_recurses_and_ignores_null() {
        let base = json!({"a": "", "nested": {"x": 0, "y": "keep"}});
        let merged = deep_merge(base, &json!({"a": "set", "nested": {"x": 5}, "b": null}));
        assert_eq!(merged, json!({"a": "set", "nested": {"x": 5, "y": "keep"}, "b": null}));
    }

    #[test]
    fn test_merge_results_concatenates_arrays() {
        let first = json!({"Post": [{"id": 0}], "pagination": {"next_key": "AQ=="}});
        let second = json!({"Post": [{"id": 1}], "pagination": {"next_key": ""}});
        let merged = merge_results(first, second);
        assert_eq!(merged["Post"], json!([{"id": 0}, {"id": 1}]));
        assert_eq!(merged["pagination"]["next_key"], "");
    }

    #[test]
    fn test_canonical_json_is_order_independent() {
        let a: Value = serde_json::from_str(r#"{"b": 1, "a": {"d": [1, 2], "c": null}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a": {"c": null, "d": [1, 2]}, "b": 1}"#).unwrap();
        assert_eq!(canonical_json(&a), canonical_json(&b));
        assert_eq!(canonical_json(&a), r#"{"a":{"c":null,"d":[1,2]},"b":1}"#);
    }

    #[test]
    fn test_next_page_key() {
        assert_eq!(next_page_key(&json!({"pagination": {"next_key": "AQID"}})), Some(vec![1, 2, 3]));
        assert_eq!(next_page_key(&json!({"pagination": {"next_key": ""}})), None);
        assert_eq!(next_page_key(&json!({"pagination": null})), None);
        assert_eq!(next_page_key(&json!({})), None);
    }

    #[test]
    fn test_ensure_safe_boundary() {
        assert!(ensure_safe("T", "id", MAX_SAFE_INTEGER).is_ok());
        let err = ensure_safe("T", "id", MAX_SAFE_INTEGER + 1).unwrap_err();
        assert!(matches!(err, CodecError::Overflow { field: "id", .. }));
    }
}
