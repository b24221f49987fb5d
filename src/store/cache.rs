use std::collections::BTreeMap;
use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};

use crate::chain::codec::canonical_json;

/// Canonical form of `{params, query}`; structurally equal parameters give equal keys
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(params: &Value, cursor: Option<&[u8]>) -> Self {
        let query = match cursor {
            Some(key) => Value::String(BASE64.encode(key)),
            None => Value::Null,
        };
        CacheKey(canonical_json(&json!({ "params": params, "query": query })))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Most recent successful response per key, for one query
#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    entries: BTreeMap<CacheKey, V>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> QueryCache<V> {
    pub fn get(&self, key: &CacheKey) -> Option<&V> {
        self.entries.get(key)
    }

    /// Write-through: a later response for the same key always wins
    pub fn insert(&mut self, key: CacheKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheKey, &V)> {
        self.entries.iter()
    }
}
