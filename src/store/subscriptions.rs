use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::query::{fetch, CachedQuery, CachedResponse, QueryOptions};
use crate::chain::codec::{canonical_json, MessageCodec};
use crate::chain::proto::{QueryDelegationsRequest, QueryParamsRequest, QueryPostsRequest};
use crate::chain::rpc::QueryClient;
use crate::error::StoreError;

/// A query to re-issue on every new block
#[derive(Debug, Clone, PartialEq)]
pub enum Subscription {
    Params {
        request: QueryParamsRequest,
        options: QueryOptions,
    },
    Posts {
        request: QueryPostsRequest,
        options: QueryOptions,
    },
    Delegations {
        request: QueryDelegationsRequest,
        options: QueryOptions,
    },
}

impl Subscription {
    pub fn action(&self) -> &'static str {
        match self {
            Subscription::Params { .. } => QueryParamsRequest::ACTION,
            Subscription::Posts { .. } => QueryPostsRequest::ACTION,
            Subscription::Delegations { .. } => QueryDelegationsRequest::ACTION,
        }
    }

    /// Identity used for dedup: action, parameters and paging options
    pub fn key(&self) -> String {
        let (params, options) = match self {
            Subscription::Params { request, options } => (request.to_json(), options),
            Subscription::Posts { request, options } => (request.to_json(), options),
            Subscription::Delegations { request, options } => (request.to_json(), options),
        };
        let payload = json!({
            "options": { "all": options.all },
            "params": params.unwrap_or(Value::Null),
            "query": options.pagination_cursor,
        });
        canonical_json(&json!({ "action": self.action(), "payload": payload }))
    }

    /// Re-run the query; the caller applies the response
    pub(crate) async fn replay(self, client: QueryClient) -> Result<CachedResponse, StoreError> {
        match self {
            Subscription::Params { request, options } => replay_one(&client, &request, &options).await,
            Subscription::Posts { request, options } => replay_one(&client, &request, &options).await,
            Subscription::Delegations { request, options } => {
                replay_one(&client, &request, &options).await
            }
        }
    }
}

async fn replay_one<Q: CachedQuery>(
    client: &QueryClient,
    request: &Q,
    options: &QueryOptions,
) -> Result<CachedResponse, StoreError> {
    let (key, response) = fetch(client, request, options).await?;
    Ok(Q::cached_response(key, response))
}

/// Subscriptions keyed by [`Subscription::key`]; re-adding an equal one is a no-op
#[derive(Debug, Clone, Default)]
pub struct SubscriptionSet {
    entries: BTreeMap<String, Subscription>,
}

impl SubscriptionSet {
    /// Returns false when an equal subscription was already present
    pub fn insert(&mut self, subscription: Subscription) -> bool {
        let key = subscription.key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, subscription);
        true
    }

    pub fn remove(&mut self, subscription: &Subscription) -> bool {
        self.entries.remove(&subscription.key()).is_some()
    }

    pub fn contains(&self, subscription: &Subscription) -> bool {
        self.entries.contains_key(&subscription.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.entries.values()
    }
}
