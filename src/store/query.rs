use std::collections::BTreeSet;
use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use super::cache::{CacheKey, QueryCache};
use super::subscriptions::Subscription;
use super::StoreState;
use crate::chain::codec::{merge_results, next_page_key, MessageCodec};
use crate::chain::proto::{
    QueryDelegationsRequest, QueryDelegationsResponse, QueryParamsRequest, QueryParamsResponse,
    QueryPostsRequest, QueryPostsResponse,
};
use crate::chain::rpc::{QueryClient, UnaryMethod};
use crate::error::{ClientError, StoreError};

/// Per-call query behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryOptions {
    /// Re-issue this query on every new block
    pub subscribe: bool,
    /// Follow `pagination.next_key` and merge every page
    pub all: bool,
    /// Page cursor. Always part of the cache key; sent to the node only when the request
    /// type can carry one (see [`CachedQuery::page`])
    pub pagination_cursor: Option<Vec<u8>>,
}

impl QueryOptions {
    pub fn subscribed() -> Self {
        Self {
            subscribe: true,
            ..Default::default()
        }
    }
}

/// A query whose responses the store caches
pub trait CachedQuery: UnaryMethod + Clone + 'static {
    /// Name used in errors and subscriptions, e.g. "QueryPosts"
    const ACTION: &'static str;

    fn cache(state: &StoreState) -> &QueryCache<Self::Response>;
    fn cache_mut(state: &mut StoreState) -> &mut QueryCache<Self::Response>;

    fn subscription(self, options: QueryOptions) -> Subscription;
    fn cached_response(key: CacheKey, response: Self::Response) -> CachedResponse;

    /// This request addressed at page `key`. None of the module's requests has a
    /// pagination field, so the default reports that no page can be addressed.
    fn page(&self, _key: &[u8]) -> Option<Self> {
        None
    }
}

/// A fetched response tagged with the cache it belongs in
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResponse {
    Params(CacheKey, QueryParamsResponse),
    Posts(CacheKey, QueryPostsResponse),
    Delegations(CacheKey, QueryDelegationsResponse),
}

macro_rules! cached_query {
    ($req:ty, $action:literal, $field:ident, $variant:ident) => {
        impl CachedQuery for $req {
            const ACTION: &'static str = $action;

            fn cache(state: &StoreState) -> &QueryCache<Self::Response> {
                &state.$field
            }

            fn cache_mut(state: &mut StoreState) -> &mut QueryCache<Self::Response> {
                &mut state.$field
            }

            fn subscription(self, options: QueryOptions) -> Subscription {
                Subscription::$variant {
                    request: self,
                    options: QueryOptions {
                        subscribe: false,
                        ..options
                    },
                }
            }

            fn cached_response(key: CacheKey, response: Self::Response) -> CachedResponse {
                CachedResponse::$variant(key, response)
            }
        }
    };
}

cached_query!(QueryParamsRequest, "QueryParams", params, Params);
cached_query!(QueryPostsRequest, "QueryPosts", posts, Posts);
cached_query!(QueryDelegationsRequest, "QueryDelegations", delegations, Delegations);

/// Cache key for `request` under `options`
pub fn cache_key<Q: CachedQuery>(request: &Q, cursor: Option<&[u8]>) -> Result<CacheKey, ClientError> {
    let params = request.to_json()?;
    Ok(CacheKey::new(&params, cursor))
}

/// Issue `request` (and, with `all`, every following page the request can address) and
/// return the keyed result
pub(crate) async fn fetch<Q: CachedQuery>(
    client: &QueryClient,
    request: &Q,
    options: &QueryOptions,
) -> Result<(CacheKey, Q::Response), StoreError> {
    let failed = |source: ClientError| StoreError::Query {
        query: Q::ACTION,
        source,
    };

    let cursor = options.pagination_cursor.as_deref();
    let key = cache_key(request, cursor).map_err(failed)?;

    let first = match cursor.and_then(|c| request.page(c)) {
        Some(paged) => client.call(&paged).await,
        None => client.call(request).await,
    }
    .map_err(failed)?;
    if !options.all {
        return Ok((key, first));
    }

    let first = first.to_json().map_err(|e| failed(e.into()))?;
    let merged = collect_pages(first, cursor, |next_key| async move {
        let Some(paged) = request.page(&next_key) else {
            tracing::debug!(query = Q::ACTION, "request carries no page key, keeping first page");
            return Ok(None);
        };
        Ok::<_, ClientError>(Some(client.call(&paged).await?.to_json()?))
    })
    .await
    .map_err(failed)?;

    let response = Q::Response::from_json(&merged).map_err(|e| failed(e.into()))?;
    Ok((key, response))
}

/// Follow `pagination.next_key` from `first`, merging each page in. The walk ends when
/// `next_page` yields nothing or a cursor is seen twice.
pub(crate) async fn collect_pages<F, Fut>(
    first: Value,
    start: Option<&[u8]>,
    mut next_page: F,
) -> Result<Value, ClientError>
where
    F: FnMut(Vec<u8>) -> Fut,
    Fut: Future<Output = Result<Option<Value>, ClientError>>,
{
    let mut seen: BTreeSet<Vec<u8>> = start.map(|c| c.to_vec()).into_iter().collect();
    let mut value = first;

    while let Some(next_key) = next_page_key(&value) {
        if !seen.insert(next_key.clone()) {
            tracing::warn!(pages = seen.len(), "pagination cursor repeated, stopping");
            break;
        }
        match next_page(next_key).await? {
            Some(page) => value = merge_results(value, page),
            None => break,
        }
    }
    Ok(value)
}
