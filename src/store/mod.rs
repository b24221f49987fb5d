//! Query cache for the incorrect_getsigners module
//!
//! Responses are cached under a canonical key of their request parameters, subscriptions are
//! replayed on every new block and module messages are signed and broadcast through an
//! optional [`TxClient`].

pub mod blocks;
pub mod cache;
pub mod query;
pub mod structure;
pub mod subscriptions;

pub use blocks::{BlockWatcher, NewBlock};
pub use cache::{CacheKey, QueryCache};
pub use query::{CachedQuery, CachedResponse, QueryOptions};
pub use structure::{FieldStructure, TypeStructures};
pub use subscriptions::{Subscription, SubscriptionSet};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::chain::messages::{self, ModuleMessage};
use crate::chain::proto::{
    Any, Coin, QueryDelegationsRequest, QueryDelegationsResponse, QueryParamsRequest,
    QueryParamsResponse, QueryPostsRequest, QueryPostsResponse,
};
use crate::chain::rpc::{QueryClient, Rpc};
use crate::chain::tx_client::{BroadcastResult, TxClient};
use crate::chain::wallet::DEFAULT_PREFIX;
use crate::error::{CodecError, StoreError};

pub const MODULE_NAME: &str = "trailofbits.incorrect_getsigners.incorrectgetsigners";

/// Cached responses and live subscriptions
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub params: QueryCache<QueryParamsResponse>,
    pub posts: QueryCache<QueryPostsResponse>,
    pub delegations: QueryCache<QueryDelegationsResponse>,
    pub subscriptions: SubscriptionSet,
}

impl StoreState {
    fn apply(&mut self, response: CachedResponse) {
        match response {
            CachedResponse::Params(key, value) => {
                self.params.insert(key, value);
            }
            CachedResponse::Posts(key, value) => {
                self.posts.insert(key, value);
            }
            CachedResponse::Delegations(key, value) => {
                self.delegations.insert(key, value);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Reset,
}

/// Result of one subscription replay round
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub refreshed: usize,
    pub errors: Vec<StoreError>,
}

impl ReplayReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// State container for one module. Owned by a single caller; RPCs run concurrently.
pub struct ModuleStore {
    client: QueryClient,
    tx: Option<TxClient>,
    state: StoreState,
    structures: TypeStructures,
    lifecycle: Lifecycle,
    address_prefix: String,
}

impl ModuleStore {
    pub fn new(rpc: Arc<dyn Rpc>) -> Result<Self, CodecError> {
        Ok(Self {
            client: QueryClient::new(rpc),
            tx: None,
            state: StoreState::default(),
            structures: TypeStructures::build()?,
            lifecycle: Lifecycle::Uninitialized,
            address_prefix: DEFAULT_PREFIX.to_string(),
        })
    }

    /// Attach a signing client, enabling `send_msg` and `encode_msg`
    pub fn with_tx_client(mut self, tx: TxClient) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Bech32 account prefix message addresses are validated against
    pub fn with_address_prefix(mut self, prefix: &str) -> Self {
        self.address_prefix = prefix.to_string();
        self
    }

    pub fn init(&mut self) {
        if self.lifecycle != Lifecycle::Initialized {
            info!(module = MODULE_NAME, "module store initialized");
            self.lifecycle = Lifecycle::Initialized;
        }
    }

    /// Drop every cached response and subscription
    pub fn reset(&mut self) {
        self.state = StoreState::default();
        self.lifecycle = Lifecycle::Reset;
        info!(module = MODULE_NAME, "module store reset");
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn query_client(&self) -> &QueryClient {
        &self.client
    }

    /// Address of the attached signing wallet
    pub fn signer_address(&self) -> Option<&str> {
        self.tx.as_ref().map(|tx| tx.address())
    }

    /// Fetch, cache, and optionally subscribe
    pub async fn query<Q: CachedQuery>(
        &mut self,
        request: Q,
        options: QueryOptions,
    ) -> Result<Q::Response, StoreError> {
        self.init();

        let (key, response) = query::fetch(&self.client, &request, &options).await?;
        debug!(query = Q::ACTION, key = %key, "query cached");
        Q::cache_mut(&mut self.state).insert(key, response.clone());

        if options.subscribe {
            self.subscribe(request.subscription(options));
        }
        Ok(response)
    }

    pub async fn query_params(&mut self, options: QueryOptions) -> Result<QueryParamsResponse, StoreError> {
        self.query(QueryParamsRequest {}, options).await
    }

    pub async fn query_posts(&mut self, options: QueryOptions) -> Result<QueryPostsResponse, StoreError> {
        self.query(QueryPostsRequest {}, options).await
    }

    pub async fn query_delegations(
        &mut self,
        options: QueryOptions,
    ) -> Result<QueryDelegationsResponse, StoreError> {
        self.query(QueryDelegationsRequest {}, options).await
    }

    /// Cached response for `(request, cursor)`, without issuing an RPC
    pub fn cached<Q: CachedQuery>(&self, request: &Q, cursor: Option<&[u8]>) -> Option<&Q::Response> {
        let key = query::cache_key(request, cursor).ok()?;
        Q::cache(&self.state).get(&key)
    }

    pub fn subscribe(&mut self, subscription: Subscription) -> bool {
        let added = self.state.subscriptions.insert(subscription);
        if added {
            debug!(count = self.state.subscriptions.len(), "subscription added");
        }
        added
    }

    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        self.state.subscriptions.remove(subscription)
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.state.subscriptions.iter()
    }

    /// Field layout of a stored type ("Delegation", "Params" or "Post")
    pub fn type_structure(&self, type_name: &str) -> Option<&[FieldStructure]> {
        self.structures.get(type_name)
    }

    /// Type URLs of the module's messages
    pub fn registry(&self) -> Vec<String> {
        messages::registry()
    }

    /// Re-issue every subscription concurrently and apply results as they complete. One
    /// failing subscription does not stop the others.
    pub async fn store_update(&mut self) -> ReplayReport {
        let mut tasks = JoinSet::new();
        for subscription in self.state.subscriptions.iter().cloned() {
            let client = self.client.clone();
            tasks.spawn(subscription.replay(client));
        }

        let mut report = ReplayReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(response)) => {
                    self.state.apply(response);
                    report.refreshed += 1;
                }
                Ok(Err(e)) => {
                    let e = StoreError::Subscription(Box::new(e));
                    warn!("{}", e);
                    report.errors.push(e);
                }
                Err(e) => error!("subscription replay task failed: {}", e),
            }
        }
        report
    }

    pub async fn on_new_block(&mut self, block: NewBlock) -> ReplayReport {
        debug!(height = block.height, subs = self.state.subscriptions.len(), "replaying subscriptions");
        self.store_update().await
    }

    /// Replay subscriptions for every event until the sender side closes
    pub async fn follow(&mut self, mut events: mpsc::Receiver<NewBlock>) {
        self.init();
        while let Some(block) = events.recv().await {
            let report = self.on_new_block(block).await;
            info!(
                height = block.height,
                refreshed = report.refreshed,
                failed = report.errors.len(),
                "store updated"
            );
        }
    }

    /// Sign and broadcast a single module message
    pub async fn send_msg<M: ModuleMessage>(
        &self,
        msg: M,
        fee: Vec<Coin>,
        memo: &str,
    ) -> Result<BroadcastResult, StoreError> {
        let tx = self.tx.as_ref().ok_or(StoreError::MissingWallet { msg: M::NAME })?;
        let broadcast_failed = |source| StoreError::Broadcast { msg: M::NAME, source };

        msg.validate_basic(&self.address_prefix).map_err(broadcast_failed)?;
        tx.sign_and_broadcast(vec![msg.to_any()], fee, memo)
            .await
            .map_err(broadcast_failed)
    }

    /// Build the `Any` that `send_msg` would include in the transaction
    pub fn encode_msg<M: ModuleMessage>(&self, msg: M) -> Result<Any, StoreError> {
        if self.tx.is_none() {
            return Err(StoreError::MissingWallet { msg: M::NAME });
        }
        msg.validate_basic(&self.address_prefix)
            .map_err(|source| StoreError::Create { msg: M::NAME, source })?;
        Ok(msg.to_any())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::codec::MessageCodec;
    use crate::chain::messages::TEST_ADDRESS;
    use crate::chain::proto::incorrectgetsigners::QUERY_SERVICE;
    use crate::chain::proto::{MsgCreatePost, Post};
    use crate::chain::rpc::mock::MockRpc;
    use crate::chain::wallet::Secp256k1Wallet;
    use crate::error::ClientError;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;
    use tonic::Status;

    fn post(id: u64) -> Post {
        Post {
            author: TEST_ADDRESS.to_string(),
            title: format!("post {}", id),
            body: "body".to_string(),
            id,
        }
    }

    fn store(rpc: Arc<MockRpc>) -> ModuleStore {
        ModuleStore::new(rpc).unwrap()
    }

    /// Posts grows by one on every call
    fn growing_posts(rpc: &MockRpc) {
        let next = AtomicU64::new(0);
        rpc.on(QUERY_SERVICE, "Posts", move |_| {
            let n = next.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(QueryPostsResponse {
                post: (0..n).map(post).collect(),
            }
            .to_bytes())
        });
    }

    #[tokio::test]
    async fn test_query_caches_under_canonical_key() {
        let rpc = Arc::new(MockRpc::new());
        growing_posts(&rpc);
        let mut store = store(rpc.clone());
        assert_eq!(store.lifecycle(), Lifecycle::Uninitialized);

        let response = store.query_posts(QueryOptions::default()).await.unwrap();
        assert_eq!(response.post.len(), 1);
        assert_eq!(store.lifecycle(), Lifecycle::Initialized);

        let cached = store.cached(&QueryPostsRequest {}, None).unwrap();
        assert_eq!(cached, &response);
        assert!(store.cached(&QueryPostsRequest {}, Some(b"page2")).is_none());

        // Write-through: a second query refetches and overwrites
        store.query_posts(QueryOptions::default()).await.unwrap();
        assert_eq!(store.cached(&QueryPostsRequest {}, None).unwrap().post.len(), 2);
        assert_eq!(store.state().posts.len(), 1);
        assert_eq!(rpc.call_count("Posts"), 2);
    }

    #[tokio::test]
    async fn test_query_failure_names_the_query() {
        let rpc = Arc::new(MockRpc::new());
        rpc.on(QUERY_SERVICE, "Delegations", |_| {
            Err(ClientError::Status(Status::unavailable("connection refused")))
        });
        let mut store = store(rpc);

        let err = store.query_delegations(QueryOptions::default()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with(
            "QueryClient:QueryDelegations API Node Unavailable. Could not perform query: "
        ));
        assert!(message.contains("connection refused"));
        assert!(store.state().delegations.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_dedups_and_replays() {
        let rpc = Arc::new(MockRpc::new());
        growing_posts(&rpc);
        rpc.respond(QUERY_SERVICE, "Params", QueryParamsResponse { params: None });
        let mut store = store(rpc.clone());

        store.query_posts(QueryOptions::subscribed()).await.unwrap();
        store.query_posts(QueryOptions::subscribed()).await.unwrap();
        store.query_params(QueryOptions::subscribed()).await.unwrap();
        assert_eq!(store.subscriptions().count(), 2);

        let report = store.on_new_block(NewBlock { height: 10 }).await;
        assert!(report.is_ok());
        assert_eq!(report.refreshed, 2);
        assert_eq!(store.cached(&QueryPostsRequest {}, None).unwrap().post.len(), 3);
        assert_eq!(rpc.call_count("Params"), 2);
    }

    #[tokio::test]
    async fn test_replay_continues_past_failure() {
        let rpc = Arc::new(MockRpc::new());
        growing_posts(&rpc);
        let mut store = store(rpc.clone());

        store.query_posts(QueryOptions::subscribed()).await.unwrap();
        // Delegations has no handler, so its replay fails
        store.subscribe(QueryDelegationsRequest {}.subscription(QueryOptions::default()));

        let report = store.store_update().await;
        assert_eq!(report.refreshed, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0]
            .to_string()
            .starts_with("Subscriptions: QueryClient:QueryDelegations API Node Unavailable."));
        assert_eq!(store.cached(&QueryPostsRequest {}, None).unwrap().post.len(), 2);
    }

    #[tokio::test]
    async fn test_same_key_replays_last_completion_wins() {
        let rpc = Arc::new(MockRpc::new());
        growing_posts(&rpc);
        // The first replay is dispatched first but finishes last
        rpc.delay(QUERY_SERVICE, "Posts", |n| match n {
            1 => Duration::from_millis(50),
            _ => Duration::ZERO,
        });
        let mut store = store(rpc.clone());

        store.query_posts(QueryOptions::subscribed()).await.unwrap();
        let all = QueryOptions { all: true, ..Default::default() };
        assert!(store.subscribe(QueryPostsRequest {}.subscription(all)));
        assert_eq!(store.subscriptions().count(), 2);

        let report = store.store_update().await;
        assert_eq!(report.refreshed, 2);
        assert_eq!(rpc.call_count("Posts"), 3);
        assert_eq!(store.state().posts.len(), 1);
        // Call 2 answered with two posts and completed after call 3 (three posts)
        assert_eq!(store.cached(&QueryPostsRequest {}, None).unwrap().post.len(), 2);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_replay() {
        let rpc = Arc::new(MockRpc::new());
        growing_posts(&rpc);
        let mut store = store(rpc.clone());

        store.query_posts(QueryOptions::subscribed()).await.unwrap();
        let subscription = QueryPostsRequest {}.subscription(QueryOptions::default());
        assert!(store.unsubscribe(&subscription));

        let report = store.store_update().await;
        assert_eq!(report.refreshed, 0);
        assert_eq!(rpc.call_count("Posts"), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let rpc = Arc::new(MockRpc::new());
        growing_posts(&rpc);
        let mut store = store(rpc);

        store.query_posts(QueryOptions::subscribed()).await.unwrap();
        store.reset();

        assert_eq!(store.lifecycle(), Lifecycle::Reset);
        assert!(store.state().posts.is_empty());
        assert!(store.state().subscriptions.is_empty());
        assert!(store.cached(&QueryPostsRequest {}, None).is_none());
    }

    #[tokio::test]
    async fn test_follow_replays_per_block() {
        let rpc = Arc::new(MockRpc::new());
        growing_posts(&rpc);
        let mut store = store(rpc.clone());
        store.query_posts(QueryOptions::subscribed()).await.unwrap();

        let (tx, rx) = mpsc::channel(4);
        tx.send(NewBlock { height: 1 }).await.unwrap();
        tx.send(NewBlock { height: 2 }).await.unwrap();
        drop(tx);
        store.follow(rx).await;

        assert_eq!(rpc.call_count("Posts"), 3);
        assert_eq!(store.cached(&QueryPostsRequest {}, None).unwrap().post.len(), 3);
    }

    #[tokio::test]
    async fn test_send_without_wallet() {
        let store = store(Arc::new(MockRpc::new()));
        let msg = MsgCreatePost::new(TEST_ADDRESS, "t", "b");

        let err = store.send_msg(msg.clone(), vec![], "").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "TxClient:MsgCreatePost:Init Could not initialize signing client. Wallet is required."
        );
        assert!(matches!(
            store.encode_msg(msg).unwrap_err(),
            StoreError::MissingWallet { msg: "MsgCreatePost" }
        ));
    }

    #[tokio::test]
    async fn test_send_and_encode_with_wallet() {
        let rpc = Arc::new(MockRpc::new());
        let wallet = Secp256k1Wallet::from_mnemonic_default(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap();
        let tx = TxClient::new(rpc.clone(), Arc::new(wallet), "localnet");
        let store = store(rpc).with_tx_client(tx);

        let any = store.encode_msg(MsgCreatePost::new(TEST_ADDRESS, "t", "b")).unwrap();
        assert_eq!(any.type_url, MsgCreatePost::type_url());

        let err = store.encode_msg(MsgCreatePost::new("nobody", "t", "b")).unwrap_err();
        assert!(err.to_string().starts_with("TxClient:MsgCreatePost:Create Could not create message: "));

        let osmo = store.with_address_prefix("osmo");
        let err = osmo.encode_msg(MsgCreatePost::new(TEST_ADDRESS, "t", "b")).unwrap_err();
        assert!(err.to_string().contains("expected osmo, got cosmos"));
        let store = osmo.with_address_prefix("cosmos");

        // No account handler: the account lookup fails and surfaces as a broadcast error
        let err = store
            .send_msg(MsgCreatePost::new(TEST_ADDRESS, "t", "b"), vec![], "")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("TxClient:MsgCreatePost:Send Could not broadcast Tx: "));
    }

    #[test]
    fn test_structure_and_registry() {
        let store = store(Arc::new(MockRpc::new()));
        assert_eq!(store.type_structure("Post").unwrap().len(), 4);
        assert!(store.type_structure("Unknown").is_none());
        assert_eq!(store.registry().len(), 3);
    }
}
