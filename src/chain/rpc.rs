use async_trait::async_trait;
use prost::bytes::{Buf, BufMut};
use std::sync::Arc;
use std::time::Duration;
use tonic::codec::{DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::Status;

use crate::chain::codec::MessageCodec;
use crate::chain::proto::ibc::core::port::v1 as port;
use crate::chain::proto::incorrectgetsigners::{self as module, MSG_SERVICE, QUERY_SERVICE};
use crate::error::ClientError;

/// The only transport capability the clients depend on
#[async_trait]
pub trait Rpc: Send + Sync {
    async fn request(&self, service: &str, method: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError>;
}

/// Configuration for the gRPC transport
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// gRPC endpoint URL (e.g., "http://localhost:9090")
    pub grpc_endpoint: String,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            grpc_endpoint: "http://localhost:9090".to_string(),
            connection_timeout: 10,
            request_timeout: 30,
        }
    }
}

/// gRPC transport carrying already-encoded protobuf bytes
#[derive(Clone)]
pub struct GrpcTransport {
    config: ClientConfig,
    channel: Option<Channel>,
}

impl GrpcTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, channel: None }
    }

    /// Connect to the gRPC endpoint
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        log::info!("Connecting to {}", self.config.grpc_endpoint);

        let mut endpoint = Endpoint::from_shared(self.config.grpc_endpoint.clone())?
            .timeout(Duration::from_secs(self.config.request_timeout))
            .connect_timeout(Duration::from_secs(self.config.connection_timeout));
        if self.config.grpc_endpoint.starts_with("https://") {
            endpoint = endpoint.tls_config(ClientTlsConfig::new())?;
        }

        let channel = endpoint.connect().await?;
        self.channel = Some(channel);

        log::info!("Connected to {}", self.config.grpc_endpoint);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_some()
    }

    fn channel(&self) -> Result<Channel, ClientError> {
        self.channel.clone().ok_or(ClientError::NotConnected)
    }
}

#[async_trait]
impl Rpc for GrpcTransport {
    async fn request(&self, service: &str, method: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        let path = format!("/{}/{}", service, method);
        let path = PathAndQuery::try_from(path.as_str())
            .map_err(|_| ClientError::InvalidPath(path.clone()))?;

        let mut grpc = tonic::client::Grpc::new(self.channel()?);
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("Service was not ready: {}", e)))?;

        log::debug!("rpc {} ({} bytes)", path, data.len());
        let response = grpc.unary(tonic::Request::new(data), path, RawCodec).await?;
        Ok(response.into_inner())
    }
}

/// Pass-through codec: the payload is already protobuf-encoded
#[derive(Debug, Clone, Copy, Default)]
struct RawCodec;

impl tonic::codec::Codec for RawCodec {
    type Encode = Vec<u8>;
    type Decode = Vec<u8>;
    type Encoder = RawCodec;
    type Decoder = RawCodec;

    fn encoder(&mut self) -> Self::Encoder {
        RawCodec
    }

    fn decoder(&mut self) -> Self::Decoder {
        RawCodec
    }
}

impl Encoder for RawCodec {
    type Item = Vec<u8>;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        dst.put_slice(&item);
        Ok(())
    }
}

impl Decoder for RawCodec {
    type Item = Vec<u8>;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        let bytes = src.copy_to_bytes(src.remaining());
        Ok(Some(bytes.to_vec()))
    }
}

/// A request type bound to its service method and response type
pub trait UnaryMethod: MessageCodec {
    type Response: MessageCodec + Clone + 'static;
    const SERVICE: &'static str;
    const METHOD: &'static str;
}

macro_rules! unary {
    ($req:ty => $resp:ty, $service:expr, $method:literal) => {
        impl UnaryMethod for $req {
            type Response = $resp;
            const SERVICE: &'static str = $service;
            const METHOD: &'static str = $method;
        }
    };
}

unary!(module::QueryParamsRequest => module::QueryParamsResponse, QUERY_SERVICE, "Params");
unary!(module::QueryPostsRequest => module::QueryPostsResponse, QUERY_SERVICE, "Posts");
unary!(module::QueryDelegationsRequest => module::QueryDelegationsResponse, QUERY_SERVICE, "Delegations");
unary!(module::MsgCreatePost => module::MsgCreatePostResponse, MSG_SERVICE, "CreatePost");
unary!(module::MsgDelegate => module::MsgDelegateResponse, MSG_SERVICE, "Delegate");
unary!(module::MsgDelegatePost => module::MsgDelegatePostResponse, MSG_SERVICE, "DelegatePost");
unary!(port::QueryAppVersionRequest => port::QueryAppVersionResponse, port::QUERY_SERVICE, "AppVersion");

/// Encode, send, decode
async fn call<M: UnaryMethod>(rpc: &dyn Rpc, request: &M) -> Result<M::Response, ClientError> {
    let data = request.to_bytes();
    let response = rpc.request(M::SERVICE, M::METHOD, data).await?;
    Ok(M::Response::from_bytes(&response)?)
}

/// Typed client for the module's Query service
#[derive(Clone)]
pub struct QueryClient {
    rpc: Arc<dyn Rpc>,
}

impl QueryClient {
    pub fn new(rpc: Arc<dyn Rpc>) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> Arc<dyn Rpc> {
        self.rpc.clone()
    }

    /// Call any query method, including ones outside the module (e.g. ibc port)
    pub async fn call<M: UnaryMethod>(&self, request: &M) -> Result<M::Response, ClientError> {
        call(self.rpc.as_ref(), request).await
    }

    /// Parameters queries the parameters of the module.
    pub async fn params(&self, request: &module::QueryParamsRequest) -> Result<module::QueryParamsResponse, ClientError> {
        self.call(request).await
    }

    /// Queries a list of Posts items.
    pub async fn posts(&self, request: &module::QueryPostsRequest) -> Result<module::QueryPostsResponse, ClientError> {
        self.call(request).await
    }

    /// Queries a list of Delegations items.
    pub async fn delegations(
        &self,
        request: &module::QueryDelegationsRequest,
    ) -> Result<module::QueryDelegationsResponse, ClientError> {
        self.call(request).await
    }

    pub async fn app_version(
        &self,
        request: &port::QueryAppVersionRequest,
    ) -> Result<port::QueryAppVersionResponse, ClientError> {
        self.call(request).await
    }
}

/// Typed client for the module's Msg service (direct, unsigned service calls)
#[derive(Clone)]
pub struct MsgClient {
    rpc: Arc<dyn Rpc>,
}

impl MsgClient {
    pub fn new(rpc: Arc<dyn Rpc>) -> Self {
        Self { rpc }
    }

    pub async fn create_post(&self, request: &module::MsgCreatePost) -> Result<module::MsgCreatePostResponse, ClientError> {
        call(self.rpc.as_ref(), request).await
    }

    pub async fn delegate(&self, request: &module::MsgDelegate) -> Result<module::MsgDelegateResponse, ClientError> {
        call(self.rpc.as_ref(), request).await
    }

    pub async fn delegate_post(
        &self,
        request: &module::MsgDelegatePost,
    ) -> Result<module::MsgDelegatePostResponse, ClientError> {
        call(self.rpc.as_ref(), request).await
    }
}

/// In-memory `Rpc` used by unit tests across the crate
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Handler = Box<dyn Fn(&[u8]) -> Result<Vec<u8>, ClientError> + Send + Sync>;
    type Latency = Box<dyn Fn(usize) -> Duration + Send + Sync>;

    #[derive(Default)]
    pub struct MockRpc {
        handlers: Mutex<HashMap<String, Handler>>,
        latencies: Mutex<HashMap<String, Latency>>,
        pub calls: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl MockRpc {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on<F>(&self, service: &str, method: &str, handler: F)
        where
            F: Fn(&[u8]) -> Result<Vec<u8>, ClientError> + Send + Sync + 'static,
        {
            self.handlers
                .lock()
                .unwrap()
                .insert(format!("{}/{}", service, method), Box::new(handler));
        }

        /// Hold the n-th call (0-based) to `method` for `latency(n)` after its response is built
        pub fn delay<F>(&self, service: &str, method: &str, latency: F)
        where
            F: Fn(usize) -> Duration + Send + Sync + 'static,
        {
            self.latencies
                .lock()
                .unwrap()
                .insert(format!("{}/{}", service, method), Box::new(latency));
        }

        pub fn respond<M: prost::Message + Clone + Send + Sync + 'static>(&self, service: &str, method: &str, response: M) {
            self.on(service, method, move |_| Ok(response.encode_to_vec()));
        }

        pub fn call_count(&self, method: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(path, _)| path.ends_with(&format!("/{}", method)))
                .count()
        }
    }

    #[async_trait]
    impl Rpc for MockRpc {
        async fn request(&self, service: &str, method: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError> {
            let path = format!("{}/{}", service, method);
            let index = {
                let mut calls = self.calls.lock().unwrap();
                let index = calls.iter().filter(|(p, _)| *p == path).count();
                calls.push((path.clone(), data.clone()));
                index
            };
            let result = match self.handlers.lock().unwrap().get(&path) {
                Some(handler) => handler(&data),
                None => Err(ClientError::Status(Status::unimplemented(path.clone()))),
            };
            let latency = self.latencies.lock().unwrap().get(&path).map(|f| f(index));
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        }
    }
}
