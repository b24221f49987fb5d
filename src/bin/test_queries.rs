//! Smoke test against a running chain
//! Run with: cargo run --bin test_queries [grpc-endpoint]

use std::sync::Arc;

use anyhow::Result;
use getsigners_client::chain::proto::ibc::core::port::v1::QueryAppVersionRequest;
use getsigners_client::chain::{ClientConfig, GrpcTransport, MessageCodec};
use getsigners_client::store::{BlockWatcher, ModuleStore, QueryOptions};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("=== incorrect_getsigners Query Test ===\n");

    let config = ClientConfig {
        grpc_endpoint: std::env::args()
            .nth(1)
            .unwrap_or_else(|| "http://localhost:9090".to_string()),
        connection_timeout: 10,
        request_timeout: 30,
    };

    let mut transport = GrpcTransport::new(config.clone());
    println!("Connecting to {}...", config.grpc_endpoint);
    transport.connect().await?;
    println!("Connected!\n");
    let rpc = Arc::new(transport);

    let watcher = BlockWatcher::new(rpc.clone(), std::time::Duration::from_secs(1));
    match watcher.latest_height().await {
        Ok(height) => println!("Latest block height: {}\n", height),
        Err(e) => println!("❌ Latest block query failed: {}\n", e),
    }

    let mut store = ModuleStore::new(rpc.clone())?;

    println!("=== Params ===");
    match store.query_params(QueryOptions::default()).await {
        Ok(params) => println!("✅ {}", params.to_json()?),
        Err(e) => println!("❌ {}", e),
    }

    println!("\n=== Posts ===");
    match store.query_posts(QueryOptions { all: true, ..Default::default() }).await {
        Ok(posts) => {
            println!("✅ {} post(s)", posts.post.len());
            for post in &posts.post {
                println!("  #{} {} by {}", post.id, post.title, post.author);
            }
        }
        Err(e) => println!("❌ {}", e),
    }

    println!("\n=== Delegations ===");
    match store.query_delegations(QueryOptions::default()).await {
        Ok(delegations) => {
            println!("✅ {} delegation(s)", delegations.delegation.len());
            for d in &delegations.delegation {
                println!("  {} -> {}", d.delegator, d.delegatee);
            }
        }
        Err(e) => println!("❌ {}", e),
    }

    println!("\n=== IBC transfer port AppVersion ===");
    let request = QueryAppVersionRequest {
        port_id: "transfer".to_string(),
        ..Default::default()
    };
    match store.query_client().app_version(&request).await {
        Ok(response) => println!("✅ {}", response.to_json()?),
        Err(e) => println!("❌ {} (expected on chains without IBC)", e),
    }

    println!("\n=== Test Complete ===");
    Ok(())
}
