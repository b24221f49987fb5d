use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use getsigners_client::chain::messages::{ModuleMessage, ModuleMsg};
use getsigners_client::chain::proto::{Any, MsgCreatePost, MsgDelegate, MsgDelegatePost, Post};
use getsigners_client::chain::{parse_coins, GrpcTransport, MessageCodec, Rpc, Secp256k1Wallet, TxClient};
use getsigners_client::config::Config;
use getsigners_client::store::{BlockWatcher, ModuleStore, QueryOptions};

#[derive(Parser)]
#[command(name = "getsigners")]
#[command(about = "Client for the incorrect_getsigners Cosmos SDK module", version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    /// Signing mnemonic
    #[arg(long, global = true, env = "GETSIGNERS_MNEMONIC", hide_env_values = true)]
    mnemonic: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "config.toml")]
        output: String,
    },

    /// Query the module and print the JSON response
    Query {
        #[arg(value_enum)]
        what: QueryKind,

        /// Follow pagination and merge every page
        #[arg(long)]
        all: bool,
    },

    /// Broadcast MsgCreatePost signed by the wallet
    CreatePost {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },

    /// Broadcast MsgDelegate from the wallet to DELEGATEE
    Delegate {
        delegatee: String,
    },

    /// Broadcast MsgDelegatePost: DELEGATEE is asked to publish a post by AUTHOR
    DelegatePost {
        delegatee: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },

    /// Subscribe to every module query and refresh on new blocks
    Watch,

    /// Decode a hex-encoded module message
    Decode {
        /// Message name (e.g. MsgCreatePost) or full type URL
        msg: String,
        hex: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QueryKind {
    Params,
    Posts,
    Delegations,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "getsigners_client=info,getsigners=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mnemonic = cli.mnemonic.as_deref();

    match cli.command {
        Commands::Init { output } => {
            let config = Config::default();
            config.save(&output)?;
            info!("Configuration file created at: {}", output);
        }
        Commands::Decode { msg, hex } => {
            decode(&msg, &hex)?;
        }
        Commands::Query { what, all } => {
            let (mut store, _) = open_store(&cli.config, mnemonic).await?;
            let options = QueryOptions { all, ..Default::default() };
            let json = match what {
                QueryKind::Params => store.query_params(options).await?.to_json()?,
                QueryKind::Posts => store.query_posts(options).await?.to_json()?,
                QueryKind::Delegations => store.query_delegations(options).await?.to_json()?,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::CreatePost { title, body } => {
            let (store, config) = open_store(&cli.config, mnemonic).await?;
            let author = store.signer_address().unwrap_or_default().to_string();
            send(&store, &config, MsgCreatePost::new(&author, &title, &body)).await?;
        }
        Commands::Delegate { delegatee } => {
            let (store, config) = open_store(&cli.config, mnemonic).await?;
            let delegator = store.signer_address().unwrap_or_default().to_string();
            send(&store, &config, MsgDelegate::new(&delegator, &delegatee)).await?;
        }
        Commands::DelegatePost { delegatee, author, title, body } => {
            let (store, config) = open_store(&cli.config, mnemonic).await?;
            let delegator = store.signer_address().unwrap_or_default().to_string();
            let post = Post { author, title, body, id: 0 };
            send(&store, &config, MsgDelegatePost::new(&delegator, &delegatee, post)).await?;
        }
        Commands::Watch => {
            let (mut store, config) = open_store(&cli.config, mnemonic).await?;
            store.query_params(QueryOptions::subscribed()).await?;
            store.query_posts(QueryOptions::subscribed()).await?;
            store.query_delegations(QueryOptions::subscribed()).await?;

            let (events_tx, events_rx) = mpsc::channel(16);
            let poll = Duration::from_millis(config.store.poll_interval_ms);
            let watcher = BlockWatcher::new(store.query_client().rpc(), poll).spawn(events_tx);

            tokio::select! {
                _ = store.follow(events_rx) => {}
                _ = tokio::signal::ctrl_c() => info!("Interrupted, stopping"),
            }
            watcher.abort();
        }
    }

    Ok(())
}

/// Connect and build the module store, with a signing client when a mnemonic is set
async fn open_store(config_path: &str, mnemonic: Option<&str>) -> Result<(ModuleStore, Config)> {
    let config = Config::load_or_default(config_path)?;

    let mut transport = GrpcTransport::new(config.client_config());
    transport.connect().await?;
    let rpc: Arc<dyn Rpc> = Arc::new(transport);

    let mut store =
        ModuleStore::new(rpc.clone())?.with_address_prefix(&config.chain.address_prefix);
    if let Some(mnemonic) = mnemonic {
        let wallet = Secp256k1Wallet::from_mnemonic(mnemonic, "", &config.chain.address_prefix)?;
        info!("Signing as {}", wallet.address);
        let tx = TxClient::new(rpc, Arc::new(wallet), &config.chain.chain_id)
            .with_gas_limit(config.tx.gas_limit);
        store = store.with_tx_client(tx);
    }
    store.init();

    Ok((store, config))
}

async fn send<M: ModuleMessage>(store: &ModuleStore, config: &Config, msg: M) -> Result<()> {
    let fee = parse_coins(&config.tx.fee)?;
    let result = store.send_msg(msg, fee, &config.tx.memo).await?;
    if !result.is_ok() {
        tracing::warn!("Transaction {} failed with code {}", result.txhash, result.code);
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn decode(msg: &str, hex_value: &str) -> Result<()> {
    let type_url = if msg.starts_with('/') {
        msg.to_string()
    } else if msg == MsgCreatePost::NAME {
        MsgCreatePost::type_url()
    } else if msg == MsgDelegate::NAME {
        MsgDelegate::type_url()
    } else if msg == MsgDelegatePost::NAME {
        MsgDelegatePost::type_url()
    } else {
        bail!("Unknown message {}", msg);
    };
    let any = Any {
        type_url,
        value: hex::decode(hex_value.trim_start_matches("0x"))?,
    };
    let decoded = ModuleMsg::from_any(&any)?;
    println!("{} {}", decoded.name(), serde_json::to_string_pretty(&decoded.to_json()?)?);
    Ok(())
}
