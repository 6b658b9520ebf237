//! Command Line Interface for the ArchiveChain explorer.
use anyhow::{Context, Result};
use archive_explorer_data::config::{BACKEND_URL_VAR, STORAGE_URL_VAR};
use archive_explorer_data::{ExplorerApi, ExplorerConfig, HttpExplorerClient};
use archive_explorer_domain::entities::Block;
use archive_explorer_sync::prelude::*;
use archive_explorer_sync::views;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "explorer")]
#[command(about = "ArchiveChain block explorer", long_about = None)]
struct Cli {
    /// Explorer backend base URL
    #[arg(long, global = true, env = BACKEND_URL_VAR)]
    backend_url: Option<String>,

    /// Storage node base URL (defaults to the backend URL)
    #[arg(long, global = true, env = STORAGE_URL_VAR)]
    storage_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Network totals, latest blocks, recent transactions and mined coins
    Landing,
    /// Latest blocks
    Blocks {
        /// Only show blocks whose hash contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Older blocks to load below the first page
        #[arg(long, default_value_t = 0)]
        older: usize,

        /// Keep polling and print new blocks as they arrive
        #[arg(short, long)]
        watch: bool,
    },
    /// Block details
    Block {
        /// Block height
        height: u64,
    },
    /// Transaction details
    Transaction {
        /// Height of the containing block
        #[arg(short, long)]
        block: u64,

        /// Transaction id
        id: String,
    },
    /// Wallet balances
    Wallets,
    /// Wallet details
    Wallet {
        /// Wallet address
        address: String,
    },
    /// Archived files
    StoredFiles,
    /// Storage contracts
    StorageContracts {
        /// Only contracts of this file
        #[arg(short, long, default_value = "")]
        file_name: String,

        /// Pages of contracts to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Storage contract details and proving windows
    Contract {
        /// Contract hash, hex encoded
        #[arg(long)]
        hash: String,

        /// Contract file URL
        #[arg(long)]
        file_url: String,
    },
    /// Show or save an archived file
    File {
        /// Archived filename
        filename: String,

        /// Save the file here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Send coins
    Send {
        #[arg(long)]
        sender: String,

        #[arg(long)]
        receiver: String,

        #[arg(long)]
        amount: Decimal,
    },
    /// Cumulative mined coins
    MinedCoins,
    /// Submit a block read from a JSON file
    SubmitBlock {
        /// Path to the block JSON
        path: PathBuf,
    },
    /// Submit a file for archiving
    Archive {
        /// Path to the file metadata JSON
        file: PathBuf,

        /// Path to the file data JSON
        data: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ExplorerConfig::from_env()?;
    if let Some(url) = &cli.backend_url {
        config = config.with_backend_url(url);
        if cli.storage_url.is_none() {
            config = config.with_storage_url(url);
        }
    }
    if let Some(url) = &cli.storage_url {
        config = config.with_storage_url(url);
    }
    let storage_url = config.storage_url.clone();
    info!(backend = %config.backend_url, "Using explorer backend");

    let api: Arc<dyn ExplorerApi> = Arc::new(HttpExplorerClient::new(config)?);

    match cli.command {
        Commands::Landing => landing(api).await,
        Commands::Blocks {
            search,
            older,
            watch,
        } => blocks(api, search, older, watch).await?,
        Commands::Block { height } => match views::load_block(api.as_ref(), height).await {
            Some(block) => render::print_block(&block),
            None => println!("{}", views::BLOCK_NOT_FOUND),
        },
        Commands::Transaction { block, id } => {
            match views::load_transaction(api.as_ref(), block, &id).await {
                Ok(found) => render::print_transaction(&found.block, &found.transaction),
                Err(message) => println!("{message}"),
            }
        }
        Commands::Wallets => {
            render::print_wallets(&views::load_wallet_balances(api.as_ref()).await);
        }
        Commands::Wallet { address } => {
            match views::load_wallet_details(api.as_ref(), &address).await {
                Some(details) => render::print_wallet(&details),
                None => println!("Wallet not found"),
            }
        }
        Commands::StoredFiles => {
            render::print_stored_files(&views::load_stored_files(api.as_ref()).await);
        }
        Commands::StorageContracts { file_name, pages } => {
            let mut pager = ContractPager::new(Arc::clone(&api), file_name);
            for _ in 0..pages.max(1) {
                if pager.load_more().await == 0 {
                    break;
                }
            }
            render::print_contracts(pager.contracts());
            if pager.has_more() {
                println!("More contracts available, use --pages to load them");
            }
        }
        Commands::Contract { hash, file_url } => {
            let details = views::load_contract_details(api.as_ref(), &hash, &file_url).await;
            match &details.contract {
                Some(contract) => render::print_contract(contract),
                None => println!("Contract not found"),
            }
            println!("\nProving windows");
            render::print_proving_windows(&details.proving_windows);
        }
        Commands::File { filename, output } => {
            match views::load_file(api.as_ref(), &filename).await {
                Ok(view) => match output {
                    Some(path) => {
                        view.save_to(&path).await?;
                        println!("✅ Saved {} to {}", view.file_name, path.display());
                    }
                    None => render::print_file(&view, &storage_url),
                },
                Err(e) => println!("Error loading file: {e}"),
            }
        }
        Commands::Send {
            sender,
            receiver,
            amount,
        } => match views::send_currency(api.as_ref(), &sender, &receiver, amount).await {
            Ok(ack) => println!("✅ {ack}"),
            Err(message) => println!("❌ {message}"),
        },
        Commands::MinedCoins => {
            render::print_mined_coins(&views::load_mined_coins(api.as_ref()).await);
        }
        Commands::SubmitBlock { path } => {
            let block: Block = read_json(&path).await?;
            match api.send_block(&block).await {
                Ok(ack) => println!("✅ {ack}"),
                Err(e) => println!("❌ Error sending block: {e}"),
            }
        }
        Commands::Archive { file, data } => {
            let file: serde_json::Value = read_json(&file).await?;
            let data: serde_json::Value = read_json(&data).await?;
            match api.archive_file(&file, &data).await {
                Ok(ack) => println!("✅ {ack}"),
                Err(e) => println!("❌ Error archiving file: {e}"),
            }
        }
    }

    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))
}

async fn landing(api: Arc<dyn ExplorerApi>) {
    let config = SyncConfig::feed();
    let page_size = config.page_size;
    let sync = Arc::new(PollingListSynchronizer::new(
        "landing",
        BlockSource::new(Arc::clone(&api)),
        config,
    ));
    let feed = BlockFeed::new(Arc::clone(&sync));

    let (_, stats, chart) = tokio::join!(
        sync.initialize(page_size),
        fetch_network_stats(api.as_ref()),
        views::load_mined_coins(api.as_ref()),
    );

    println!("📊 Network");
    render::print_stats(&stats, sync.watermark().await);

    println!("\n⛓  Latest blocks");
    render::print_blocks(&feed.visible().await);

    println!("\n💸 Recent transactions");
    render::print_recent_transactions(&feed.recent_transactions().await);

    println!("\n⛏  Mined coins");
    render::print_mined_coins(&chart);
}

async fn blocks(
    api: Arc<dyn ExplorerApi>,
    search: Option<String>,
    older: usize,
    watch: bool,
) -> Result<()> {
    let config = SyncConfig::default();
    let page_size = config.page_size;
    let sync = Arc::new(PollingListSynchronizer::new(
        "blocks",
        BlockSource::new(Arc::clone(&api)),
        config,
    ));
    let mut feed = BlockFeed::new(Arc::clone(&sync));
    if let Some(term) = search {
        feed.set_search(term);
    }

    let (_, stats) = tokio::join!(sync.initialize(page_size), fetch_network_stats(api.as_ref()));
    for _ in 0..older {
        if !matches!(feed.load_older().await, LoadOlderOutcome::Appended(_)) {
            break;
        }
    }
    render::print_stats(&stats, sync.watermark().await);
    println!();
    render::print_blocks(&feed.visible().await);

    if !watch {
        return Ok(());
    }

    println!("\n👀 Watching for new blocks, Ctrl+C to stop");
    let mut seen = sync.watermark().await;
    let mut handle = spawn_poller(Arc::clone(&sync));
    let mut updates = handle
        .take_receiver()
        .context("poller update channel already taken")?;

    loop {
        tokio::select! {
            Some(_) = updates.recv() => {
                let update = views::refresh_blocks_page(&feed, api.as_ref(), seen).await;
                seen = update.seen;
                if !update.new_blocks.is_empty() {
                    render::print_blocks(&update.new_blocks);
                }
                render::print_stats(&update.stats, seen);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
    Ok(())
}
