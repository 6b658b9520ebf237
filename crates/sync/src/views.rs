//! One-shot loaders for the detail pages.
//!
//! Every loader swallows backend failures: it logs them and returns the
//! empty or absent value the page renders as a "not found" placeholder.

use crate::dashboard::{NetworkStats, fetch_network_stats};
use crate::feed::BlockFeed;
use crate::source::ItemSource;
use archive_explorer_data::{ApiError, ExplorerApi, FileView};
use archive_explorer_domain::entities::{
    Block, FileProvingWindow, StorageContract, Transaction, WalletBalance, WalletDetails,
};
use archive_explorer_domain::metrics::{ChartPoint, DEFAULT_BUCKET_SECS, cumulative_mined_coins};
use rust_decimal::Decimal;
use tracing::{info, warn};

pub const BLOCK_NOT_FOUND: &str = "Block not found";
pub const TRANSACTION_NOT_FOUND: &str = "Transaction not found";
pub const FILL_ALL_FIELDS: &str = "Please fill all fields";
pub const SEND_FAILED: &str = "Error sending transaction";

pub async fn load_block<A: ExplorerApi + ?Sized>(api: &A, height: u64) -> Option<Block> {
    match api.get_block(height).await {
        Ok(block) => block,
        Err(e) => {
            warn!(height, error = %e, "Failed to load block");
            None
        }
    }
}

/// What a watched blocks page shows after a poll.
#[derive(Debug, Clone, PartialEq)]
pub struct BlocksPageUpdate {
    /// Visible blocks not shown before, newest first.
    pub new_blocks: Vec<Block>,
    pub stats: NetworkStats,
    /// Pass back as `seen` on the next refresh.
    pub seen: Option<u64>,
}

/// Collects the blocks above `seen` and re-fetches the network totals.
pub async fn refresh_blocks_page<S, A>(
    feed: &BlockFeed<S>,
    api: &A,
    seen: Option<u64>,
) -> BlocksPageUpdate
where
    S: ItemSource<Item = Block>,
    A: ExplorerApi + ?Sized,
{
    let ((new_blocks, seen), stats) =
        tokio::join!(feed.visible_since(seen), fetch_network_stats(api));
    BlocksPageUpdate {
        new_blocks,
        stats,
        seen,
    }
}

/// A transaction looked up inside its containing block.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionLookup {
    pub block: Block,
    pub transaction: Transaction,
}

/// Finds transaction `id` in the block at `height`.
///
/// # Errors
/// Returns the message to show when the block or the transaction is missing.
pub async fn load_transaction<A: ExplorerApi + ?Sized>(
    api: &A,
    height: u64,
    id: &str,
) -> Result<TransactionLookup, &'static str> {
    let block = load_block(api, height).await.ok_or(BLOCK_NOT_FOUND)?;
    let transaction = block
        .find_transaction(id)
        .cloned()
        .ok_or(TRANSACTION_NOT_FOUND)?;
    Ok(TransactionLookup { block, transaction })
}

pub async fn load_wallet_balances<A: ExplorerApi + ?Sized>(api: &A) -> Vec<WalletBalance> {
    api.get_wallet_balances().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load wallet balances");
        Vec::new()
    })
}

/// Wallet details ordered for display.
pub async fn load_wallet_details<A: ExplorerApi + ?Sized>(
    api: &A,
    address: &str,
) -> Option<WalletDetails> {
    match api.get_wallet_details(address).await {
        Ok(details) => details.map(|mut d| {
            d.sort_for_display();
            d
        }),
        Err(e) => {
            warn!(address, error = %e, "Failed to load wallet details");
            None
        }
    }
}

pub async fn load_stored_files<A: ExplorerApi + ?Sized>(api: &A) -> Vec<String> {
    api.get_stored_files().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load stored files");
        Vec::new()
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractDetails {
    pub contract: Option<StorageContract>,
    /// Newest window first.
    pub proving_windows: Vec<FileProvingWindow>,
}

/// Loads a contract and its proving windows concurrently.
pub async fn load_contract_details<A: ExplorerApi + ?Sized>(
    api: &A,
    contract_hash: &str,
    file_url: &str,
) -> ContractDetails {
    let (contract, windows) = tokio::join!(
        api.get_storage_contract(contract_hash, file_url),
        api.get_contract_file_proving_windows(contract_hash),
    );

    let contract = contract.unwrap_or_else(|e| {
        warn!(contract_hash, error = %e, "Failed to load storage contract");
        None
    });
    let mut proving_windows = windows.unwrap_or_else(|e| {
        warn!(contract_hash, error = %e, "Failed to load proving windows");
        Vec::new()
    });
    proving_windows.reverse();

    ContractDetails {
        contract,
        proving_windows,
    }
}

/// Retrieves an archived file and resolves how to display it.
///
/// # Errors
/// Returns the backend error so the viewer can show it.
pub async fn load_file<A: ExplorerApi + ?Sized>(api: &A, filename: &str) -> Result<FileView, ApiError> {
    api.retrieve_file(filename)
        .await
        .map(FileView::from_retrieved)
        .inspect_err(|e| warn!(filename, error = %e, "Failed to retrieve file"))
}

/// Cumulative mined coins in five-minute buckets.
pub async fn load_mined_coins<A: ExplorerApi + ?Sized>(api: &A) -> Vec<ChartPoint> {
    match api.get_mined_coins().await {
        Ok(coins) => cumulative_mined_coins(coins.into_points(), DEFAULT_BUCKET_SECS),
        Err(e) => {
            warn!(error = %e, "Failed to load mined coins");
            Vec::new()
        }
    }
}

/// Submits a currency transfer from the send form.
///
/// # Errors
/// Returns the message to show: [`FILL_ALL_FIELDS`] without contacting the
/// backend when a field is empty, [`SEND_FAILED`] when the backend rejects it.
pub async fn send_currency<A: ExplorerApi + ?Sized>(
    api: &A,
    sender: &str,
    receiver: &str,
    amount: Decimal,
) -> Result<String, &'static str> {
    let (sender, receiver) = (sender.trim(), receiver.trim());
    if sender.is_empty() || receiver.is_empty() || amount.is_zero() {
        return Err(FILL_ALL_FIELDS);
    }

    let transaction = Transaction::currency(sender, receiver, amount);
    match api.send_transaction(&transaction).await {
        Ok(ack) => {
            info!(sender, receiver, %amount, "Transaction sent");
            Ok(ack)
        }
        Err(e) => {
            warn!(sender, receiver, error = %e, "Failed to send transaction");
            Err(SEND_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BlockSource;
    use crate::synchronizer::{PollingListSynchronizer, SyncConfig};
    use crate::testing::{MockExplorer, contract};
    use archive_explorer_data::{DisplayKind, RetrievedFile};
    use archive_explorer_domain::enums::FileProvingWindowState;
    use archive_explorer_domain::metrics::MinedCoins;
    use archive_explorer_domain::value_objects::NumberOrString;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_block_fetch_failure_reads_as_not_found() {
        let api = MockExplorer::with_chain(0..=10);
        api.fail_next();

        assert_eq!(load_block(&api, 5).await, None);
        api.fail_next();
        assert_eq!(
            load_transaction(&api, 5, "tx-5").await.unwrap_err(),
            BLOCK_NOT_FOUND
        );
        assert!(load_block(&api, 5).await.is_some());
    }

    #[tokio::test]
    async fn test_blocks_page_refresh_carries_stats() {
        let api = Arc::new(MockExplorer::with_chain(0..=10));
        *api.stats.lock().unwrap() = vec![
            Some(NumberOrString::from(2048)),
            Some(NumberOrString::from(3)),
            Some(NumberOrString::from(100)),
            Some(NumberOrString::from(7)),
        ];
        let sync = Arc::new(PollingListSynchronizer::new(
            "blocks",
            BlockSource::new(Arc::clone(&api)),
            SyncConfig::default(),
        ));
        let feed = BlockFeed::new(Arc::clone(&sync));
        sync.initialize(10).await;
        let seen = sync.watermark().await;

        api.push_blocks(11..=12);
        sync.poll().await;
        let update = refresh_blocks_page(&feed, api.as_ref(), seen).await;

        let heights: Vec<u64> = update.new_blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![12, 11]);
        assert_eq!(update.seen, Some(12));
        assert_eq!(update.stats.archived_storage, 2048);
        assert_eq!(update.stats.total_contracts, dec!(12));

        api.push_blocks(13..=13);
        sync.poll().await;
        let update = refresh_blocks_page(&feed, api.as_ref(), update.seen).await;
        let heights: Vec<u64> = update.new_blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![13]);
    }

    #[tokio::test]
    async fn test_transaction_lookup() {
        let api = MockExplorer::with_chain(0..=10);

        let found = load_transaction(&api, 4, "tx-4").await.unwrap();
        assert_eq!(found.block.height, 4);
        assert_eq!(found.transaction.id(), Some("tx-4"));

        assert_eq!(
            load_transaction(&api, 4, "tx-5").await.unwrap_err(),
            TRANSACTION_NOT_FOUND
        );
        assert_eq!(
            load_transaction(&api, 40, "tx-40").await.unwrap_err(),
            BLOCK_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_contract_windows_newest_first() {
        let api = MockExplorer::default();
        let c = contract(1);
        api.contracts.lock().unwrap().push(c.clone());
        *api.windows.lock().unwrap() = (0..3)
            .map(|i| FileProvingWindow {
                po_dp_challenge: format!("c{i}"),
                start_block_index: i * 10,
                end_block_index: i * 10 + 5,
                state: FileProvingWindowState::Proved,
            })
            .collect();

        let details = load_contract_details(&api, &c.hash_hex(), &c.file_url).await;

        assert_eq!(details.contract, Some(c));
        let starts: Vec<u64> = details
            .proving_windows
            .iter()
            .map(|w| w.start_block_index)
            .collect();
        assert_eq!(starts, vec![20, 10, 0]);
    }

    #[tokio::test]
    async fn test_send_requires_all_fields() {
        let api = MockExplorer::default();

        assert_eq!(send_currency(&api, "", "bob", dec!(1)).await, Err(FILL_ALL_FIELDS));
        assert_eq!(send_currency(&api, "alice", " ", dec!(1)).await, Err(FILL_ALL_FIELDS));
        assert_eq!(send_currency(&api, "alice", "bob", dec!(0)).await, Err(FILL_ALL_FIELDS));
        assert!(api.sent.lock().unwrap().is_empty());

        let ack = send_currency(&api, "alice", "bob", dec!(2.5)).await.unwrap();
        assert_eq!(ack, "Transaction accepted");
        assert_eq!(
            api.sent.lock().unwrap()[0],
            Transaction::currency("alice", "bob", dec!(2.5))
        );
    }

    #[tokio::test]
    async fn test_send_failure_message() {
        let api = MockExplorer::default();
        api.fail_next();

        assert_eq!(
            send_currency(&api, "alice", "bob", dec!(1)).await,
            Err(SEND_FAILED)
        );
    }

    #[tokio::test]
    async fn test_load_file_sniffs_missing_header() {
        let api = MockExplorer::default();
        api.files.lock().unwrap().insert(
            "capture".to_string(),
            RetrievedFile {
                file_name: "capture".to_string(),
                content_type: None,
                bytes: br#"{"ok": true}"#.to_vec(),
            },
        );

        let view = load_file(&api, "capture").await.unwrap();
        assert_eq!(view.kind, DisplayKind::Json);
        assert!(load_file(&api, "missing").await.is_err());
    }

    #[tokio::test]
    async fn test_mined_coins_failure_is_empty() {
        let api = MockExplorer::default();
        *api.mined.lock().unwrap() = Some(MinedCoins::default());
        api.fail_next();

        assert!(load_mined_coins(&api).await.is_empty());
    }
}
