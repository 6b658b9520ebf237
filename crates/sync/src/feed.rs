//! Searchable block feed and the recent-transactions panel derived from it.

use crate::source::ItemSource;
use crate::synchronizer::{LoadOlderOutcome, PollingListSynchronizer};
use archive_explorer_domain::entities::{Block, Transaction};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Blocks scanned for the recent-transactions panel.
pub const RECENT_TRANSACTION_BLOCKS: usize = 6;
/// Transactions shown in the recent-transactions panel.
pub const RECENT_TRANSACTION_LIMIT: usize = 10;

/// A transaction together with the height of its block.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentTransaction {
    pub block_height: u64,
    pub transaction: Transaction,
}

/// Block list with a client-side hash search.
///
/// While a search term is set, backward pagination is suppressed so the
/// filtered view does not pull in history one block at a time.
pub struct BlockFeed<S: ItemSource<Item = Block>> {
    sync: Arc<PollingListSynchronizer<S>>,
    search: String,
}

impl<S: ItemSource<Item = Block>> BlockFeed<S> {
    pub fn new(sync: Arc<PollingListSynchronizer<S>>) -> Self {
        Self {
            sync,
            search: String::new(),
        }
    }

    pub fn synchronizer(&self) -> &Arc<PollingListSynchronizer<S>> {
        &self.sync
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into().trim().to_string();
        debug!(search = %self.search, "Block search updated");
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    /// Blocks whose hash contains the search term, newest first.
    pub async fn visible(&self) -> Vec<Block> {
        let needle = self.search.to_lowercase();
        self.sync
            .filter(|block| hash_matches(block, &needle))
            .await
    }

    /// Visible blocks with a height above `seen`, and the watermark of the
    /// snapshot they were taken from. Feed the watermark back as the next
    /// `seen` so each block is reported once however many polls merged in
    /// between.
    pub async fn visible_since(&self, seen: Option<u64>) -> (Vec<Block>, Option<u64>) {
        let needle = self.search.to_lowercase();
        let items = self.sync.items().await;
        let watermark = items.first().map(|b| b.height).or(seen);
        let fresh = items
            .into_iter()
            .take_while(|b| seen.is_none_or(|s| b.height > s))
            .filter(|b| hash_matches(b, &needle))
            .collect();
        (fresh, watermark)
    }

    /// Recent transactions from the visible blocks.
    pub async fn recent_transactions(&self) -> Vec<RecentTransaction> {
        recent_transactions(
            &self.visible().await,
            RECENT_TRANSACTION_BLOCKS,
            RECENT_TRANSACTION_LIMIT,
        )
    }

    /// Loads the next older block unless a search is active.
    pub async fn load_older(&self) -> LoadOlderOutcome {
        if self.is_searching() {
            debug!("Load older suppressed while searching");
            return LoadOlderOutcome::Suppressed;
        }
        self.sync.load_older().await
    }
}

fn hash_matches(block: &Block, needle: &str) -> bool {
    needle.is_empty() || block.hash.to_lowercase().contains(needle)
}

/// Unique transactions from the first `max_blocks` blocks, at most `limit`.
/// Transactions without an id are skipped.
pub fn recent_transactions(
    blocks: &[Block],
    max_blocks: usize,
    limit: usize,
) -> Vec<RecentTransaction> {
    let mut seen = HashSet::new();
    blocks
        .iter()
        .take(max_blocks)
        .flat_map(|block| {
            block
                .transactions
                .iter()
                .map(move |tx| (block.height, tx))
        })
        .filter(|(_, tx)| tx.id().is_some_and(|id| seen.insert(id.to_string())))
        .take(limit)
        .map(|(block_height, tx)| RecentTransaction {
            block_height,
            transaction: tx.clone(),
        })
        .collect()
}
