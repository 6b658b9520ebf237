//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use archive_explorer_sync::prelude::*;
//! ```

pub use crate::dashboard::{NetworkStats, fetch_network_stats};
pub use crate::feed::{BlockFeed, RecentTransaction, recent_transactions};
pub use crate::pager::{CONTRACTS_PAGE_SIZE, ContractPager};
pub use crate::scheduler::{SyncHandle, spawn_poller};
pub use crate::source::{BlockSource, ItemSource};
pub use crate::synchronizer::{
    ListState, LoadOlderOutcome, MergeReport, PollOutcome, PollingListSynchronizer, SyncConfig,
};
pub use crate::views::{BlocksPageUpdate, ContractDetails, TransactionLookup};
