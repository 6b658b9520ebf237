//! Polling List Synchronizer.

use super::list_state::{ListState, MergeReport};
use crate::source::ItemSource;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Initial page size of the blocks page.
pub const BLOCKS_PAGE_SIZE: usize = 10;
/// Initial page size of the block visualizer feed.
pub const FEED_PAGE_SIZE: usize = 6;
/// Items fetched by each poll.
pub const POLL_LIMIT: usize = 3;
/// Delay between polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Tuning for a [`PollingListSynchronizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Items fetched by `initialize`.
    pub page_size: usize,
    /// Items fetched by each `poll`.
    pub poll_limit: usize,
    /// Delay between polls when driven by a poller.
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: BLOCKS_PAGE_SIZE,
            poll_limit: POLL_LIMIT,
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl SyncConfig {
    /// Configuration of the block visualizer feed.
    pub fn feed() -> Self {
        Self::default().with_page_size(FEED_PAGE_SIZE)
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_poll_limit(mut self, poll_limit: usize) -> Self {
        self.poll_limit = poll_limit;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Result of `initialize` or `poll`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The fetch succeeded. `added` may be zero.
    Merged {
        added: usize,
        watermark: Option<u64>,
        /// Keys skipped between the old watermark and the new items.
        gap: Option<RangeInclusive<u64>>,
    },
    /// Another operation was in flight; nothing was fetched.
    Busy,
    /// The synchronizer was closed; any fetched result was discarded.
    Closed,
    /// The fetch failed; state is unchanged.
    Failed,
}

impl PollOutcome {
    /// Number of items added to the list.
    pub fn added(&self) -> usize {
        match self {
            PollOutcome::Merged { added, .. } => *added,
            _ => 0,
        }
    }
}

/// Result of `load_older`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOlderOutcome {
    /// The item at this key was appended.
    Appended(u64),
    /// Nothing older to request: the list is empty or already at key 0.
    Exhausted,
    /// The backend has no item at this key.
    Missing(u64),
    /// The caller declined to paginate, e.g. while a search is active.
    Suppressed,
    Busy,
    Closed,
    Failed,
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Keeps a newest-first list of items fresh by polling the head of a
/// remote collection and merging anything above the watermark.
///
/// One operation runs at a time; triggers arriving while one is in flight
/// are ignored. Fetch failures are logged and leave the list untouched.
/// Missed items between polls are reported as a gap but never backfilled.
pub struct PollingListSynchronizer<S: ItemSource> {
    name: String,
    source: S,
    config: SyncConfig,
    state: RwLock<ListState<S::Item>>,
    busy: AtomicBool,
    closed: AtomicBool,
}

impl<S: ItemSource> PollingListSynchronizer<S> {
    /// Creates an empty synchronizer. Nothing is fetched until `initialize`.
    pub fn new(name: impl Into<String>, source: S, config: SyncConfig) -> Self {
        Self {
            name: name.into(),
            source,
            config,
            state: RwLock::new(ListState::new()),
            busy: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fetches the newest `page_size` items and replaces the list with them.
    pub async fn initialize(&self, page_size: usize) -> PollOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!(list = %self.name, "Initialize ignored, busy");
            return PollOutcome::Busy;
        };

        let fetched = match self.source.latest(page_size).await {
            Ok(items) => items,
            Err(e) => {
                warn!(list = %self.name, error = %e, "Initial fetch failed");
                return PollOutcome::Failed;
            }
        };

        if self.is_closed() {
            return PollOutcome::Closed;
        }

        let mut state = self.state.write().await;
        state.replace(fetched);
        info!(
            list = %self.name,
            items = state.len(),
            watermark = ?state.watermark(),
            "List initialized"
        );

        PollOutcome::Merged {
            added: state.len(),
            watermark: state.watermark(),
            gap: None,
        }
    }

    /// Fetches the newest `poll_limit` items and prepends the unseen ones.
    pub async fn poll(&self) -> PollOutcome {
        if self.is_closed() {
            return PollOutcome::Closed;
        }
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!(list = %self.name, "Poll skipped, busy");
            return PollOutcome::Busy;
        };

        let fetched = match self.source.latest(self.config.poll_limit).await {
            Ok(items) => items,
            Err(e) => {
                warn!(list = %self.name, error = %e, "Poll failed");
                return PollOutcome::Failed;
            }
        };

        if self.is_closed() {
            debug!(list = %self.name, "Discarding poll result after close");
            return PollOutcome::Closed;
        }

        let mut state = self.state.write().await;
        let MergeReport { added, gap } = state.merge_newer(fetched);
        let watermark = state.watermark();

        if let Some(gap) = &gap {
            warn!(
                list = %self.name,
                from = gap.start(),
                to = gap.end(),
                "Items missed between polls"
            );
        }
        if added > 0 {
            info!(list = %self.name, added, watermark = ?watermark, "Merged new items");
        } else {
            debug!(list = %self.name, "No new items");
        }

        PollOutcome::Merged {
            added,
            watermark,
            gap,
        }
    }

    /// Fetches the item just below the oldest held one and appends it.
    pub async fn load_older(&self) -> LoadOlderOutcome {
        if self.is_closed() {
            return LoadOlderOutcome::Closed;
        }
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!(list = %self.name, "Load older skipped, busy");
            return LoadOlderOutcome::Busy;
        };

        let Some(key) = self.state.read().await.next_older_key() else {
            return LoadOlderOutcome::Exhausted;
        };

        let fetched = match self.source.at(key).await {
            Ok(item) => item,
            Err(e) => {
                warn!(list = %self.name, key, error = %e, "Load older failed");
                return LoadOlderOutcome::Failed;
            }
        };

        if self.is_closed() {
            return LoadOlderOutcome::Closed;
        }

        let Some(item) = fetched else {
            debug!(list = %self.name, key, "No older item");
            return LoadOlderOutcome::Missing(key);
        };

        if self.state.write().await.append_older(item) {
            debug!(list = %self.name, key, "Appended older item");
            LoadOlderOutcome::Appended(key)
        } else {
            warn!(list = %self.name, key, "Backend returned an item that is not older");
            LoadOlderOutcome::Missing(key)
        }
    }

    /// Items matching `predicate`, newest first. Never queries the backend.
    pub async fn filter(&self, predicate: impl Fn(&S::Item) -> bool) -> Vec<S::Item> {
        self.state
            .read()
            .await
            .filter(predicate)
            .cloned()
            .collect()
    }

    /// Snapshot of the list, newest first.
    pub async fn items(&self) -> Vec<S::Item> {
        self.state.read().await.items().to_vec()
    }

    pub async fn watermark(&self) -> Option<u64> {
        self.state.read().await.watermark()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    /// Whether an operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Stops accepting results. Fetches still in flight are discarded when
    /// they complete.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!(list = %self.name, "Synchronizer closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
