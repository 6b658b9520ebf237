//! Keeping a polled, newest-first list in sync with the backend.

mod list_state;
mod polling;

pub use list_state::{ListState, MergeReport};
pub use polling::{
    BLOCKS_PAGE_SIZE, FEED_PAGE_SIZE, LoadOlderOutcome, POLL_INTERVAL, POLL_LIMIT, PollOutcome,
    PollingListSynchronizer, SyncConfig,
};
