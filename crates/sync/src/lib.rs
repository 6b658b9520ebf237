//! Keeping explorer pages fresh.
//!
//! This crate provides:
//! - The Polling List Synchronizer and its pure list state
//! - A poll timer whose handle owns the task and tears it down
//! - The searchable block feed and recent-transactions panel
//! - Chunked paging over storage contracts
//! - Dashboard totals and the detail-page loaders

/// Prelude module for convenient imports.
pub mod prelude;

/// Network totals for the landing page.
pub mod dashboard;
/// Searchable block feed.
pub mod feed;
/// Storage contracts pager.
pub mod pager;
/// Poll timer.
pub mod scheduler;
/// Item sources the synchronizer polls.
pub mod source;
/// Polling List Synchronizer.
pub mod synchronizer;
/// Detail-page loaders.
pub mod views;

#[cfg(test)]
mod testing;
