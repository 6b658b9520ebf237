//! Backends the synchronizer can poll.

use archive_explorer_data::{ExplorerApi, Result};
use archive_explorer_domain::Keyed;
use archive_explorer_domain::entities::Block;
use async_trait::async_trait;
use std::sync::Arc;

/// A remote, append-only sequence of keyed items.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Item type held by the synchronizer.
    type Item: Keyed + Clone + Send + Sync;

    /// Up to `limit` of the newest items, in any order.
    async fn latest(&self, limit: usize) -> Result<Vec<Self::Item>>;

    /// The item at `key`, if the backend has one.
    async fn at(&self, key: u64) -> Result<Option<Self::Item>>;
}

/// Blocks served by an [`ExplorerApi`], keyed by height.
pub struct BlockSource<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> BlockSource<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: ?Sized> Clone for BlockSource<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

#[async_trait]
impl<A: ExplorerApi + ?Sized> ItemSource for BlockSource<A> {
    type Item = Block;

    async fn latest(&self, limit: usize) -> Result<Vec<Block>> {
        self.api.get_blocks(Some(limit)).await
    }

    async fn at(&self, key: u64) -> Result<Option<Block>> {
        self.api.get_block(key).await
    }
}
