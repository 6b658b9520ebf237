//! Offset pager over the storage contracts list.

use archive_explorer_data::ExplorerApi;
use archive_explorer_domain::entities::StorageContract;
use std::sync::Arc;
use tracing::{debug, warn};

/// Contracts requested per chunk.
pub const CONTRACTS_PAGE_SIZE: usize = 10;

/// Accumulates storage contracts chunk by chunk.
///
/// A chunk shorter than the page size means the list is exhausted. A failed
/// chunk also stops paging; the contracts loaded so far are kept.
pub struct ContractPager<A: ?Sized> {
    api: Arc<A>,
    file_name: String,
    page_size: usize,
    offset: usize,
    has_more: bool,
    contracts: Vec<StorageContract>,
}

impl<A: ExplorerApi + ?Sized> ContractPager<A> {
    /// Pager over every contract, or those of `file_name` when non-empty.
    pub fn new(api: Arc<A>, file_name: impl Into<String>) -> Self {
        Self {
            api,
            file_name: file_name.into(),
            page_size: CONTRACTS_PAGE_SIZE,
            offset: 0,
            has_more: true,
            contracts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fetches the next chunk. Returns how many contracts it added.
    pub async fn load_more(&mut self) -> usize {
        if !self.has_more {
            return 0;
        }

        match self
            .api
            .get_storage_contracts_chunk(&self.file_name, self.offset, self.page_size)
            .await
        {
            Ok(chunk) => {
                let loaded = chunk.len();
                self.has_more = loaded == self.page_size;
                self.offset += loaded;
                self.contracts.extend(chunk);
                debug!(offset = self.offset, loaded, has_more = self.has_more, "Loaded contracts chunk");
                loaded
            }
            Err(e) => {
                warn!(offset = self.offset, error = %e, "Failed to load contracts chunk");
                self.has_more = false;
                0
            }
        }
    }

    pub fn contracts(&self) -> &[StorageContract] {
        &self.contracts
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}
