//! The explorer backend as seen by the client.

use crate::error::Result;
use crate::file_viewer::RetrievedFile;
use archive_explorer_domain::entities::{
    Block, FileProvingWindow, StorageContract, Transaction, WalletBalance, WalletDetails,
};
use archive_explorer_domain::metrics::MinedCoins;
use archive_explorer_domain::value_objects::NumberOrString;
use async_trait::async_trait;

/// Read and submit operations exposed by the ArchiveChain explorer REST API.
///
/// Single-item reads return `Ok(None)` when the backend answers with an empty
/// or `null` body. List reads return an empty list in the same case.
#[async_trait]
pub trait ExplorerApi: Send + Sync {
    /// Most recent blocks, newest first. `None` lets the backend pick the count.
    async fn get_blocks(&self, limit: Option<usize>) -> Result<Vec<Block>>;

    /// Block at the given height.
    async fn get_block(&self, height: u64) -> Result<Option<Block>>;

    async fn get_wallet_balances(&self) -> Result<Vec<WalletBalance>>;

    async fn get_wallet_details(&self, address: &str) -> Result<Option<WalletDetails>>;

    /// Filenames of every file archived on the network.
    async fn get_stored_files(&self) -> Result<Vec<String>>;

    /// Contracts for a file; an empty name lists all contracts.
    async fn get_storage_contracts(&self, file_name: &str) -> Result<Vec<StorageContract>>;

    /// One page of contracts starting at `offset`.
    async fn get_storage_contracts_chunk(
        &self,
        file_name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<StorageContract>>;

    async fn get_storage_contract(
        &self,
        contract_hash: &str,
        file_url: &str,
    ) -> Result<Option<StorageContract>>;

    /// Proving windows of a contract in backend order (oldest first).
    async fn get_contract_file_proving_windows(
        &self,
        contract_hash: &str,
    ) -> Result<Vec<FileProvingWindow>>;

    /// Total archived bytes.
    async fn get_archived_storage(&self) -> Result<Option<NumberOrString>>;

    async fn get_total_amount_of_contracts(&self) -> Result<Option<NumberOrString>>;

    async fn get_total_amount_of_coins(&self) -> Result<Option<NumberOrString>>;

    async fn get_total_amount_of_files(&self) -> Result<Option<NumberOrString>>;

    async fn get_mined_coins(&self) -> Result<MinedCoins>;

    /// Submits a transaction, returning the backend's acknowledgement.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<String>;

    /// Submits a block, returning the backend's acknowledgement.
    async fn send_block(&self, block: &Block) -> Result<String>;

    /// Requests archival of a file.
    async fn archive_file(
        &self,
        file: &serde_json::Value,
        data: &serde_json::Value,
    ) -> Result<String>;

    /// Raw bytes of an archived file from the storage node.
    async fn retrieve_file(&self, filename: &str) -> Result<RetrievedFile>;
}
