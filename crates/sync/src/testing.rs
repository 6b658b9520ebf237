//! In-memory explorer backend for tests.

use archive_explorer_data::{ApiError, ExplorerApi, Result, RetrievedFile};
use archive_explorer_domain::entities::{
    Block, FileProvingWindow, PosProof, PotProof, StorageContract, Transaction, WalletBalance,
    WalletDetails,
};
use archive_explorer_domain::metrics::MinedCoins;
use archive_explorer_domain::value_objects::NumberOrString;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};

/// A block at `height` carrying one currency transaction `tx-{height}`.
pub fn block(height: u64) -> Block {
    let mut tx = Transaction::currency("alice", "bob", Decimal::from(height));
    if let Transaction::CurrencyTransaction(transfer) = &mut tx {
        transfer.transaction_id = Some(format!("tx-{height}"));
    }
    Block {
        height,
        hash: format!("Hash{height:04}"),
        previous_hash: height.checked_sub(1).map(|h| format!("Hash{h:04}")),
        time_stamp: "2024-01-01T00:00:00Z".to_string(),
        transactions: vec![tx],
        signature: String::new(),
        pos_proof: PosProof::default(),
        pot_proof: PotProof::default(),
        miner_public_key: String::new(),
        quality: 0.0,
    }
}

pub fn contract(n: usize) -> StorageContract {
    serde_json::from_value(serde_json::json!({
        "merkleRoot": "root",
        "fileUrl": format!("20240101000000/file-{n}.html"),
        "storerAddress": "storer",
        "timestamp": "2024-01-01T00:00:00Z",
        "value": 1,
        "proofFrequency": 10,
        "windowSize": 5,
        "fileLength": 100,
        "hash": "aGFzaA==",
        "storageType": "AES"
    }))
    .unwrap()
}

/// Holds every gated request until released.
pub struct Gate(Arc<Semaphore>);

impl Gate {
    pub fn release(self) {
        self.0.close();
    }
}

#[derive(Default)]
pub struct MockExplorer {
    chain: Mutex<BTreeMap<u64, Block>>,
    next_blocks: Mutex<Option<Vec<Block>>>,
    fail_next: AtomicBool,
    fail_always: AtomicBool,
    limits: Mutex<Vec<usize>>,
    heights: Mutex<Vec<u64>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
    pending: Notify,
    pub contracts: Mutex<Vec<StorageContract>>,
    pub windows: Mutex<Vec<FileProvingWindow>>,
    pub wallets: Mutex<HashMap<String, WalletDetails>>,
    pub stats: Mutex<Vec<Option<NumberOrString>>>,
    pub mined: Mutex<Option<MinedCoins>>,
    pub files: Mutex<HashMap<String, RetrievedFile>>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl MockExplorer {
    pub fn with_chain(heights: RangeInclusive<u64>) -> Self {
        let mock = Self::default();
        mock.push_blocks(heights);
        mock
    }

    pub fn push_blocks(&self, heights: RangeInclusive<u64>) {
        let mut chain = self.chain.lock().unwrap();
        for h in heights {
            chain.insert(h, block(h));
        }
    }

    /// Overrides the next `get_blocks` response.
    pub fn respond_with_blocks(&self, blocks: Vec<Block>) {
        *self.next_blocks.lock().unwrap() = Some(blocks);
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn fail_always(&self) {
        self.fail_always.store(true, Ordering::SeqCst);
    }

    /// Limits passed to `get_blocks`, in call order.
    pub fn requested_limits(&self) -> Vec<usize> {
        self.limits.lock().unwrap().clone()
    }

    /// Heights passed to `get_block`, in call order.
    pub fn requested_heights(&self) -> Vec<u64> {
        self.heights.lock().unwrap().clone()
    }

    /// Blocks every subsequent block request until the gate is released.
    pub fn hold_requests(&self) -> Gate {
        let semaphore = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(Arc::clone(&semaphore));
        Gate(semaphore)
    }

    /// Waits until a request is parked at the gate.
    pub async fn wait_for_pending(&self) {
        self.pending.notified().await;
    }

    async fn pass_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(semaphore) = gate {
            self.pending.notify_one();
            let _ = semaphore.acquire().await;
        }
    }

    fn check_failure(&self, endpoint: &str) -> Result<()> {
        if self.fail_always.load(Ordering::SeqCst) || self.fail_next.swap(false, Ordering::SeqCst)
        {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 503,
            });
        }
        Ok(())
    }

    fn stat(&self, index: usize) -> Option<NumberOrString> {
        self.stats.lock().unwrap().get(index).cloned().flatten()
    }
}

#[async_trait]
impl ExplorerApi for MockExplorer {
    async fn get_blocks(&self, limit: Option<usize>) -> Result<Vec<Block>> {
        self.limits.lock().unwrap().push(limit.unwrap_or(0));
        self.pass_gate().await;
        self.check_failure("getBlocks")?;

        if let Some(blocks) = self.next_blocks.lock().unwrap().take() {
            return Ok(blocks);
        }
        let chain = self.chain.lock().unwrap();
        Ok(chain
            .values()
            .rev()
            .take(limit.unwrap_or(chain.len()))
            .cloned()
            .collect())
    }

    async fn get_block(&self, height: u64) -> Result<Option<Block>> {
        self.heights.lock().unwrap().push(height);
        self.pass_gate().await;
        self.check_failure("getBlock")?;
        Ok(self.chain.lock().unwrap().get(&height).cloned())
    }

    async fn get_wallet_balances(&self) -> Result<Vec<WalletBalance>> {
        self.check_failure("walletBalances")?;
        Ok(self
            .wallets
            .lock()
            .unwrap()
            .values()
            .map(|w| WalletBalance {
                wallet_address: w.address.clone(),
                balance: w.balance,
            })
            .collect())
    }

    async fn get_wallet_details(&self, address: &str) -> Result<Option<WalletDetails>> {
        self.check_failure("getWalletDetails")?;
        Ok(self.wallets.lock().unwrap().get(address).cloned())
    }

    async fn get_stored_files(&self) -> Result<Vec<String>> {
        self.check_failure("storedFiles")?;
        Ok(self.files.lock().unwrap().keys().cloned().collect())
    }

    async fn get_storage_contracts(&self, _file_name: &str) -> Result<Vec<StorageContract>> {
        self.check_failure("storageContracts")?;
        Ok(self.contracts.lock().unwrap().clone())
    }

    async fn get_storage_contracts_chunk(
        &self,
        _file_name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<StorageContract>> {
        self.check_failure("storageContractsChunk")?;
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_storage_contract(
        &self,
        contract_hash: &str,
        file_url: &str,
    ) -> Result<Option<StorageContract>> {
        self.check_failure("getStorageContract")?;
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.hash_hex() == contract_hash && c.file_url == file_url)
            .cloned())
    }

    async fn get_contract_file_proving_windows(
        &self,
        _contract_hash: &str,
    ) -> Result<Vec<FileProvingWindow>> {
        self.check_failure("getContractFileProvingWindows")?;
        Ok(self.windows.lock().unwrap().clone())
    }

    async fn get_archived_storage(&self) -> Result<Option<NumberOrString>> {
        self.check_failure("getArchivedStorage")?;
        Ok(self.stat(0))
    }

    async fn get_total_amount_of_contracts(&self) -> Result<Option<NumberOrString>> {
        self.check_failure("getTotalAmountOfContracts")?;
        Ok(self.stat(1))
    }

    async fn get_total_amount_of_coins(&self) -> Result<Option<NumberOrString>> {
        self.check_failure("getTotalAmountOfCoins")?;
        Ok(self.stat(2))
    }

    async fn get_total_amount_of_files(&self) -> Result<Option<NumberOrString>> {
        self.check_failure("getTotalAmountOfFiles")?;
        Ok(self.stat(3))
    }

    async fn get_mined_coins(&self) -> Result<MinedCoins> {
        self.check_failure("getMinedCoins")?;
        Ok(self.mined.lock().unwrap().clone().unwrap_or_default())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<String> {
        self.check_failure("transactions")?;
        self.sent.lock().unwrap().push(transaction.clone());
        Ok("Transaction accepted".to_string())
    }

    async fn send_block(&self, _block: &Block) -> Result<String> {
        self.check_failure("blocks")?;
        Ok("Block accepted".to_string())
    }

    async fn archive_file(
        &self,
        _file: &serde_json::Value,
        _data: &serde_json::Value,
    ) -> Result<String> {
        self.check_failure("archive")?;
        Ok("File archived successfully".to_string())
    }

    async fn retrieve_file(&self, filename: &str) -> Result<RetrievedFile> {
        self.check_failure("retrieveFile")?;
        self.files
            .lock()
            .unwrap()
            .get(filename)
            .cloned()
            .ok_or(ApiError::Status {
                endpoint: "retrieveFile".to_string(),
                status: 404,
            })
    }
}
