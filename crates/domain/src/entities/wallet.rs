use crate::entities::storage_contract::StorageContract;
use crate::entities::transaction::Transaction;
use crate::format::parse_backend_timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub wallet_address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Full view of one wallet: won blocks, transactions and contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDetails {
    pub address: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub won_blocks: Vec<u64>,
    /// Sent as a number or a numeric string depending on backend version.
    pub balance: Decimal,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub storage_contracts: Vec<StorageContract>,
}

impl WalletDetails {
    /// Orders transactions by id, newest id first, and contracts by
    /// timestamp, newest first. Contracts with unparseable timestamps sort last.
    pub fn sort_for_display(&mut self) {
        self.transactions
            .sort_by(|a, b| b.id().unwrap_or("").cmp(a.id().unwrap_or("")));

        self.storage_contracts.sort_by(|a, b| {
            let ta = parse_backend_timestamp(&a.timestamp);
            let tb = parse_backend_timestamp(&b.timestamp);
            match (ta, tb) {
                (Some(ta), Some(tb)) => tb.cmp(&ta),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }

    /// Total bytes under contract for this wallet.
    pub fn total_storage(&self) -> u64 {
        self.storage_contracts.iter().map(|c| c.file_length).sum()
    }
}
