use serde::{Deserialize, Serialize};
use std::fmt;

/// How a stored file is encoded by its storer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    #[serde(rename = "AES")]
    Aes,
    #[serde(rename = "VDE")]
    Vde,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Aes => f.write_str("AES"),
            StorageType::Vde => f.write_str("VDE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileProvingWindowState {
    Pending,
    Proving,
    Proved,
    Failed,
}

impl fmt::Display for FileProvingWindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileProvingWindowState::Pending => "PENDING",
            FileProvingWindowState::Proving => "PROVING",
            FileProvingWindowState::Proved => "PROVED",
            FileProvingWindowState::Failed => "FAILED",
        };
        f.write_str(label)
    }
}

/// Tag of a [`Transaction`](crate::entities::Transaction) without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    CurrencyTransaction,
    FileProof,
    StorageContractSubmission,
}

impl TransactionKind {
    /// Wire name of the kind, as carried in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::CurrencyTransaction => "CURRENCY_TRANSACTION",
            TransactionKind::FileProof => "FILE_PROOF",
            TransactionKind::StorageContractSubmission => "STORAGE_CONTRACT_SUBMISSION",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
