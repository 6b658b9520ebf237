use crate::enums::{FileProvingWindowState, StorageType};
use crate::value_objects::ArchivedFileName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Backend-issued agreement describing a file, its storer and proof schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageContract {
    pub merkle_root: String,
    pub file_url: String,
    #[serde(default)]
    pub fccn_signature: Option<String>,
    #[serde(default)]
    pub storer_signature: Option<String>,
    pub storer_address: String,
    pub timestamp: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub proof_frequency: u64,
    pub window_size: u64,
    pub file_length: u64,
    pub hash: String,
    pub storage_type: StorageType,
}

impl StorageContract {
    /// Archived name and capture date decoded from the file URL.
    pub fn archived_file(&self) -> ArchivedFileName {
        ArchivedFileName::from_file_url(&self.file_url)
    }

    /// Contract hash as hex, the form the contract details route expects.
    pub fn hash_hex(&self) -> String {
        crate::format::base64_to_hex(&self.hash)
    }
}

/// A window in which the storer must prove possession of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileProvingWindow {
    pub po_dp_challenge: String,
    pub start_block_index: u64,
    pub end_block_index: u64,
    pub state: FileProvingWindowState,
}
