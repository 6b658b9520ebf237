pub mod block;
pub mod storage_contract;
pub mod transaction;
pub mod wallet;

// Re-export for easier access
pub use block::{Block, PosProof, PotProof, SlothResult};
pub use storage_contract::{FileProvingWindow, StorageContract};
pub use transaction::{ContractTerms, CurrencyTransfer, FileProof, FileProofSubmission, StorageContractSubmission, Transaction};
pub use wallet::{WalletBalance, WalletDetails};

use serde::{Deserialize, Deserializer};

/// An item ordered by a monotonically increasing integer key.
///
/// Blocks are keyed by height. Polled lists use the key for ordering and
/// de-duplication.
pub trait Keyed {
    fn key(&self) -> u64;
}

/// Reads an explicit `null` as the field's default. Pair with
/// `#[serde(default)]` so a missing key behaves the same.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
