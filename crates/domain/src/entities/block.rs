use crate::entities::{Keyed, null_as_default};
use crate::entities::transaction::Transaction;
use crate::value_objects::NumberOrString;
use serde::{Deserialize, Serialize};

/// A block as served by the explorer backend. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub height: u64,
    pub hash: String,
    #[serde(default)]
    pub previous_hash: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_stamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: Vec<Transaction>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pos_proof: PosProof,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pot_proof: PotProof,
    #[serde(default, deserialize_with = "null_as_default")]
    pub miner_public_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quality: f64,
}

/// Proof-of-space attached by the winning miner. Opaque to the explorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosProof {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sloth_result: SlothResult,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proof: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub challenge: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub winning_filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlothResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: NumberOrString,
    #[serde(default, deserialize_with = "null_as_default")]
    pub iterations: u64,
}

/// Proof-of-time attached by the timelord. Opaque to the explorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotProof {
    #[serde(default, deserialize_with = "null_as_default")]
    pub proof: NumberOrString,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_key_timelord: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub l_prime: NumberOrString,
    #[serde(default, deserialize_with = "null_as_default")]
    pub t: u64,
}

impl Block {
    /// Finds a transaction of this block by id.
    pub fn find_transaction(&self, transaction_id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|tx| tx.id() == Some(transaction_id))
    }

    /// Whether this block contains the given transaction id.
    pub fn contains_transaction(&self, transaction_id: &str) -> bool {
        self.find_transaction(transaction_id).is_some()
    }
}

impl Keyed for Block {
    fn key(&self) -> u64 {
        self.height
    }
}
