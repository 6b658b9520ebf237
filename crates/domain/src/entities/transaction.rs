//! Transactions carried in blocks.
//!
//! The backend sends every transaction as one loosely typed record with a
//! `type` discriminator. Here each kind is its own variant carrying only the
//! fields that kind uses.

use crate::enums::TransactionKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A transaction, tagged by its `type` field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transaction {
    /// Coin transfer between two wallets.
    CurrencyTransaction(CurrencyTransfer),
    /// Proof that a storer still holds a contracted file.
    FileProof(FileProofSubmission),
    /// Submission of a new storage contract.
    StorageContractSubmission(StorageContractSubmission),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTransfer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub sender_address: String,
    #[serde(default)]
    pub receiver_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_pk: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileProofSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_proof: Option<FileProof>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storer_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storer_signature: Option<String>,
}

/// Merkle proof payload of a file proof.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileProof {
    #[serde(default)]
    pub merkle_proof: Vec<String>,
    #[serde(default)]
    pub storage_contract_hash: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_dp_challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_block_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_block_index: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageContractSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<ContractTerms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storer_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storer_signature: Option<String>,
}

/// Terms of a submitted storage contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    #[serde(default)]
    pub file_url: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(default)]
    pub storer_address: String,
    #[serde(default)]
    pub hash: String,
}

impl Transaction {
    /// Creates an unsigned-by-wallet currency transfer, as submitted from the
    /// explorer's send form.
    pub fn currency(
        sender_address: impl Into<String>,
        receiver_address: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Transaction::CurrencyTransaction(CurrencyTransfer {
            transaction_id: None,
            amount,
            sender_address: sender_address.into(),
            receiver_address: receiver_address.into(),
            signature: None,
            sender_pk: None,
        })
    }

    /// Kind tag of this transaction.
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::CurrencyTransaction(_) => TransactionKind::CurrencyTransaction,
            Transaction::FileProof(_) => TransactionKind::FileProof,
            Transaction::StorageContractSubmission(_) => {
                TransactionKind::StorageContractSubmission
            }
        }
    }

    /// Transaction id, when the backend assigned one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Transaction::CurrencyTransaction(tx) => tx.transaction_id.as_deref(),
            Transaction::FileProof(tx) => tx.transaction_id.as_deref(),
            Transaction::StorageContractSubmission(tx) => tx.transaction_id.as_deref(),
        }
    }

    /// File URL referenced by file proofs and contract submissions.
    pub fn file_url(&self) -> Option<&str> {
        match self {
            Transaction::CurrencyTransaction(_) => None,
            Transaction::FileProof(tx) => tx.file_proof.as_ref().map(|p| p.file_url.as_str()),
            Transaction::StorageContractSubmission(tx) => {
                tx.contract.as_ref().map(|c| c.file_url.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decode_currency_transaction() {
        let json = r#"{
            "type": "CURRENCY_TRANSACTION",
            "transactionId": "tx-1",
            "amount": 12.5,
            "senderAddress": "alice",
            "receiverAddress": "bob"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.kind(), TransactionKind::CurrencyTransaction);
        assert_eq!(tx.id(), Some("tx-1"));
        match tx {
            Transaction::CurrencyTransaction(t) => {
                assert_eq!(t.amount, dec!(12.5));
                assert_eq!(t.receiver_address, "bob");
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_decode_file_proof() {
        let json = r#"{
            "type": "FILE_PROOF",
            "transactionId": "tx-2",
            "fileProof": {
                "merkleProof": ["a", "b"],
                "storageContractHash": "c2hh",
                "fileUrl": "20240101000000/page.html",
                "startBlockIndex": 10,
                "endBlockIndex": 20
            },
            "storerPublicKey": "pk"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.kind(), TransactionKind::FileProof);
        assert_eq!(tx.file_url(), Some("20240101000000/page.html"));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"type": "MINT", "transactionId": "x"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_currency_constructor_serializes_type_tag() {
        let tx = Transaction::currency("alice", "bob", dec!(3));
        let value = serde_json::to_value(&tx).unwrap();

        assert_eq!(value["type"], "CURRENCY_TRANSACTION");
        assert_eq!(value["senderAddress"], "alice");
        assert_eq!(value["amount"], 3.0);
        assert!(value.get("transactionId").is_none());
    }
}
