//! Domain model for the ArchiveChain explorer.
//!
//! This crate holds the data the explorer backend serves and the pure
//! helpers used to present it:
//! - Blocks with their proof-of-space / proof-of-time payloads
//! - Transactions as a sum type over the three transaction kinds
//! - Wallets, storage contracts and file proving windows
//! - Display formatting for archived filenames, sizes and balances
//! - Mined-coin chart aggregation

/// Block, transaction, wallet and contract entities.
pub mod entities;
/// Enumerations shared across entities.
pub mod enums;
/// Domain errors.
pub mod error;
/// Display formatting helpers.
pub mod format;
/// Aggregations over backend series.
pub mod metrics;
/// Small value types.
pub mod value_objects;

pub use entities::Keyed;
pub use error::DomainError;
