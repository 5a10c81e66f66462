//! Chain-agnostic transaction records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An address taking part in a transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionAddress {
    /// The address
    pub address: String,
    /// Whether the address belongs to this wallet
    pub mine: bool,
}

impl TransactionAddress {
    /// Creates a transaction address
    pub fn new(address: impl Into<String>, mine: bool) -> Self {
        Self {
            address: address.into(),
            mine,
        }
    }
}

/// Position in a transaction history, used to page backwards.
///
/// The inter-transaction index disambiguates entries of the same block on
/// chains without a strict per-block transaction index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionCursor {
    /// Hash of the transaction
    pub hash: String,
    /// Secondary ordering key of the transaction
    pub inter_transaction_index: u64,
}

impl TransactionCursor {
    /// Creates a cursor
    pub fn new(hash: impl Into<String>, inter_transaction_index: u64) -> Self {
        Self {
            hash: hash.into(),
            inter_transaction_index,
        }
    }
}

/// A transaction as the wallet sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash/ID
    pub transaction_hash: String,
    /// Index inside the block
    pub transaction_index: u32,
    /// Secondary ordering key (e.g. an action sequence number)
    pub inter_transaction_index: u64,
    /// Height of the including block, if known
    pub block_height: Option<u64>,
    /// Signed amount; negative when this wallet is the sender
    pub amount: Decimal,
    /// Timestamp of the transaction
    pub date: DateTime<Utc>,
    /// Senders
    pub from: Vec<TransactionAddress>,
    /// Recipients
    pub to: Vec<TransactionAddress>,
}

impl TransactionRecord {
    /// Cursor pointing at this record
    pub fn cursor(&self) -> TransactionCursor {
        TransactionCursor::new(self.transaction_hash.clone(), self.inter_transaction_index)
    }

    /// Returns true if the wallet sent this transaction
    pub fn is_outgoing(&self) -> bool {
        self.from.iter().any(|address| address.mine)
    }

    /// Number of confirmations given the current chain height
    pub fn confirmations(&self, last_block_height: Option<u64>) -> u64 {
        match (self.block_height, last_block_height) {
            (Some(height), Some(last)) if last >= height => last - height + 1,
            _ => 0,
        }
    }
}
