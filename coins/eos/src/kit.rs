//! Contract of the EOS kit an adapter wraps.
//!
//! The kit owns networking, signing and synchronization for one EOS account
//! and may serve several registered tokens. Adapters only read from it and
//! submit transfers through it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::EosKitError;

/// Synchronization state of a registered asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitSyncState {
    Synced,
    NotSynced,
    Syncing,
}

/// Token contract and symbol identifying an asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId {
    pub token: String,
    pub symbol: String,
}

impl AssetId {
    pub fn new(token: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            symbol: symbol.into(),
        }
    }
}

/// Amount of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: Decimal,
    pub symbol: String,
}

/// A transfer action as reported by the kit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EosTransaction {
    pub id: String,
    /// Per-account action sequence; strictly increasing
    pub action_sequence: u64,
    pub block_number: Option<u64>,
    pub from: String,
    pub to: String,
    pub quantity: Quantity,
    pub memo: Option<String>,
    pub date: DateTime<Utc>,
}

/// Live view of one registered asset.
///
/// Each receiver holds the current value and is notified on change.
#[derive(Debug, Clone)]
pub struct Asset {
    pub id: AssetId,
    pub balance: watch::Receiver<Decimal>,
    pub sync_state: watch::Receiver<KitSyncState>,
    /// Newest first
    pub transactions: watch::Receiver<Vec<EosTransaction>>,
}

impl Asset {
    /// Current balance
    pub fn current_balance(&self) -> Decimal {
        *self.balance.borrow()
    }

    /// Current sync state
    pub fn current_sync_state(&self) -> KitSyncState {
        *self.sync_state.borrow()
    }
}

/// EOS SDK instance for one account
#[async_trait]
pub trait EosKit: Send + Sync {
    /// Account name the kit operates on
    fn account(&self) -> &str;

    /// Starts tracking a token and returns its live view
    fn register(&self, token: &str, symbol: &str) -> Asset;

    /// Last irreversible block height, once known
    fn irreversible_block_height(&self) -> Option<u64>;

    /// Receiver of the last irreversible block height
    fn irreversible_block_height_updates(&self) -> watch::Receiver<Option<u64>>;

    /// Up to `limit` transactions of `asset`, newest first, with an action
    /// sequence strictly below `from_action_sequence` when given
    async fn transactions(
        &self,
        asset: &AssetId,
        from_action_sequence: Option<u64>,
        limit: usize,
    ) -> Result<Vec<EosTransaction>, EosKitError>;

    /// Submits a transfer of `amount` of `asset` to `to`
    async fn send(
        &self,
        asset: &AssetId,
        to: &str,
        amount: Decimal,
        memo: &str,
    ) -> Result<EosTransaction, EosKitError>;
}
