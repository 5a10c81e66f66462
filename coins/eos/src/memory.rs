//! In-memory [`EosKit`] for tests and demos.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::error::EosKitError;
use crate::kit::{Asset, AssetId, EosKit, EosTransaction, KitSyncState, Quantity};

struct AssetChannels {
    balance: watch::Sender<Decimal>,
    sync_state: watch::Sender<KitSyncState>,
    transactions: watch::Sender<Vec<EosTransaction>>,
}

impl AssetChannels {
    fn new() -> Self {
        Self {
            balance: watch::Sender::new(Decimal::ZERO),
            sync_state: watch::Sender::new(KitSyncState::NotSynced),
            transactions: watch::Sender::new(Vec::new()),
        }
    }

    fn asset(&self, id: AssetId) -> Asset {
        Asset {
            id,
            balance: self.balance.subscribe(),
            sync_state: self.sync_state.subscribe(),
            transactions: self.transactions.subscribe(),
        }
    }
}

/// Kit holding its whole state in memory.
///
/// Setters publish through the same watch channels a networked kit would,
/// so adapters and their streams behave identically. Sends are recorded as
/// pending transfers and debit the balance.
pub struct InMemoryEosKit {
    account: String,
    irreversible_height: watch::Sender<Option<u64>>,
    assets: DashMap<AssetId, AssetChannels>,
    send_count: AtomicUsize,
    send_failure: Mutex<Option<EosKitError>>,
}

impl InMemoryEosKit {
    /// Creates a kit for `account` with no assets and no known height
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            irreversible_height: watch::Sender::new(None),
            assets: DashMap::new(),
            send_count: AtomicUsize::new(0),
            send_failure: Mutex::new(None),
        }
    }

    /// Publishes a new last irreversible block height
    pub fn set_irreversible_block_height(&self, height: u64) {
        self.irreversible_height.send_replace(Some(height));
    }

    /// Publishes a new balance for `asset`
    pub fn set_balance(&self, asset: &AssetId, balance: Decimal) {
        self.with_channels(asset, |channels| {
            channels.balance.send_replace(balance);
        });
    }

    /// Publishes a new sync state for `asset`
    pub fn set_sync_state(&self, asset: &AssetId, state: KitSyncState) {
        self.with_channels(asset, |channels| {
            channels.sync_state.send_replace(state);
        });
    }

    /// Replaces the history of `asset`
    pub fn set_transactions(&self, asset: &AssetId, mut transactions: Vec<EosTransaction>) {
        sort_newest_first(&mut transactions);
        self.with_channels(asset, |channels| {
            channels.transactions.send_replace(transactions);
        });
    }

    /// Adds one transfer to the history of `asset`
    pub fn push_transaction(&self, asset: &AssetId, transaction: EosTransaction) {
        self.with_channels(asset, |channels| {
            channels.transactions.send_modify(|history| {
                history.push(transaction);
                sort_newest_first(history);
            });
        });
    }

    /// Makes every following send fail with `error`, or succeed again with `None`
    pub fn set_send_failure(&self, error: Option<EosKitError>) {
        *self
            .send_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = error;
    }

    /// Number of sends that reached the kit
    pub fn send_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }

    fn with_channels<R>(&self, asset: &AssetId, f: impl FnOnce(&AssetChannels) -> R) -> R {
        let channels = self
            .assets
            .entry(asset.clone())
            .or_insert_with(AssetChannels::new);
        f(&channels)
    }

    fn configured_failure(&self) -> Option<EosKitError> {
        self.send_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn sort_newest_first(transactions: &mut [EosTransaction]) {
    transactions.sort_by(|a, b| b.action_sequence.cmp(&a.action_sequence));
}

fn unknown_asset(asset: &AssetId) -> EosKitError {
    EosKitError::UnknownAsset {
        token: asset.token.clone(),
        symbol: asset.symbol.clone(),
    }
}

#[async_trait]
impl EosKit for InMemoryEosKit {
    fn account(&self) -> &str {
        &self.account
    }

    fn register(&self, token: &str, symbol: &str) -> Asset {
        let id = AssetId::new(token, symbol);
        self.with_channels(&id, |channels| channels.asset(id.clone()))
    }

    fn irreversible_block_height(&self) -> Option<u64> {
        *self.irreversible_height.borrow()
    }

    fn irreversible_block_height_updates(&self) -> watch::Receiver<Option<u64>> {
        self.irreversible_height.subscribe()
    }

    async fn transactions(
        &self,
        asset: &AssetId,
        from_action_sequence: Option<u64>,
        limit: usize,
    ) -> Result<Vec<EosTransaction>, EosKitError> {
        let channels = self.assets.get(asset).ok_or_else(|| unknown_asset(asset))?;
        let history = channels.transactions.borrow();

        Ok(history
            .iter()
            .filter(|tx| from_action_sequence.map_or(true, |from| tx.action_sequence < from))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn send(
        &self,
        asset: &AssetId,
        to: &str,
        amount: Decimal,
        memo: &str,
    ) -> Result<EosTransaction, EosKitError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.configured_failure() {
            return Err(error);
        }

        let channels = self.assets.get(asset).ok_or_else(|| unknown_asset(asset))?;
        let balance = *channels.balance.borrow();
        if amount > balance {
            return Err(EosKitError::InsufficientBalance);
        }

        let action_sequence = channels
            .transactions
            .borrow()
            .iter()
            .map(|tx| tx.action_sequence)
            .max()
            .map_or(0, |last| last + 1);

        let transaction = EosTransaction {
            id: format!("{action_sequence:064x}"),
            action_sequence,
            block_number: None,
            from: self.account.clone(),
            to: to.to_string(),
            quantity: Quantity {
                amount,
                symbol: asset.symbol.clone(),
            },
            memo: Some(memo.to_string()),
            date: Utc::now(),
        };

        if to != self.account {
            channels.balance.send_replace(balance - amount);
        }
        channels.transactions.send_modify(|history| {
            history.insert(0, transaction.clone());
        });

        debug!(to = %to, amount = %amount, action_sequence, "In-memory transfer recorded");
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinbridge_testing::fixtures::timestamp;

    fn eos() -> AssetId {
        AssetId::new("eosio.token", "EOS")
    }

    fn transfer(action_sequence: u64) -> EosTransaction {
        EosTransaction {
            id: format!("tx{action_sequence}"),
            action_sequence,
            block_number: Some(100 + action_sequence),
            from: "alice".to_string(),
            to: "bob".to_string(),
            quantity: Quantity {
                amount: Decimal::ONE,
                symbol: "EOS".to_string(),
            },
            memo: None,
            date: timestamp(action_sequence as i64),
        }
    }

    #[test]
    fn test_register_sees_current_values() {
        let kit = InMemoryEosKit::new("bob");
        kit.set_balance(&eos(), Decimal::TEN);

        let asset = kit.register("eosio.token", "EOS");
        assert_eq!(asset.current_balance(), Decimal::TEN);
        assert_eq!(asset.current_sync_state(), KitSyncState::NotSynced);
    }

    #[test]
    fn test_history_is_kept_newest_first() {
        let kit = InMemoryEosKit::new("bob");
        kit.set_transactions(&eos(), vec![transfer(1), transfer(3)]);
        kit.push_transaction(&eos(), transfer(2));

        let asset = kit.register("eosio.token", "EOS");
        let sequences: Vec<u64> = asset
            .transactions
            .borrow()
            .iter()
            .map(|tx| tx.action_sequence)
            .collect();
        assert_eq!(sequences, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_transactions_page() {
        let kit = InMemoryEosKit::new("bob");
        kit.set_transactions(&eos(), (0..10).map(transfer).collect());

        let page = kit.transactions(&eos(), Some(5), 3).await.unwrap();
        let sequences: Vec<u64> = page.iter().map(|tx| tx.action_sequence).collect();
        assert_eq!(sequences, vec![4, 3, 2]);
    }

    #[tokio::test]
    async fn test_unknown_asset() {
        let kit = InMemoryEosKit::new("bob");
        let err = kit
            .transactions(&AssetId::new("other", "TOK"), None, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, EosKitError::UnknownAsset { .. }));
    }

    #[tokio::test]
    async fn test_send_debits_balance() {
        let kit = InMemoryEosKit::new("bob");
        kit.set_balance(&eos(), Decimal::TEN);
        kit.set_transactions(&eos(), vec![transfer(7)]);

        let tx = kit.send(&eos(), "alice", Decimal::ONE, "hi").await.unwrap();
        assert_eq!(tx.action_sequence, 8);
        assert_eq!(tx.memo.as_deref(), Some("hi"));
        assert_eq!(kit.send_count(), 1);

        let asset = kit.register("eosio.token", "EOS");
        assert_eq!(asset.current_balance(), Decimal::new(9, 0));
        assert_eq!(asset.transactions.borrow()[0].action_sequence, 8);
    }

    #[tokio::test]
    async fn test_send_failure() {
        let kit = InMemoryEosKit::new("bob");
        kit.register("eosio.token", "EOS");
        kit.set_send_failure(Some(EosKitError::Rpc("timeout".to_string())));

        let err = kit.send(&eos(), "alice", Decimal::ONE, "").await.unwrap_err();
        assert_eq!(err, EosKitError::Rpc("timeout".to_string()));
        assert_eq!(kit.send_count(), 1);
    }

    #[tokio::test]
    async fn test_send_over_balance() {
        let kit = InMemoryEosKit::new("bob");
        kit.set_balance(&eos(), Decimal::ONE);

        let err = kit.send(&eos(), "alice", Decimal::TEN, "").await.unwrap_err();
        assert_eq!(err, EosKitError::InsufficientBalance);
    }
}
