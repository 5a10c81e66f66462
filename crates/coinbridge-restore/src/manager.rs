//! Storage of restore settings.

use coinbridge_error::RestoreResult;
use coinbridge_traits::{Account, Coin, RestoreSettings};
use dashmap::DashMap;

/// Persists restore settings per (account, coin)
pub trait RestoreSettingsManager: Send + Sync {
    /// Stored settings, empty if none
    fn settings(&self, account: &Account, coin: &Coin) -> RestoreSettings;

    /// Stores `settings`, overwriting prior values for the keys it contains
    fn save(&self, settings: &RestoreSettings, account: &Account, coin: &Coin) -> RestoreResult<()>;
}

/// Process-local settings store
#[derive(Debug, Default)]
pub struct InMemoryRestoreSettingsManager {
    entries: DashMap<(String, Coin), RestoreSettings>,
}

impl InMemoryRestoreSettingsManager {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything stored for `account`
    pub fn remove_account(&self, account: &Account) {
        self.entries.retain(|(account_id, _), _| account_id != &account.id);
    }

    /// Number of (account, coin) entries stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RestoreSettingsManager for InMemoryRestoreSettingsManager {
    fn settings(&self, account: &Account, coin: &Coin) -> RestoreSettings {
        self.entries
            .get(&(account.id.clone(), coin.clone()))
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn save(
        &self,
        settings: &RestoreSettings,
        account: &Account,
        coin: &Coin,
    ) -> RestoreResult<()> {
        self.entries
            .entry((account.id.clone(), coin.clone()))
            .or_default()
            .merge(settings);
        Ok(())
    }
}
