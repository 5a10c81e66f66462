//! Restore-settings negotiation.
//!
//! Adding a coin to a restored account may need input the wallet cannot
//! derive from the keys, such as the block height to start scanning history
//! from. [`RestoreSettingsService::approve_settings`] either approves the coin
//! right away or emits a [`RestoreSettingsRequest`]; the request is later
//! resolved by [`RestoreSettingsService::enter_request`] (approval) or
//! [`RestoreSettingsService::cancel_request`] (rejection).
//!
//! Every request carries a [`RequestId`], so two outstanding requests for the
//! same coin resolve independently. The coin-keyed [`RestoreSettingsService::enter`]
//! and [`RestoreSettingsService::cancel`] resolve the oldest request for the coin.

use coinbridge_error::{RestoreResult, RestoreSettingsError};
use coinbridge_traits::{Account, Coin, RestoreSettingType, RestoreSettings};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::manager::RestoreSettingsManager;

/// Default capacity of each event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Configuration for [`RestoreSettingsService`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreSettingsServiceConfig {
    /// Events buffered per subscriber before the slowest one lags
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl Default for RestoreSettingsServiceConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl RestoreSettingsServiceConfig {
    /// Set event channel capacity
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

/// Identifies one outstanding request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input the user must provide before a coin can be added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSettingsRequest {
    /// Correlates the eventual answer with this request
    pub id: RequestId,
    /// Coin being added
    pub coin: Coin,
    /// Setting that is missing
    pub setting_type: RestoreSettingType,
    /// Account the coin is added to
    pub account: Option<Account>,
}

/// A coin approved together with the settings it was approved with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinWithSettings {
    /// The coin
    pub coin: Coin,
    /// Settings snapshot at approval time
    pub settings: RestoreSettings,
    /// Request this approval resolves, if any
    pub request_id: Option<RequestId>,
}

/// A coin whose settings request the user declined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSettingsRejection {
    /// The coin
    pub coin: Coin,
    /// Request this rejection resolves, if any
    pub request_id: Option<RequestId>,
}

/// Outcome of [`RestoreSettingsService::approve_settings`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsDecision {
    /// The coin can be added now
    Approved(CoinWithSettings),
    /// Input is needed first
    Requested(RestoreSettingsRequest),
}

/// Decides whether adding a coin needs restore settings from the user
pub struct RestoreSettingsService {
    manager: Arc<dyn RestoreSettingsManager>,
    approve_tx: broadcast::Sender<CoinWithSettings>,
    reject_tx: broadcast::Sender<RestoreSettingsRejection>,
    request_tx: broadcast::Sender<RestoreSettingsRequest>,
    pending: DashMap<RequestId, RestoreSettingsRequest>,
    next_request_id: AtomicU64,
}

impl fmt::Debug for RestoreSettingsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoreSettingsService")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl RestoreSettingsService {
    /// Creates a service with the default configuration
    pub fn new(manager: Arc<dyn RestoreSettingsManager>) -> Self {
        Self::with_config(manager, RestoreSettingsServiceConfig::default())
    }

    /// Creates a service with an explicit configuration
    pub fn with_config(
        manager: Arc<dyn RestoreSettingsManager>,
        config: RestoreSettingsServiceConfig,
    ) -> Self {
        let capacity = config.event_capacity.max(1);
        let (approve_tx, _) = broadcast::channel(capacity);
        let (reject_tx, _) = broadcast::channel(capacity);
        let (request_tx, _) = broadcast::channel(capacity);

        Self {
            manager,
            approve_tx,
            reject_tx,
            request_tx,
            pending: DashMap::new(),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Approvals emitted from now on
    pub fn subscribe_approvals(&self) -> broadcast::Receiver<CoinWithSettings> {
        self.approve_tx.subscribe()
    }

    /// Rejections emitted from now on
    pub fn subscribe_rejections(&self) -> broadcast::Receiver<RestoreSettingsRejection> {
        self.reject_tx.subscribe()
    }

    /// Requests emitted from now on
    pub fn subscribe_requests(&self) -> broadcast::Receiver<RestoreSettingsRequest> {
        self.request_tx.subscribe()
    }

    /// Decides whether `coin` can be added to `account` as is.
    ///
    /// Created accounts (and calls without an account) are approved with
    /// empty settings. For restored accounts the first setting the coin
    /// requires but the store lacks is requested; if none is missing the
    /// coin is approved with the stored settings.
    pub fn approve_settings(&self, coin: &Coin, account: Option<&Account>) -> SettingsDecision {
        let account = match account {
            Some(account) if !account.is_created() => account,
            _ => {
                debug!(coin = %coin.code, "Fresh account, approving without restore settings");
                return SettingsDecision::Approved(self.emit_approval(CoinWithSettings {
                    coin: coin.clone(),
                    settings: RestoreSettings::new(),
                    request_id: None,
                }));
            }
        };

        let existing = self.manager.settings(account, coin);
        let required = coin.coin_type.restore_setting_types();

        let missing = RestoreSettingType::ALL
            .into_iter()
            .find(|setting| required.contains(setting) && !existing.contains(*setting));

        if let Some(setting_type) = missing {
            let request = RestoreSettingsRequest {
                id: RequestId(self.next_request_id.fetch_add(1, Ordering::SeqCst)),
                coin: coin.clone(),
                setting_type,
                account: Some(account.clone()),
            };
            debug!(
                coin = %coin.code,
                account = %account.id,
                request = %request.id,
                setting = %setting_type,
                "Requesting restore setting"
            );
            self.pending.insert(request.id, request.clone());
            if self.request_tx.send(request.clone()).is_err() {
                trace!(request = %request.id, "No request subscriber");
            }
            return SettingsDecision::Requested(request);
        }

        debug!(coin = %coin.code, account = %account.id, "Stored restore settings suffice");
        SettingsDecision::Approved(self.emit_approval(CoinWithSettings {
            coin: coin.clone(),
            settings: existing,
            request_id: None,
        }))
    }

    /// Approves `coin` with the given birthday height.
    ///
    /// Resolves the oldest pending birthday-height request for the coin. An
    /// empty string is a value, not a cancellation. Nothing is persisted.
    pub fn enter(&self, birthday_height: impl Into<String>, coin: &Coin) -> CoinWithSettings {
        let request = self.take_oldest_pending(coin, RestoreSettingType::BirthdayHeight);
        if request.is_none() {
            warn!(coin = %coin.code, "Birthday height entered without a pending request");
        }

        self.emit_approval(CoinWithSettings {
            coin: coin.clone(),
            settings: RestoreSettings::with_birthday_height(birthday_height),
            request_id: request.map(|request| request.id),
        })
    }

    /// Approves the coin of request `id` with `value` for the requested setting
    pub fn enter_request(
        &self,
        id: RequestId,
        value: impl Into<String>,
    ) -> RestoreResult<CoinWithSettings> {
        let (_, request) = self
            .pending
            .remove(&id)
            .ok_or(RestoreSettingsError::UnknownRequest(id.0))?;

        let mut settings = RestoreSettings::new();
        settings.insert(request.setting_type, value);

        Ok(self.emit_approval(CoinWithSettings {
            coin: request.coin,
            settings,
            request_id: Some(id),
        }))
    }

    /// Rejects `coin`, resolving its oldest pending request
    pub fn cancel(&self, coin: &Coin) -> RestoreSettingsRejection {
        let request_id = self
            .take_oldest_pending_any(coin)
            .map(|request| request.id);
        if request_id.is_none() {
            warn!(coin = %coin.code, "Cancel without a pending request");
        }

        self.emit_rejection(RestoreSettingsRejection {
            coin: coin.clone(),
            request_id,
        })
    }

    /// Rejects the coin of request `id`
    pub fn cancel_request(&self, id: RequestId) -> RestoreResult<RestoreSettingsRejection> {
        let (_, request) = self
            .pending
            .remove(&id)
            .ok_or(RestoreSettingsError::UnknownRequest(id.0))?;

        Ok(self.emit_rejection(RestoreSettingsRejection {
            coin: request.coin,
            request_id: Some(id),
        }))
    }

    /// Persists settings through the manager
    pub fn save(
        &self,
        settings: &RestoreSettings,
        account: &Account,
        coin: &Coin,
    ) -> RestoreResult<()> {
        self.manager.save(settings, account, coin)
    }

    /// Outstanding requests, oldest first
    pub fn pending_requests(&self) -> Vec<RestoreSettingsRequest> {
        let mut requests: Vec<_> = self
            .pending
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        requests.sort_by_key(|request| request.id);
        requests
    }

    /// Outstanding request `id`, if it is still pending
    pub fn pending_request(&self, id: RequestId) -> Option<RestoreSettingsRequest> {
        self.pending.get(&id).map(|entry| entry.value().clone())
    }

    /// Oldest outstanding request for `coin` on `account`
    pub fn pending_for(&self, coin: &Coin, account: &Account) -> Option<RestoreSettingsRequest> {
        self.pending
            .iter()
            .filter(|entry| {
                &entry.coin == coin
                    && entry.account.as_ref().map(|a| &a.id) == Some(&account.id)
            })
            .map(|entry| entry.value().clone())
            .min_by_key(|request| request.id)
    }

    fn take_oldest_pending(
        &self,
        coin: &Coin,
        setting_type: RestoreSettingType,
    ) -> Option<RestoreSettingsRequest> {
        let id = self
            .pending
            .iter()
            .filter(|entry| &entry.coin == coin && entry.setting_type == setting_type)
            .map(|entry| *entry.key())
            .min()?;
        self.pending.remove(&id).map(|(_, request)| request)
    }

    fn take_oldest_pending_any(&self, coin: &Coin) -> Option<RestoreSettingsRequest> {
        let id = self
            .pending
            .iter()
            .filter(|entry| &entry.coin == coin)
            .map(|entry| *entry.key())
            .min()?;
        self.pending.remove(&id).map(|(_, request)| request)
    }

    fn emit_approval(&self, approval: CoinWithSettings) -> CoinWithSettings {
        if self.approve_tx.send(approval.clone()).is_err() {
            trace!(coin = %approval.coin.code, "No approval subscriber");
        }
        approval
    }

    fn emit_rejection(&self, rejection: RestoreSettingsRejection) -> RestoreSettingsRejection {
        if self.reject_tx.send(rejection.clone()).is_err() {
            trace!(coin = %rejection.coin.code, "No rejection subscriber");
        }
        rejection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::InMemoryRestoreSettingsManager;
    use coinbridge_testing::fixtures;
    use tokio::sync::broadcast::error::TryRecvError;

    fn service() -> RestoreSettingsService {
        RestoreSettingsService::new(Arc::new(InMemoryRestoreSettingsManager::new()))
    }

    #[test]
    fn test_no_account_is_approved() {
        let service = service();
        let mut approvals = service.subscribe_approvals();

        let decision = service.approve_settings(&fixtures::zcash(), None);
        assert!(matches!(decision, SettingsDecision::Approved(ref a) if a.settings.is_empty()));
        assert!(approvals.try_recv().unwrap().settings.is_empty());
    }

    #[test]
    fn test_request_ids_increase() {
        let service = service();
        let account = fixtures::restored_account();

        let first = service.approve_settings(&fixtures::zcash(), Some(&account));
        let second = service.approve_settings(&fixtures::zcash(), Some(&account));

        match (first, second) {
            (SettingsDecision::Requested(a), SettingsDecision::Requested(b)) => {
                assert!(a.id < b.id);
                assert_eq!(a.account.as_ref(), Some(&account));
            }
            other => panic!("expected two requests, got {other:?}"),
        }
        assert_eq!(service.pending_requests().len(), 2);
    }

    #[test]
    fn test_enter_without_request_still_approves() {
        let service = service();
        let approval = service.enter("42", &fixtures::zcash());
        assert_eq!(approval.request_id, None);
        assert_eq!(approval.settings.birthday_height(), Some("42"));
    }

    #[test]
    fn test_pending_lookup() {
        let service = service();
        let account = fixtures::restored_account();
        let other = fixtures::other_restored_account();

        let SettingsDecision::Requested(first) =
            service.approve_settings(&fixtures::zcash(), Some(&account))
        else {
            panic!("expected a request");
        };
        service.approve_settings(&fixtures::zcash(), Some(&account));

        assert_eq!(service.pending_request(first.id), Some(first.clone()));
        assert_eq!(service.pending_for(&fixtures::zcash(), &account), Some(first.clone()));
        assert_eq!(service.pending_for(&fixtures::zcash(), &other), None);
        assert_eq!(service.pending_for(&fixtures::bitcoin(), &account), None);

        service.cancel_request(first.id).unwrap();
        assert_eq!(service.pending_request(first.id), None);
    }

    #[test]
    fn test_cancel_request_unknown_id() {
        let service = service();
        let mut rejections = service.subscribe_rejections();

        let err = service.cancel_request(RequestId(99)).unwrap_err();
        assert_eq!(err, RestoreSettingsError::UnknownRequest(99));
        assert_eq!(rejections.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let manager = Arc::new(InMemoryRestoreSettingsManager::new());
        let service = RestoreSettingsService::with_config(
            manager,
            RestoreSettingsServiceConfig::default().with_event_capacity(0),
        );
        let mut approvals = service.subscribe_approvals();
        service.approve_settings(&fixtures::bitcoin(), None);
        assert!(approvals.try_recv().is_ok());
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: RestoreSettingsServiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RestoreSettingsServiceConfig::default());
    }
}
