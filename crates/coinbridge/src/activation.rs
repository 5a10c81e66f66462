//! Adding coins to accounts.
//!
//! [`CoinActivator`] runs restore-settings negotiation for a coin, persists
//! what the user entered and builds the coin's adapter through the first
//! registered factory that supports it.

use coinbridge_error::{ActivationError, ActivationResult, RestoreSettingsError};
use coinbridge_restore::{
    RestoreSettingsRejection, RestoreSettingsRequest, RestoreSettingsService, SettingsDecision,
};
use coinbridge_traits::{Account, Adapter, AdapterFactory, Coin, RestoreSettings, Wallet};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of [`CoinActivator::activate`]
pub enum Activation {
    /// The adapter is built and started
    Active(Arc<dyn Adapter>),
    /// The user has to answer this request first
    AwaitingInput(RestoreSettingsRequest),
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Active(adapter) => f
                .debug_tuple("Active")
                .field(&adapter.wallet())
                .finish(),
            Activation::AwaitingInput(request) => {
                f.debug_tuple("AwaitingInput").field(request).finish()
            }
        }
    }
}

/// Builds and tracks the adapters of activated coins
pub struct CoinActivator {
    service: Arc<RestoreSettingsService>,
    factories: Vec<Arc<dyn AdapterFactory>>,
    adapters: DashMap<(String, Coin), Arc<dyn Adapter>>,
}

impl CoinActivator {
    /// Creates an activator without factories
    pub fn new(service: Arc<RestoreSettingsService>) -> Self {
        Self {
            service,
            factories: Vec::new(),
            adapters: DashMap::new(),
        }
    }

    /// Registers a factory; earlier factories win
    pub fn with_factory(mut self, factory: Arc<dyn AdapterFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    /// The negotiation service
    pub fn service(&self) -> &RestoreSettingsService {
        &self.service
    }

    /// Adds `coin` to `account`.
    ///
    /// Returns the running adapter when no input is needed, otherwise the
    /// request to answer with [`CoinActivator::enter_birthday_height`] or
    /// [`CoinActivator::cancel`]. Already active coins return their adapter;
    /// a coin still awaiting input returns its outstanding request.
    pub fn activate(&self, coin: &Coin, account: &Account) -> ActivationResult<Activation> {
        let factory = self.factory_for(coin)?;

        if let Some(adapter) = self.adapter(account, coin) {
            return Ok(Activation::Active(adapter));
        }
        if let Some(request) = self.service.pending_for(coin, account) {
            debug!(coin = %coin.code, request = %request.id, "Activation already awaiting input");
            return Ok(Activation::AwaitingInput(request));
        }

        match self.service.approve_settings(coin, Some(account)) {
            SettingsDecision::Approved(approval) => {
                if !approval.settings.is_empty() && !account.is_created() {
                    self.service.save(&approval.settings, account, coin)?;
                }
                let wallet = Wallet::new(coin.clone(), account.clone());
                let adapter = factory.adapter(&wallet, &approval.settings)?;
                Ok(Activation::Active(self.register(adapter, wallet)))
            }
            SettingsDecision::Requested(request) => {
                debug!(coin = %coin.code, request = %request.id, "Activation awaiting input");
                Ok(Activation::AwaitingInput(request))
            }
        }
    }

    /// Answers `request` with a birthday height, saves it and builds the adapter.
    ///
    /// The coin is activated for the account the request was issued for.
    /// The adapter is built before the request is resolved, so a failing
    /// factory leaves the request pending and emits no approval.
    pub fn enter_birthday_height(
        &self,
        request: &RestoreSettingsRequest,
        birthday_height: impl Into<String>,
    ) -> ActivationResult<Arc<dyn Adapter>> {
        let pending = self
            .service
            .pending_request(request.id)
            .ok_or(RestoreSettingsError::UnknownRequest(request.id.0))?;
        let account = pending.account.clone().ok_or(ActivationError::NoAccount {
            request: pending.id.0,
        })?;
        let factory = self.factory_for(&pending.coin)?;

        let birthday_height = birthday_height.into();
        let mut settings = RestoreSettings::new();
        settings.insert(pending.setting_type, birthday_height.clone());

        let wallet = Wallet::new(pending.coin.clone(), account);
        let adapter = factory.adapter(&wallet, &settings)?;

        let approval = self.service.enter_request(pending.id, birthday_height)?;
        self.service.save(&approval.settings, &wallet.account, &wallet.coin)?;

        Ok(self.register(adapter, wallet))
    }

    /// Declines `request`; nothing is built or saved
    pub fn cancel(
        &self,
        request: &RestoreSettingsRequest,
    ) -> ActivationResult<RestoreSettingsRejection> {
        Ok(self.service.cancel_request(request.id)?)
    }

    /// Adapter of an active coin
    pub fn adapter(&self, account: &Account, coin: &Coin) -> Option<Arc<dyn Adapter>> {
        self.adapters
            .get(&(account.id.clone(), coin.clone()))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Stops and forgets the adapter of `coin`; false if it was not active
    pub fn deactivate(&self, account: &Account, coin: &Coin) -> bool {
        match self.adapters.remove(&(account.id.clone(), coin.clone())) {
            Some((_, adapter)) => {
                adapter.stop();
                info!(account = %account.id, coin = %coin.code, "Coin deactivated");
                true
            }
            None => false,
        }
    }

    /// Number of active adapters
    pub fn active_count(&self) -> usize {
        self.adapters.len()
    }

    fn factory_for(&self, coin: &Coin) -> ActivationResult<&Arc<dyn AdapterFactory>> {
        self.factories
            .iter()
            .find(|factory| factory.supports(coin))
            .ok_or_else(|| ActivationError::NoFactory { coin: coin.id() })
    }

    fn register(&self, adapter: Arc<dyn Adapter>, wallet: Wallet) -> Arc<dyn Adapter> {
        adapter.start();
        info!(account = %wallet.account.id, coin = %wallet.coin.code, "Coin activated");

        self.adapters.insert((wallet.account.id, wallet.coin), Arc::clone(&adapter));
        adapter
    }
}
