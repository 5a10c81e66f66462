use coinbridge_traits::{
    Adapter, AdapterError, AdapterFactory, AdapterResult, Coin, CoinType, RestoreSettings, Wallet,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::adapter::EosAdapter;
use crate::config::EosAdapterConfig;
use crate::kit::EosKit;

/// Builds [`EosAdapter`]s for EOS tokens.
///
/// Holds one kit per account id; every token of an account shares its kit.
#[derive(Default)]
pub struct EosAdapterFactory {
    kits: HashMap<String, Arc<dyn EosKit>>,
    config: EosAdapterConfig,
}

impl EosAdapterFactory {
    /// Creates a factory without kits
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the kit serving `account_id`
    pub fn with_kit(mut self, account_id: impl Into<String>, kit: Arc<dyn EosKit>) -> Self {
        self.kits.insert(account_id.into(), kit);
        self
    }

    /// Sets the base configuration; token, symbol and decimals come from the coin
    pub fn with_config(mut self, config: EosAdapterConfig) -> Self {
        self.config = config;
        self
    }

    fn config_for(&self, coin: &Coin, token: &str, symbol: &str) -> EosAdapterConfig {
        EosAdapterConfig {
            token: token.to_string(),
            symbol: symbol.to_string(),
            decimals: u32::from(coin.decimals),
            ..self.config.clone()
        }
    }
}

impl AdapterFactory for EosAdapterFactory {
    fn supports(&self, coin: &Coin) -> bool {
        matches!(coin.coin_type, CoinType::Eos { .. })
    }

    // EOS needs no restore settings; the kit restores from the account name.
    fn adapter(
        &self,
        wallet: &Wallet,
        _settings: &RestoreSettings,
    ) -> AdapterResult<Arc<dyn Adapter>> {
        let CoinType::Eos { token, symbol } = &wallet.coin.coin_type else {
            return Err(AdapterError::NotSupported(format!(
                "{} is not an EOS token",
                wallet.coin.code
            )));
        };

        let kit = self.kits.get(&wallet.account.id).ok_or_else(|| {
            AdapterError::NotSupported(format!("no EOS kit for account {}", wallet.account.id))
        })?;

        debug!(account_id = %wallet.account.id, coin = %wallet.coin.code, "Building EOS adapter");

        let config = self.config_for(&wallet.coin, token, symbol);
        Ok(Arc::new(EosAdapter::new(wallet.clone(), Arc::clone(kit), config)))
    }
}
