//! # coinbridge EOS
//!
//! EOS token support for the coinbridge wallet core.
//!
//! ## Features
//!
//! - Adapter over an EOS kit for any token contract and symbol
//! - Account-name and WIF private key validation
//! - Hot streams for balance, sync state, irreversible height and history
//! - `eos:` payment URI parsing
//! - In-memory kit for tests and demos
//!
//! ## Example
//!
//! ```rust
//! use coinbridge_eos::{EosAdapter, EosAdapterConfig, InMemoryEosKit};
//! use coinbridge_traits::{Account, AccountOrigin, Adapter, Coin, CoinType, Wallet};
//! use std::sync::Arc;
//!
//! let coin = Coin::new(
//!     "EOS",
//!     "EOS",
//!     4,
//!     CoinType::Eos { token: "eosio.token".into(), symbol: "EOS".into() },
//! );
//! let wallet = Wallet::new(coin, Account::new("1", "Main", AccountOrigin::Restored));
//! let kit = Arc::new(InMemoryEosKit::new("alice"));
//!
//! let adapter = EosAdapter::new(wallet, kit.clone(), EosAdapterConfig::default());
//! kit.set_irreversible_block_height(1_000);
//!
//! assert_eq!(adapter.receive_address(), "alice");
//! assert_eq!(adapter.last_block_height(), Some(1_330));
//! assert!(adapter.validate_address("eosio.token").is_ok());
//! ```
//!
//! ## Kit
//!
//! Networking, signing and synchronization live behind the [`EosKit`]
//! trait. One kit serves one account and is started and stopped by its
//! owner, so the adapter's lifecycle hooks do nothing.

pub mod adapter;
pub mod config;
pub mod error;
pub mod factory;
pub mod kit;
pub mod memory;
pub mod validation;

pub use adapter::{transaction_record, EosAdapter};
pub use config::{
    EosAdapterConfig, EOS_DECIMALS, EOS_SYMBOL, EOS_TOKEN, IRREVERSIBLE_THRESHOLD,
    SYNCING_PROGRESS,
};
pub use error::EosKitError;
pub use factory::EosAdapterFactory;
pub use kit::{Asset, AssetId, EosKit, EosTransaction, KitSyncState, Quantity};
pub use memory::InMemoryEosKit;
pub use validation::{validate_account, validate_private_key, MAX_ACCOUNT_LENGTH};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irreversible_threshold() {
        assert_eq!(IRREVERSIBLE_THRESHOLD, 330);
    }

    #[test]
    fn test_system_token() {
        assert_eq!(EOS_TOKEN, "eosio.token");
        assert_eq!(EOS_SYMBOL, "EOS");
        assert_eq!(EOS_DECIMALS, 4);
    }

    #[test]
    fn test_default_config_targets_system_token() {
        let config = EosAdapterConfig::default();
        assert_eq!(config.token, EOS_TOKEN);
        assert_eq!(config.decimals, EOS_DECIMALS);
    }
}
