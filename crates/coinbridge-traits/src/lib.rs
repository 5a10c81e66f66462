//! # coinbridge Traits
//!
//! The adapter contract and the shared data model of the coinbridge wallet
//! core. Every chain-specific adapter implements [`Adapter`] so the rest of
//! the wallet can enumerate balances, page through history, send funds,
//! estimate fees and validate addresses without knowing which blockchain is
//! behind it.
//!
//! ## Core Types
//!
//! - [`Adapter`] - Uniform wallet operations over one coin
//! - [`AdapterFactory`] - Builds adapters once restore settings are resolved
//! - [`TransactionRecord`] - Chain-agnostic transaction
//! - [`Coin`], [`Account`], [`Wallet`] - What is held, and by whom
//! - [`RestoreSettings`] - Per-account, per-coin restore configuration
//! - [`SendParameters`] - Typed send input
//!
//! ## Example
//!
//! ```ignore
//! use coinbridge_traits::prelude::*;
//!
//! async fn newest_page(adapter: &dyn Adapter) -> AdapterResult<Vec<TransactionRecord>> {
//!     adapter.transactions(None, 20).await
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod adapter;
pub mod coin;
pub mod payment;
pub mod restore_settings;
pub mod send;
pub mod stream;
pub mod transaction;

pub use account::{Account, AccountOrigin, Wallet};
pub use adapter::{Adapter, AdapterFactory, AdapterState};
pub use coin::{Coin, CoinType, RestoreSettingType};
pub use payment::{AddressParser, PaymentData, PaymentRequestAddress};
pub use restore_settings::RestoreSettings;
pub use send::{AdapterField, FeeParameters, FeeRatePriority, ParameterMap, SendParameters};
pub use stream::{watch_signals, watch_updates, UpdateStream};
pub use transaction::{TransactionAddress, TransactionCursor, TransactionRecord};

pub use coinbridge_error::{AdapterError, AdapterResult, SendStateError};

/// Re-exported so implementors share one decimal type
pub use rust_decimal::Decimal;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Account, AccountOrigin, Adapter, AdapterError, AdapterFactory, AdapterResult,
        AdapterState, Coin, CoinType, Decimal, FeeParameters, FeeRatePriority, RestoreSettingType,
        RestoreSettings, SendParameters, SendStateError, TransactionAddress, TransactionCursor,
        TransactionRecord, UpdateStream, Wallet,
    };
}
