//! # coinbridge Restore
//!
//! Restore-settings negotiation for adding coins to a wallet.
//!
//! Some chains cannot rebuild an imported account's history from its keys
//! alone; a shielded Zcash account, for instance, needs the block height to
//! start scanning from. This crate decides, per coin being added, whether the
//! stored settings suffice or the user has to be asked.
//!
//! - [`RestoreSettingsManager`] - Storage of settings per (account, coin)
//! - [`RestoreSettingsService`] - The approve / request / reject state machine
//!
//! ## Example
//!
//! ```
//! use coinbridge_restore::{
//!     InMemoryRestoreSettingsManager, RestoreSettingsService, SettingsDecision,
//! };
//! use coinbridge_traits::{Account, AccountOrigin, Coin, CoinType};
//! use std::sync::Arc;
//!
//! let service = RestoreSettingsService::new(Arc::new(InMemoryRestoreSettingsManager::new()));
//! let account = Account::new("1", "Imported", AccountOrigin::Restored);
//! let zcash = Coin::new("Zcash", "ZEC", 8, CoinType::Zcash);
//!
//! let decision = service.approve_settings(&zcash, Some(&account));
//! let SettingsDecision::Requested(request) = decision else {
//!     unreachable!("restored Zcash accounts need a birthday height");
//! };
//! let approval = service.enter_request(request.id, "1234567").unwrap();
//! service.save(&approval.settings, &account, &zcash).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod manager;
pub mod service;

pub use manager::{InMemoryRestoreSettingsManager, RestoreSettingsManager};
pub use service::{
    CoinWithSettings, RequestId, RestoreSettingsRejection, RestoreSettingsRequest,
    RestoreSettingsService, RestoreSettingsServiceConfig, SettingsDecision,
};

pub use coinbridge_error::{RestoreResult, RestoreSettingsError};
