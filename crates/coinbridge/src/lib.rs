//! # coinbridge - Chain-Agnostic Wallet Core
//!
//! coinbridge lets a wallet treat every blockchain through one adapter
//! contract and negotiates the restore settings some chains need before a
//! coin can be added to an imported account. Use feature flags to include
//! only the chains you need.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `default` | Core traits, errors and restore settings |
//! | `eos` | EOS token support |
//! | `all-chains` | All supported chains |
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! coinbridge = { version = "0.1", features = ["eos"] }
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use coinbridge::prelude::*;
//! use coinbridge::eos::{EosAdapterFactory, InMemoryEosKit};
//! use std::sync::Arc;
//!
//! let service = Arc::new(RestoreSettingsService::new(Arc::new(
//!     InMemoryRestoreSettingsManager::new(),
//! )));
//! let activator = CoinActivator::new(service)
//!     .with_factory(Arc::new(EosAdapterFactory::new().with_kit("1", kit)));
//!
//! match activator.activate(&coin, &account)? {
//!     Activation::Active(adapter) => println!("{}", adapter.balance()),
//!     Activation::AwaitingInput(request) => ask_user(request),
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

// ============================================================================
// Core re-exports
// ============================================================================

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use coinbridge_traits as traits;

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use coinbridge_error as error;

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use coinbridge_restore as restore;

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub mod activation;

#[cfg(feature = "core")]
pub use activation::{Activation, CoinActivator};

// ============================================================================
// Chain-specific re-exports
// ============================================================================

/// EOS token functionality
#[cfg(feature = "eos")]
#[cfg_attr(docsrs, doc(cfg(feature = "eos")))]
pub mod eos {
    pub use coinbridge_eos::*;
}

// ============================================================================
// Prelude - commonly used types
// ============================================================================

/// Prelude module for convenient imports
///
/// ```ignore
/// use coinbridge::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "core")]
    pub use coinbridge_traits::prelude::*;

    #[cfg(feature = "core")]
    pub use coinbridge_error::{ActivationError, ActivationResult};

    #[cfg(feature = "core")]
    pub use coinbridge_restore::{
        InMemoryRestoreSettingsManager, RestoreSettingsManager, RestoreSettingsService,
        SettingsDecision,
    };

    #[cfg(feature = "core")]
    pub use crate::activation::{Activation, CoinActivator};
}

// ============================================================================
// Version information
// ============================================================================

/// Returns the coinbridge version
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns enabled chain features
pub fn enabled_chains() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut chains = Vec::new();

    #[cfg(feature = "eos")]
    chains.push("eos");

    chains
}

// ============================================================================
// Tests
// ============================================================================
