//! # coinbridge Error
//!
//! Unified error types for the coinbridge wallet core. Every chain adapter,
//! the restore-settings negotiation and the coin activation flow report
//! failures through the enums in this crate, so callers get one stable,
//! typed signal to render regardless of the blockchain involved.
//!
//! ## Error Categories
//!
//! - [`AdapterError`] - Validation and chain errors raised by adapters
//! - [`SendStateError`] - Soft pre-send conditions, returned as a list
//! - [`RestoreSettingsError`] - Restore-settings negotiation errors
//! - [`ActivationError`] - Coin activation errors
//!
//! ## Example
//!
//! ```
//! use coinbridge_error::{AdapterError, AdapterResult};
//!
//! fn require_address(address: Option<&str>) -> AdapterResult<&str> {
//!     address.ok_or_else(|| AdapterError::WrongParameters("missing address".to_string()))
//! }
//!
//! assert!(require_address(None).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by chain adapters.
///
/// Validation variants are produced locally, before any chain interaction.
/// [`AdapterError::Chain`] carries a kit failure untranslated.
#[derive(Error, Debug)]
pub enum AdapterError {
    // ============ Validation Errors ============
    /// Required send parameters are missing or have the wrong type
    #[error("Wrong parameters: {0}")]
    WrongParameters(String),

    /// Address does not pass the chain-specific account syntax check
    #[error("Invalid account: '{account}'")]
    InvalidAccount {
        /// The rejected account or address
        account: String,
    },

    /// Private key material could not be decoded
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    // ============ Feature/Support Errors ============
    /// Operation is not available for this chain
    #[error("Not supported: {0}")]
    NotSupported(String),

    // ============ Chain Errors ============
    /// Failure reported by the underlying chain kit
    #[error(transparent)]
    Chain(Box<dyn std::error::Error + Send + Sync>),
}

impl AdapterError {
    /// Wraps a kit failure without reinterpreting it
    pub fn chain<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AdapterError::Chain(Box::new(err))
    }

    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AdapterError::WrongParameters(_) => ErrorCode::WrongParameters,
            AdapterError::InvalidAccount { .. } => ErrorCode::InvalidAccount,
            AdapterError::InvalidPrivateKey(_) => ErrorCode::InvalidPrivateKey,
            AdapterError::NotSupported(_) => ErrorCode::NotSupported,
            AdapterError::Chain(_) => ErrorCode::Chain,
        }
    }

    /// Returns true for errors detected before any chain interaction
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AdapterError::WrongParameters(_)
                | AdapterError::InvalidAccount { .. }
                | AdapterError::InvalidPrivateKey(_)
        )
    }
}

/// Result type for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Soft send preconditions.
///
/// These are not failures: adapters return them as a list so the caller can
/// show every problem with the entered amount at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SendStateError {
    /// Amount exceeds what can be spent
    #[error("Insufficient amount, available {available}")]
    InsufficientAmount {
        /// Spendable balance
        available: Decimal,
    },

    /// Amount exceeds a chain or token limit
    #[error("Maximum amount exceeded, maximum {maximum}")]
    MaximumAmountExceeded {
        /// Largest amount accepted
        maximum: Decimal,
    },

    /// Amount is below the smallest accepted value
    #[error("Amount too small, minimum {minimum}")]
    TooFewAmount {
        /// Smallest amount accepted
        minimum: Decimal,
    },
}

/// Errors raised while negotiating restore settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestoreSettingsError {
    /// No pending request carries this id
    #[error("Unknown restore settings request: {0}")]
    UnknownRequest(u64),

    /// The settings store failed
    #[error("Restore settings storage error: {0}")]
    Storage(String),
}

/// Result type for restore-settings operations
pub type RestoreResult<T> = std::result::Result<T, RestoreSettingsError>;

/// Errors raised while activating a coin in a wallet
#[derive(Error, Debug)]
pub enum ActivationError {
    /// Settings negotiation failed
    #[error(transparent)]
    Restore(#[from] RestoreSettingsError),

    /// Adapter construction failed
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// No registered factory builds adapters for this coin
    #[error("No adapter factory for coin {coin}")]
    NoFactory {
        /// Coin identifier
        coin: String,
    },

    /// The request names no account to activate the coin for
    #[error("Restore settings request {request} has no account")]
    NoAccount {
        /// Request identifier
        request: u64,
    },
}

impl ActivationError {
    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            ActivationError::Restore(RestoreSettingsError::UnknownRequest(_)) => {
                ErrorCode::UnknownRequest
            }
            ActivationError::Restore(RestoreSettingsError::Storage(_)) => ErrorCode::Storage,
            ActivationError::Adapter(err) => err.code(),
            ActivationError::NoFactory { .. } => ErrorCode::NoFactory,
            ActivationError::NoAccount { .. } => ErrorCode::NoAccount,
        }
    }
}

/// Result type for coin activation
pub type ActivationResult<T> = std::result::Result<T, ActivationError>;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ErrorCode {
    /// Wrong send parameters
    WrongParameters = 1001,
    /// Invalid account
    InvalidAccount = 1002,
    /// Invalid private key
    InvalidPrivateKey = 1003,
    /// Chain kit failure
    Chain = 2001,
    /// Unknown restore settings request
    UnknownRequest = 3001,
    /// Settings storage failure
    Storage = 3002,
    /// No adapter factory
    NoFactory = 4001,
    /// Request without an account
    NoAccount = 4002,
    /// Not supported
    NotSupported = 9001,
}
