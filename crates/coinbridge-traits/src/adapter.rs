//! The adapter contract every chain implementation satisfies.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coinbridge_error::{AdapterResult, SendStateError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::account::Wallet;
use crate::coin::Coin;
use crate::payment::PaymentRequestAddress;
use crate::restore_settings::RestoreSettings;
use crate::send::{FeeParameters, FeeRatePriority, ParameterMap, SendParameters};
use crate::stream::UpdateStream;
use crate::transaction::{TransactionCursor, TransactionRecord};

/// Synchronization state of an adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterState {
    /// Up to date with the chain
    Synced,
    /// Not synchronizing
    NotSynced,
    /// Catching up
    Syncing {
        /// Progress in percent
        progress: u8,
        /// Date of the last processed block, if known
        last_block_date: Option<DateTime<Utc>>,
    },
}

/// Uniform wallet operations over one coin of one account.
///
/// The rest of the wallet programs against this trait only. Long-running
/// operations are `async` and report failures through their `Result`;
/// continuous state is exposed as hot [`UpdateStream`]s which yield the
/// current value to a new subscriber before any change.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// The wallet this adapter serves
    fn wallet(&self) -> &Wallet;

    /// Decimal places used for amounts
    fn decimals(&self) -> u32;

    /// Confirmations after which a transaction is final
    fn confirmations_threshold(&self) -> u64;

    /// Whether [`Adapter::refresh`] does anything useful
    fn refreshable(&self) -> bool;

    /// Starts synchronization
    fn start(&self);

    /// Stops synchronization
    fn stop(&self);

    /// Requests an immediate resync
    fn refresh(&self);

    /// Height of the last known block
    fn last_block_height(&self) -> Option<u64>;

    /// Fires whenever [`Adapter::last_block_height`] changes
    fn last_block_height_updated(&self) -> UpdateStream<()>;

    /// Current synchronization state
    fn state(&self) -> AdapterState;

    /// Fires whenever [`Adapter::state`] changes
    fn state_updated(&self) -> UpdateStream<()>;

    /// Current balance
    fn balance(&self) -> Decimal;

    /// Fires whenever [`Adapter::balance`] changes
    fn balance_updated(&self) -> UpdateStream<()>;

    /// Full current transaction list on every change.
    ///
    /// Each emission replaces the previous one.
    fn transaction_records(&self) -> UpdateStream<Vec<TransactionRecord>>;

    /// Fetches a page of history, newest first.
    ///
    /// With `from == None` the newest `limit` records are returned, otherwise
    /// up to `limit` records strictly older than the cursor.
    async fn transactions(
        &self,
        from: Option<TransactionCursor>,
        limit: usize,
    ) -> AdapterResult<Vec<TransactionRecord>>;

    /// Submits a transfer
    async fn send(&self, params: SendParameters) -> AdapterResult<()>;

    /// Submits a transfer described by an untyped parameter map.
    ///
    /// Fails with `WrongParameters` before reaching the chain when a
    /// required field is missing or mistyped.
    async fn send_fields(&self, fields: &ParameterMap) -> AdapterResult<()> {
        let params = SendParameters::from_fields(fields)?;
        self.send(params).await
    }

    /// Largest amount that can be sent
    fn available_balance(&self, params: &FeeParameters) -> Decimal;

    /// Fee rate for the given priority, in the chain's fee unit
    fn fee_rate(&self, priority: FeeRatePriority) -> u64;

    /// Estimated fee for a transfer
    fn fee(&self, params: &FeeParameters) -> Decimal;

    /// Checks the syntax of a recipient address
    fn validate_address(&self, address: &str) -> AdapterResult<()>;

    /// Soft checks run before a send; empty when the transfer may proceed
    fn validate(&self, params: &SendParameters) -> Vec<SendStateError>;

    /// Parses a payment string and validates its address
    fn parse_payment_address(&self, payment_address: &str) -> PaymentRequestAddress;

    /// Deposit address of this wallet
    fn receive_address(&self) -> String;

    /// Free-form diagnostics
    fn debug_info(&self) -> String {
        String::new()
    }
}

/// Builds adapters for the coins it supports
pub trait AdapterFactory: Send + Sync {
    /// Returns true if this factory builds adapters for `coin`
    fn supports(&self, coin: &Coin) -> bool;

    /// Builds an adapter for `wallet` using the resolved restore settings
    fn adapter(
        &self,
        wallet: &Wallet,
        settings: &RestoreSettings,
    ) -> AdapterResult<Arc<dyn Adapter>>;
}
