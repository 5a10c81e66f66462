use async_trait::async_trait;
use coinbridge_traits::{
    watch_signals, watch_updates, AddressParser, Adapter, AdapterError, AdapterResult,
    AdapterState, FeeParameters, FeeRatePriority, PaymentRequestAddress, SendParameters,
    SendStateError, TransactionAddress, TransactionCursor, TransactionRecord, UpdateStream,
    Wallet,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::config::EosAdapterConfig;
use crate::kit::{Asset, EosKit, EosTransaction, KitSyncState};
use crate::validation::validate_account;

/// Adapter for one EOS token of one account
pub struct EosAdapter {
    wallet: Wallet,
    kit: Arc<dyn EosKit>,
    asset: Asset,
    parser: AddressParser,
    config: EosAdapterConfig,
}

impl EosAdapter {
    /// Creates an adapter and registers the configured token with the kit
    pub fn new(wallet: Wallet, kit: Arc<dyn EosKit>, config: EosAdapterConfig) -> Self {
        let asset = kit.register(&config.token, &config.symbol);
        let parser = AddressParser::new(config.payment_scheme.clone());

        debug!(
            account = %kit.account(),
            token = %config.token,
            symbol = %config.symbol,
            "EOS asset registered"
        );

        Self {
            wallet,
            kit,
            asset,
            parser,
            config,
        }
    }

    /// Replaces the payment URI parser
    pub fn with_parser(mut self, parser: AddressParser) -> Self {
        self.parser = parser;
        self
    }

    /// The registered asset
    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    /// Adapter configuration
    pub fn config(&self) -> &EosAdapterConfig {
        &self.config
    }

    fn records(&self, transactions: &[EosTransaction]) -> Vec<TransactionRecord> {
        let account = self.kit.account();
        transactions
            .iter()
            .map(|tx| transaction_record(tx, account))
            .collect()
    }
}

/// Translates a kit transfer into a wallet record as seen by `account`.
///
/// The amount is negated when `account` is the sender.
pub fn transaction_record(tx: &EosTransaction, account: &str) -> TransactionRecord {
    let from_mine = tx.from == account;
    let to_mine = tx.to == account;

    let amount = if from_mine {
        -tx.quantity.amount
    } else {
        tx.quantity.amount
    };

    TransactionRecord {
        transaction_hash: tx.id.clone(),
        transaction_index: 0,
        inter_transaction_index: tx.action_sequence,
        block_height: tx.block_number,
        amount,
        date: tx.date,
        from: vec![TransactionAddress::new(tx.from.clone(), from_mine)],
        to: vec![TransactionAddress::new(tx.to.clone(), to_mine)],
    }
}

#[async_trait]
impl Adapter for EosAdapter {
    fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    fn decimals(&self) -> u32 {
        self.config.decimals
    }

    fn confirmations_threshold(&self) -> u64 {
        self.config.irreversible_threshold
    }

    fn refreshable(&self) -> bool {
        true
    }

    // The kit is started and stopped centrally, once per account.
    fn start(&self) {
        trace!(account = %self.kit.account(), "Start ignored");
    }

    fn stop(&self) {
        trace!(account = %self.kit.account(), "Stop ignored");
    }

    fn refresh(&self) {
        trace!(account = %self.kit.account(), "Refresh ignored");
    }

    fn last_block_height(&self) -> Option<u64> {
        self.kit
            .irreversible_block_height()
            .map(|height| height + self.config.irreversible_threshold)
    }

    fn last_block_height_updated(&self) -> UpdateStream<()> {
        watch_signals(self.kit.irreversible_block_height_updates())
    }

    fn state(&self) -> AdapterState {
        match self.asset.current_sync_state() {
            KitSyncState::Synced => AdapterState::Synced,
            KitSyncState::NotSynced => AdapterState::NotSynced,
            KitSyncState::Syncing => AdapterState::Syncing {
                progress: self.config.syncing_progress,
                last_block_date: None,
            },
        }
    }

    fn state_updated(&self) -> UpdateStream<()> {
        watch_signals(self.asset.sync_state.clone())
    }

    fn balance(&self) -> Decimal {
        self.asset.current_balance()
    }

    fn balance_updated(&self) -> UpdateStream<()> {
        watch_signals(self.asset.balance.clone())
    }

    fn transaction_records(&self) -> UpdateStream<Vec<TransactionRecord>> {
        let account = self.kit.account().to_string();
        watch_updates(self.asset.transactions.clone(), move |transactions| {
            transactions
                .iter()
                .map(|tx| transaction_record(tx, &account))
                .collect()
        })
    }

    async fn transactions(
        &self,
        from: Option<TransactionCursor>,
        limit: usize,
    ) -> AdapterResult<Vec<TransactionRecord>> {
        let from_action_sequence = from.map(|cursor| cursor.inter_transaction_index);

        let transactions = self
            .kit
            .transactions(&self.asset.id, from_action_sequence, limit)
            .await
            .map_err(AdapterError::chain)?;

        Ok(self.records(&transactions))
    }

    async fn send(&self, params: SendParameters) -> AdapterResult<()> {
        validate_account(&params.address)?;

        if params.amount <= Decimal::ZERO {
            return Err(AdapterError::WrongParameters(format!(
                "amount must be positive, got {}",
                params.amount
            )));
        }
        if params.amount.normalize().scale() > self.config.decimals {
            return Err(AdapterError::WrongParameters(format!(
                "amount {} has more than {} decimals",
                params.amount, self.config.decimals
            )));
        }

        let memo = params
            .memo
            .as_deref()
            .unwrap_or(self.config.default_memo.as_str());

        debug!(
            to = %params.address,
            amount = %params.amount,
            symbol = %self.asset.id.symbol,
            "Sending EOS transfer"
        );

        match self
            .kit
            .send(&self.asset.id, &params.address, params.amount, memo)
            .await
        {
            Ok(tx) => {
                debug!(id = %tx.id, action_sequence = tx.action_sequence, "Transfer submitted");
                Ok(())
            }
            Err(err) => {
                warn!(to = %params.address, error = %err, "Transfer failed");
                Err(AdapterError::chain(err))
            }
        }
    }

    fn available_balance(&self, _params: &FeeParameters) -> Decimal {
        self.balance()
    }

    fn fee_rate(&self, _priority: FeeRatePriority) -> u64 {
        0
    }

    fn fee(&self, _params: &FeeParameters) -> Decimal {
        Decimal::ZERO
    }

    fn validate_address(&self, address: &str) -> AdapterResult<()> {
        validate_account(address)
    }

    fn validate(&self, params: &SendParameters) -> Vec<SendStateError> {
        let available = self.available_balance(&FeeParameters::from(params));

        let mut errors = Vec::new();
        if params.amount > available {
            errors.push(SendStateError::InsufficientAmount { available });
        }
        errors
    }

    fn parse_payment_address(&self, payment_address: &str) -> PaymentRequestAddress {
        let data = self.parser.parse(payment_address);
        let error = validate_account(&data.address).err();

        PaymentRequestAddress {
            address: data.address,
            amount: data.amount,
            error,
        }
    }

    fn receive_address(&self) -> String {
        self.kit.account().to_string()
    }

    fn debug_info(&self) -> String {
        format!(
            "EOS adapter: account={}, token={}, symbol={}, irreversible={:?}",
            self.kit.account(),
            self.asset.id.token,
            self.asset.id.symbol,
            self.kit.irreversible_block_height()
        )
    }
}
