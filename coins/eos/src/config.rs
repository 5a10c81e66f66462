use serde::{Deserialize, Serialize};

/// Blocks after which an EOS transaction is irreversible
pub const IRREVERSIBLE_THRESHOLD: u64 = 330;

/// Decimal places of the EOS system token
pub const EOS_DECIMALS: u32 = 4;

/// Progress reported while syncing; the kit has no finer-grained value
pub const SYNCING_PROGRESS: u8 = 50;

/// System token contract
pub const EOS_TOKEN: &str = "eosio.token";

/// System token symbol
pub const EOS_SYMBOL: &str = "EOS";

/// EOS adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EosAdapterConfig {
    /// Token contract account
    pub token: String,
    /// Token symbol
    pub symbol: String,
    /// Decimal places of the token
    pub decimals: u32,
    /// Irreversible block threshold
    pub irreversible_threshold: u64,
    /// Progress reported while the kit is syncing
    pub syncing_progress: u8,
    /// Memo used when a send does not carry one
    pub default_memo: String,
    /// Scheme of payment URIs
    pub payment_scheme: String,
}

impl Default for EosAdapterConfig {
    fn default() -> Self {
        Self {
            token: EOS_TOKEN.to_string(),
            symbol: EOS_SYMBOL.to_string(),
            decimals: EOS_DECIMALS,
            irreversible_threshold: IRREVERSIBLE_THRESHOLD,
            syncing_progress: SYNCING_PROGRESS,
            default_memo: "from coinbridge".to_string(),
            payment_scheme: "eos".to_string(),
        }
    }
}

impl EosAdapterConfig {
    /// Configuration for a token other than the system token
    pub fn token(token: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Set decimal places
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set the irreversible threshold
    pub fn with_irreversible_threshold(mut self, threshold: u64) -> Self {
        self.irreversible_threshold = threshold;
        self
    }

    /// Set the default memo
    pub fn with_default_memo(mut self, memo: impl Into<String>) -> Self {
        self.default_memo = memo.into();
        self
    }

    /// Set the syncing progress placeholder
    pub fn with_syncing_progress(mut self, progress: u8) -> Self {
        self.syncing_progress = progress.min(100);
        self
    }
}
