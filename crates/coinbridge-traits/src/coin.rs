//! Coins and the restore settings their chains require.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a restore setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreSettingType {
    /// Block height to start scanning history from
    BirthdayHeight,
}

impl RestoreSettingType {
    /// Every setting key, in the order missing keys are requested
    pub const ALL: [RestoreSettingType; 1] = [RestoreSettingType::BirthdayHeight];

    /// Returns the storage key of this setting
    pub fn as_str(&self) -> &'static str {
        match self {
            RestoreSettingType::BirthdayHeight => "birthday_height",
        }
    }
}

impl fmt::Display for RestoreSettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chain (and token, where applicable) a coin lives on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoinType {
    /// Bitcoin
    Bitcoin,
    /// Bitcoin Cash
    BitcoinCash,
    /// Litecoin
    Litecoin,
    /// Dash
    Dash,
    /// Zcash (shielded; history scan needs a birthday height)
    Zcash,
    /// Ether
    Ethereum,
    /// ERC-20 token
    Erc20 {
        /// Token contract address
        address: String,
    },
    /// EOS token
    Eos {
        /// Token contract account (e.g. `eosio.token`)
        token: String,
        /// Token symbol (e.g. `EOS`)
        symbol: String,
    },
}

impl CoinType {
    /// Restore settings a restored account must provide for this coin
    pub fn restore_setting_types(&self) -> &'static [RestoreSettingType] {
        match self {
            CoinType::Zcash => &[RestoreSettingType::BirthdayHeight],
            _ => &[],
        }
    }

    /// Stable identifier of the coin type
    pub fn id(&self) -> String {
        match self {
            CoinType::Bitcoin => "bitcoin".to_string(),
            CoinType::BitcoinCash => "bitcoinCash".to_string(),
            CoinType::Litecoin => "litecoin".to_string(),
            CoinType::Dash => "dash".to_string(),
            CoinType::Zcash => "zcash".to_string(),
            CoinType::Ethereum => "ethereum".to_string(),
            CoinType::Erc20 { address } => format!("erc20|{address}"),
            CoinType::Eos { token, symbol } => format!("eos|{token}|{symbol}"),
        }
    }
}

/// A supported asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Display name
    pub title: String,
    /// Ticker symbol
    pub code: String,
    /// Decimal places of the smallest unit
    pub decimals: u8,
    /// Chain classification
    pub coin_type: CoinType,
}

impl Coin {
    /// Creates a coin
    pub fn new(
        title: impl Into<String>,
        code: impl Into<String>,
        decimals: u8,
        coin_type: CoinType,
    ) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            decimals,
            coin_type,
        }
    }

    /// Stable identifier, unique across coin types
    pub fn id(&self) -> String {
        self.coin_type.id()
    }

    /// Returns true if a restored account must supply settings for this coin
    pub fn requires_restore_settings(&self) -> bool {
        !self.coin_type.restore_setting_types().is_empty()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.code)
    }
}
