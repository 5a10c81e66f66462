//! Accounts and wallets.

use serde::{Deserialize, Serialize};

use crate::coin::Coin;

/// How an account's key material came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountOrigin {
    /// Keys generated fresh in this wallet; there is no history to restore
    Created,
    /// Keys imported from existing material
    Restored,
}

/// A user-held credential set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Origin of the key material
    pub origin: AccountOrigin,
}

impl Account {
    /// Creates an account
    pub fn new(id: impl Into<String>, name: impl Into<String>, origin: AccountOrigin) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            origin,
        }
    }

    /// Returns true if the keys were generated in this wallet
    pub fn is_created(&self) -> bool {
        self.origin == AccountOrigin::Created
    }
}

/// A coin held by an account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wallet {
    /// The coin
    pub coin: Coin,
    /// The account holding it
    pub account: Account,
}

impl Wallet {
    /// Creates a wallet
    pub fn new(coin: Coin, account: Account) -> Self {
        Self { coin, account }
    }
}
