//! # coinbridge Testing Infrastructure
//!
//! Shared testing utilities for the coinbridge crates:
//! - Account and coin fixtures
//! - Edge case account names
//! - Property-based testing strategies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coinbridge_testing::*;
//!
//! for name in EdgeCaseAccounts::invalid() {
//!     assert!(validate_account(name).is_err());
//! }
//!
//! proptest! {
//!     #[test]
//!     fn test_valid_names(name in valid_eos_account()) {
//!         // ...
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Fixtures
// ============================================================================

/// Accounts and coins used across test suites
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use coinbridge_traits::{Account, AccountOrigin, Coin, CoinType, Wallet};

    /// Account whose keys were generated in the wallet
    pub fn created_account() -> Account {
        Account::new("account-created", "Fresh", AccountOrigin::Created)
    }

    /// Account imported from an existing seed
    pub fn restored_account() -> Account {
        Account::new("account-restored", "Imported", AccountOrigin::Restored)
    }

    /// A second imported account
    pub fn other_restored_account() -> Account {
        Account::new("account-restored-2", "Imported 2", AccountOrigin::Restored)
    }

    /// Zcash, which needs a birthday height when restored
    pub fn zcash() -> Coin {
        Coin::new("Zcash", "ZEC", 8, CoinType::Zcash)
    }

    /// Bitcoin, which needs no restore settings
    pub fn bitcoin() -> Coin {
        Coin::new("Bitcoin", "BTC", 8, CoinType::Bitcoin)
    }

    /// EOS on the system token contract
    pub fn eos() -> Coin {
        Coin::new(
            "EOS",
            "EOS",
            4,
            CoinType::Eos {
                token: "eosio.token".to_string(),
                symbol: "EOS".to_string(),
            },
        )
    }

    /// EOS wallet of a restored account
    pub fn eos_wallet() -> Wallet {
        Wallet::new(eos(), restored_account())
    }

    /// Fixed timestamp for deterministic records
    pub fn timestamp(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_600_000_000 + seconds, 0)
            .single()
            .unwrap_or_default()
    }
}

// ============================================================================
// Edge Case Account Names
// ============================================================================

/// Edge case EOS account names
pub struct EdgeCaseAccounts;

impl EdgeCaseAccounts {
    /// System account
    pub const SYSTEM: &'static str = "eosio";

    /// System token contract (contains a dot)
    pub const TOKEN: &'static str = "eosio.token";

    /// Longest valid name (12 characters)
    pub const MAX_LENGTH: &'static str = "abcdefghij12";

    /// Shortest valid name
    pub const MIN_LENGTH: &'static str = "a";

    /// Valid names
    pub fn valid() -> Vec<&'static str> {
        vec![
            Self::SYSTEM,
            Self::TOKEN,
            Self::MAX_LENGTH,
            Self::MIN_LENGTH,
            "a.b.c",
            "user12345",
        ]
    }

    /// Invalid names for error handling tests
    pub fn invalid() -> Vec<&'static str> {
        vec![
            "",              // Empty
            "EOSIO",         // Uppercase
            "abcdefghijklm", // 13 characters
            "1eosio",        // Starts with a digit
            ".eosio",        // Starts with a dot
            "eosio.",        // Ends with a dot
            "eos..io",       // Consecutive dots
            "eosio6",        // Digit outside 1-5
            "eos io",        // Whitespace
        ]
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Generates valid EOS account names (1 to 11 characters)
pub fn valid_eos_account() -> impl Strategy<Value = String> {
    "[a-z](\\.?[a-z1-5]){0,5}"
}

/// Generates names longer than 12 characters from the valid alphabet
pub fn overlong_eos_account() -> impl Strategy<Value = String> {
    "[a-z][a-z1-5]{12,20}"
}

/// Generates names with at least one uppercase letter
pub fn uppercase_eos_account() -> impl Strategy<Value = String> {
    "[a-z]{0,5}[A-Z][a-z]{0,5}"
}

/// Generates positive quantities with four decimal places
pub fn positive_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Generates birthday heights as entered by a user
pub fn birthday_height() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..5_000_000u64).prop_map(|height| height.to_string()),
        Just(String::new()),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_case_lists() {
        assert!(EdgeCaseAccounts::valid().contains(&EdgeCaseAccounts::TOKEN));
        assert!(EdgeCaseAccounts::invalid().iter().any(|name| name.len() == 13));
        assert_eq!(EdgeCaseAccounts::MAX_LENGTH.len(), 12);
    }

    #[test]
    fn test_fixtures() {
        assert!(fixtures::created_account().is_created());
        assert!(!fixtures::restored_account().is_created());
        assert!(fixtures::zcash().requires_restore_settings());
        assert!(!fixtures::eos().requires_restore_settings());
        assert!(fixtures::timestamp(1) > fixtures::timestamp(0));
    }

    proptest! {
        #[test]
        fn test_valid_names_are_short(name in valid_eos_account()) {
            prop_assert!(!name.is_empty() && name.len() <= 12);
            prop_assert!(!name.contains(".."));
            prop_assert!(!name.ends_with('.'));
        }

        #[test]
        fn test_quantity_is_positive(quantity in positive_quantity()) {
            prop_assert!(quantity > Decimal::ZERO);
        }
    }
}
