//! EOS account name and private key validation.

use coinbridge_error::{AdapterError, AdapterResult};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Longest account name accepted
pub const MAX_ACCOUNT_LENGTH: usize = 12;

const WIF_VERSION: u8 = 0x80;
const WIF_LENGTH: usize = 37;

// A lowercase letter, then [a-z1-5] characters each optionally preceded by a
// single dot: no leading, trailing or doubled dots.
static ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z](?:\.?[a-z1-5])*$").expect("valid EOS account regex")
});

/// Checks an EOS account name.
///
/// Names are 1 to 12 characters from `[a-z1-5.]`, start with a letter, and
/// neither end with nor contain consecutive dots.
pub fn validate_account(account: &str) -> AdapterResult<()> {
    if account.len() <= MAX_ACCOUNT_LENGTH && ACCOUNT_RE.is_match(account) {
        Ok(())
    } else {
        Err(AdapterError::InvalidAccount {
            account: account.to_string(),
        })
    }
}

/// Checks a legacy WIF private key (`5...`): base58 payload of a version
/// byte, 32 key bytes and a double SHA-256 checksum.
pub fn validate_private_key(private_key: &str) -> AdapterResult<()> {
    let bytes = bs58::decode(private_key.trim())
        .into_vec()
        .map_err(|err| AdapterError::InvalidPrivateKey(err.to_string()))?;

    if bytes.len() != WIF_LENGTH {
        return Err(AdapterError::InvalidPrivateKey(format!(
            "expected {WIF_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }
    if bytes[0] != WIF_VERSION {
        return Err(AdapterError::InvalidPrivateKey(format!(
            "unexpected version byte {:#04x}",
            bytes[0]
        )));
    }

    let (payload, checksum) = bytes.split_at(WIF_LENGTH - 4);
    let digest = Sha256::digest(Sha256::digest(payload));
    if &digest[..4] != checksum {
        return Err(AdapterError::InvalidPrivateKey("checksum mismatch".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinbridge_testing::EdgeCaseAccounts;

    const DEV_KEY: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";

    #[test]
    fn test_system_accounts() {
        assert!(validate_account("eosio").is_ok());
        assert!(validate_account("eosio.token").is_ok());
    }

    #[test]
    fn test_rejected_accounts() {
        for name in ["EOSIO", "", "abcdefghijklm"] {
            let err = validate_account(name).unwrap_err();
            assert!(matches!(err, AdapterError::InvalidAccount { ref account } if account == name));
        }
    }

    #[test]
    fn test_edge_cases() {
        for name in EdgeCaseAccounts::valid() {
            assert!(validate_account(name).is_ok(), "{name} should be valid");
        }
        for name in EdgeCaseAccounts::invalid() {
            assert!(validate_account(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn test_private_key() {
        assert!(validate_private_key(DEV_KEY).is_ok());
    }

    #[test]
    fn test_private_key_bad_checksum() {
        let tampered = format!("{}4", &DEV_KEY[..DEV_KEY.len() - 1]);
        let err = validate_private_key(&tampered).unwrap_err();
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn test_private_key_not_base58() {
        assert!(matches!(
            validate_private_key("0OIl"),
            Err(AdapterError::InvalidPrivateKey(_))
        ));
        assert!(validate_private_key("").is_err());
    }
}
