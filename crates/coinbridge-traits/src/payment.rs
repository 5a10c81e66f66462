//! Payment URI parsing.

use coinbridge_error::AdapterError;
use rust_decimal::Decimal;
use std::str::FromStr;
use url::Url;

/// Address and amount extracted from a payment string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentData {
    /// Recipient address
    pub address: String,
    /// Requested amount, if the string carried one
    pub amount: Option<Decimal>,
}

/// Parsed payment string plus the result of validating its address
#[derive(Debug)]
pub struct PaymentRequestAddress {
    /// Recipient address
    pub address: String,
    /// Requested amount
    pub amount: Option<Decimal>,
    /// Set when the address fails the chain's validation
    pub error: Option<AdapterError>,
}

impl PaymentRequestAddress {
    /// Returns true if the address passed validation
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Parses `scheme:address?amount=x` payment URIs for one chain.
///
/// Strings that are not URIs of the configured scheme are returned as the
/// address unchanged (after trimming), without an amount.
#[derive(Debug, Clone)]
pub struct AddressParser {
    scheme: String,
    remove_scheme: bool,
}

impl AddressParser {
    /// Creates a parser for `scheme`, stripping the scheme from addresses
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into().to_ascii_lowercase(),
            remove_scheme: true,
        }
    }

    /// Keeps the `scheme:` prefix on parsed addresses
    pub fn keep_scheme(mut self) -> Self {
        self.remove_scheme = false;
        self
    }

    /// Scheme this parser accepts
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Parses a payment string
    pub fn parse(&self, payment_address: &str) -> PaymentData {
        let trimmed = payment_address.trim();

        match Url::parse(trimmed) {
            Ok(url) if url.scheme() == self.scheme => {
                let amount = url
                    .query_pairs()
                    .find(|(key, _)| key == "amount")
                    .and_then(|(_, value)| Decimal::from_str(&value).ok());
                let address = if self.remove_scheme {
                    url.path().to_string()
                } else {
                    format!("{}:{}", self.scheme, url.path())
                };
                PaymentData { address, amount }
            }
            _ => PaymentData {
                address: trimmed.to_string(),
                amount: None,
            },
        }
    }
}
