//! Typed inputs for sending and fee estimation.
//!
//! Well-typed callers build [`SendParameters`] directly. Input arriving from
//! an untyped source (a deserialized form, a payment request) goes through
//! [`SendParameters::from_fields`], which is the only place
//! [`AdapterError::WrongParameters`] can still come from.

use coinbridge_error::{AdapterError, AdapterResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Untyped parameter map as received at the boundary
pub type ParameterMap = HashMap<String, Value>;

/// Field names of a [`ParameterMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterField {
    /// Amount to send
    Amount,
    /// Recipient address
    Address,
    /// Optional memo
    Memo,
}

impl AdapterField {
    /// Returns the map key of this field
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterField::Amount => "amount",
            AdapterField::Address => "address",
            AdapterField::Memo => "memo",
        }
    }
}

/// Validated input of a send operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendParameters {
    /// Amount to send, in whole coin units
    pub amount: Decimal,
    /// Recipient address
    pub address: String,
    /// Optional memo attached to the transfer
    pub memo: Option<String>,
}

impl SendParameters {
    /// Creates send parameters without a memo
    pub fn new(amount: Decimal, address: impl Into<String>) -> Self {
        Self {
            amount,
            address: address.into(),
            memo: None,
        }
    }

    /// Attaches a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Builds parameters from an untyped map.
    ///
    /// `amount` may be a JSON number or a decimal string. `address` must be a
    /// string. `memo` is optional but must be a string when present.
    pub fn from_fields(fields: &ParameterMap) -> AdapterResult<Self> {
        let amount = fields
            .get(AdapterField::Amount.as_str())
            .ok_or_else(|| missing(AdapterField::Amount))
            .and_then(decimal_value)?;

        let address = match fields.get(AdapterField::Address.as_str()) {
            Some(Value::String(address)) => address.clone(),
            Some(_) => return Err(mistyped(AdapterField::Address)),
            None => return Err(missing(AdapterField::Address)),
        };

        let memo = match fields.get(AdapterField::Memo.as_str()) {
            None | Some(Value::Null) => None,
            Some(Value::String(memo)) => Some(memo.clone()),
            Some(_) => return Err(mistyped(AdapterField::Memo)),
        };

        Ok(Self {
            amount,
            address,
            memo,
        })
    }
}

fn missing(field: AdapterField) -> AdapterError {
    AdapterError::WrongParameters(format!("missing {}", field.as_str()))
}

fn mistyped(field: AdapterField) -> AdapterError {
    AdapterError::WrongParameters(format!("{} has the wrong type", field.as_str()))
}

fn decimal_value(value: &Value) -> AdapterResult<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).map_err(|_| mistyped(AdapterField::Amount)),
        Value::Number(n) => {
            Decimal::from_str(&n.to_string()).map_err(|_| mistyped(AdapterField::Amount))
        }
        _ => Err(mistyped(AdapterField::Amount)),
    }
}

/// Fee rate priority chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeRatePriority {
    /// Cheapest, slowest
    Low,
    /// Default
    #[default]
    Medium,
    /// Fastest
    High,
    /// Explicit rate in the chain's fee unit
    Custom(u64),
}

/// Input of balance and fee estimators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeParameters {
    /// Amount being sent, if already entered
    pub amount: Option<Decimal>,
    /// Recipient, if already entered
    pub address: Option<String>,
    /// Fee rate priority
    pub fee_rate_priority: FeeRatePriority,
}

impl FeeParameters {
    /// Creates estimator input with the default priority
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the recipient
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the fee rate priority
    pub fn with_priority(mut self, priority: FeeRatePriority) -> Self {
        self.fee_rate_priority = priority;
        self
    }
}

impl From<&SendParameters> for FeeParameters {
    fn from(params: &SendParameters) -> Self {
        Self {
            amount: Some(params.amount),
            address: Some(params.address.clone()),
            fee_rate_priority: FeeRatePriority::default(),
        }
    }
}
