//! Account snapshot: the input to a processing run.

use crate::transaction::TransactionRequest;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// An account and the transactions proposed against it.
///
/// Built infallibly from any JSON value: missing, empty or non-scalar header
/// fields become `None`, a non-array `transactions` becomes an empty list, and
/// `initial_balance` is kept raw until processing coerces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountSnapshot {
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
    pub currency: Option<String>,

    /// Raw opening balance; coerced (and defaulted to zero) during processing.
    pub initial_balance: Value,

    /// Proposed transactions, in the order they must be applied.
    pub transactions: Vec<TransactionRequest>,
}

impl AccountSnapshot {
    /// Creates an empty snapshot with the given raw initial balance.
    pub fn new(initial_balance: impl Into<Value>) -> Self {
        AccountSnapshot {
            initial_balance: initial_balance.into(),
            ..AccountSnapshot::default()
        }
    }

    /// Reads a snapshot out of an arbitrary JSON value. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return AccountSnapshot::default();
        };

        let transactions = match fields.get("transactions") {
            Some(Value::Array(items)) => items
                .iter()
                .map(TransactionRequest::from_value)
                .collect(),
            _ => Vec::new(),
        };

        AccountSnapshot {
            account_number: text_field(fields, "accountNumber"),
            account_holder: text_field(fields, "accountHolder"),
            currency: text_field(fields, "currency"),
            initial_balance: fields.get("initialBalance").cloned().unwrap_or(Value::Null),
            transactions,
        }
    }

    pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    pub fn with_account_holder(mut self, account_holder: impl Into<String>) -> Self {
        self.account_holder = Some(account_holder.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Appends a transaction to the end of the list.
    pub fn with_transaction(mut self, transaction: TransactionRequest) -> Self {
        self.transactions.push(transaction);
        self
    }
}

/// A header field is copied when it is a non-empty string or a non-zero
/// number (kept as its JSON text, so account number `42` reads as `"42"`).
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for AccountSnapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(AccountSnapshot::from_value(&value))
    }
}
