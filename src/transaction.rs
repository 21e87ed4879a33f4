//! Transaction requests as supplied by the caller, and the kinds the ledger understands.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Field holding the transaction type.
pub const TYPE_FIELD: &str = "type";

/// Field holding the transaction amount.
pub const AMOUNT_FIELD: &str = "amount";

static NULL: Value = Value::Null;

/// A proposed transaction, exactly as received.
///
/// Keeps every field of the original object in its original order, so a
/// rejected request can be echoed back verbatim. The `type` and `amount`
/// fields are interpreted lazily; nothing here is validated up front.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionRequest {
    fields: Map<String, Value>,
}

impl TransactionRequest {
    /// Creates a request with the given `type` and `amount` fields.
    pub fn new(kind: impl Into<Value>, amount: impl Into<Value>) -> Self {
        TransactionRequest::default()
            .with_field(TYPE_FIELD, kind)
            .with_field(AMOUNT_FIELD, amount)
    }

    /// Builds a request from an arbitrary value.
    ///
    /// Non-object values carry no fields at all, so they are later rejected
    /// for a missing type.
    pub fn from_value(value: &Value) -> Self {
        TransactionRequest {
            fields: value.as_object().cloned().unwrap_or_default(),
        }
    }

    /// Sets (or replaces) a field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The recognized transaction kind, if `type` is a known string.
    pub fn kind(&self) -> Option<TransactionKind> {
        self.fields
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .and_then(TransactionKind::parse)
    }

    /// The raw `amount` field; `null` when absent.
    pub fn amount(&self) -> &Value {
        self.fields.get(AMOUNT_FIELD).unwrap_or(&NULL)
    }

    /// All original fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Serialize for TransactionRequest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TransactionRequest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(TransactionRequest::from_value(&value))
    }
}

/// Transaction kinds the ledger applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Credit funds to the account.
    Deposit,

    /// Debit funds from the account, if the running balance covers it.
    Withdraw,
}

impl TransactionKind {
    /// Parses a type name, ignoring ASCII and Unicode case.
    ///
    /// Whitespace is significant: `" deposit"` is not a deposit.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "deposit" => Some(TransactionKind::Deposit),
            "withdraw" => Some(TransactionKind::Withdraw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
