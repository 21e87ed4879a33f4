//! Output of a processing run.

use crate::amount::Amount;
use crate::error::CoercionError;
use crate::transaction::TransactionKind;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Field added to a rejected request to carry the rejection reason.
pub const REASON_FIELD: &str = "reason";

/// The outcome of processing one snapshot.
///
/// # Invariants
///
/// - Every input transaction appears exactly once, in either
///   `applied_transactions` or `rejected_transactions`
/// - `final_balance == opening_balance + deposits - withdrawals` (applied only)
/// - `opening_balance` is never negative
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResult {
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
    pub currency: Option<String>,
    pub opening_balance: Amount,
    pub final_balance: Amount,
    pub applied_transactions: Vec<AppliedTransaction>,
    pub rejected_transactions: Vec<RejectedTransaction>,
}

impl ProcessedResult {
    /// Final balance minus opening balance.
    pub fn net_change(&self) -> Amount {
        self.final_balance - self.opening_balance
    }

    /// Sum of applied transactions of one kind.
    ///
    /// `None` when the sum leaves the decimal range. Deposits interleaved with
    /// withdrawals can add up past it even though the balance never does.
    pub fn total_applied(&self, kind: TransactionKind) -> Option<Amount> {
        self.applied_transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .try_fold(Amount::ZERO, |sum, tx| sum.checked_add(tx.amount))
    }

    /// `true` when no transaction was rejected.
    pub fn is_fully_applied(&self) -> bool {
        self.rejected_transactions.is_empty()
    }

    /// Number of input transactions accounted for.
    pub fn transaction_count(&self) -> usize {
        self.applied_transactions.len() + self.rejected_transactions.len()
    }
}

/// A transaction reflected in the final balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedTransaction {
    /// Index in the input list.
    #[serde(skip)]
    pub position: usize,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub amount: Amount,
}

/// A transaction that failed validation, echoed back with its reason.
///
/// Serializes as the original object with `reason` added. An original field
/// named `reason` keeps its place but takes the rejection reason as value.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedTransaction {
    /// Index in the input list.
    pub position: usize,

    /// Every field of the original request.
    pub fields: Map<String, Value>,

    pub reason: RejectionReason,
}

impl Serialize for RejectedTransaction {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let has_reason_field = self.fields.contains_key(REASON_FIELD);
        let len = self.fields.len() + usize::from(!has_reason_field);
        let mut map = serializer.serialize_map(Some(len))?;

        for (key, value) in &self.fields {
            if key == REASON_FIELD {
                map.serialize_entry(key, &self.reason)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        if !has_reason_field {
            map.serialize_entry(REASON_FIELD, &self.reason)?;
        }

        map.end()
    }
}

/// Why a transaction was not applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("Invalid or missing transaction type")]
    InvalidType,

    #[error("Amount is not a valid number")]
    InvalidAmount(#[source] CoercionError),

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Insufficient balance")]
    InsufficientBalance,

    /// The deposit would push the balance past the largest representable amount.
    #[error("Balance would exceed the supported range")]
    BalanceOverflow,
}

impl Serialize for RejectionReason {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
