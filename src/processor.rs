//! Core ledger processing.
//!
//! Walks the proposed transactions in input order, validating each one
//! against a running balance. Nothing here can fail: every problem becomes a
//! rejection record or a defaulted field.

use crate::amount::{coerce, Amount};
use crate::error::CoercionError;
use crate::report::{AppliedTransaction, ProcessedResult, RejectedTransaction, RejectionReason};
use crate::snapshot::AccountSnapshot;
use crate::transaction::{TransactionKind, TransactionRequest};
use log::{debug, warn};
use serde_json::Value;

/// Processes a snapshot and returns the resulting balances.
///
/// The snapshot is only borrowed; every value in the result is an
/// independent copy, so the caller's input is left untouched.
///
/// # Example
///
/// ```
/// use ledger_processor::{process, AccountSnapshot, TransactionRequest};
///
/// let snapshot = AccountSnapshot::new("1000")
///     .with_transaction(TransactionRequest::new("deposit", "200"))
///     .with_transaction(TransactionRequest::new("withdraw", 50));
///
/// let result = process(&snapshot);
/// assert_eq!(result.final_balance.to_string(), "1150");
/// assert!(result.rejected_transactions.is_empty());
/// ```
pub fn process(snapshot: &AccountSnapshot) -> ProcessedResult {
    let mut ledger = Ledger::new(opening_balance(&snapshot.initial_balance));

    for (position, request) in snapshot.transactions.iter().enumerate() {
        ledger.apply(position, request);
    }

    ledger.finish(snapshot)
}

/// Coerces the raw initial balance; invalid or negative values become zero.
fn opening_balance(raw: &Value) -> Amount {
    match coerce(raw) {
        Ok(amount) if !amount.is_negative() => amount,
        Ok(amount) => {
            warn!("Initial balance {} is negative, defaulting to 0", amount);
            Amount::ZERO
        }
        Err(CoercionError::Null) => {
            debug!("Initial balance missing, defaulting to 0");
            Amount::ZERO
        }
        Err(e) => {
            warn!("Initial balance is invalid ({}), defaulting to 0", e);
            Amount::ZERO
        }
    }
}

/// Running state of a single processing pass.
struct Ledger {
    opening_balance: Amount,
    balance: Amount,
    applied: Vec<AppliedTransaction>,
    rejected: Vec<RejectedTransaction>,
}

impl Ledger {
    fn new(opening_balance: Amount) -> Self {
        Ledger {
            opening_balance,
            balance: opening_balance,
            applied: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Applies one request, or records why it was rejected.
    fn apply(&mut self, position: usize, request: &TransactionRequest) {
        match self.try_apply(request) {
            Ok((kind, amount)) => {
                debug!(
                    "Transaction {}: applied {} of {}, balance now {}",
                    position, kind, amount, self.balance
                );
                self.applied.push(AppliedTransaction {
                    position,
                    kind,
                    amount,
                });
            }
            Err(reason) => {
                debug!("Transaction {}: rejected ({})", position, reason);
                self.rejected.push(RejectedTransaction {
                    position,
                    fields: request.fields().clone(),
                    reason,
                });
            }
        }
    }

    /// Validates a request and, if valid, moves the running balance.
    ///
    /// The balance is untouched on every error path.
    fn try_apply(
        &mut self,
        request: &TransactionRequest,
    ) -> Result<(TransactionKind, Amount), RejectionReason> {
        let kind = request.kind().ok_or(RejectionReason::InvalidType)?;
        let amount = coerce(request.amount()).map_err(RejectionReason::InvalidAmount)?;

        if !amount.is_positive() {
            return Err(RejectionReason::NonPositiveAmount);
        }

        match kind {
            TransactionKind::Deposit => {
                self.balance = self
                    .balance
                    .checked_add(amount)
                    .ok_or(RejectionReason::BalanceOverflow)?;
            }
            TransactionKind::Withdraw => {
                // Checked against the running balance, not the opening one.
                if amount > self.balance {
                    return Err(RejectionReason::InsufficientBalance);
                }
                self.balance -= amount;
            }
        }

        Ok((kind, amount))
    }

    fn finish(self, snapshot: &AccountSnapshot) -> ProcessedResult {
        debug!(
            "Processed {} transactions: {} applied, {} rejected, final balance {}",
            self.applied.len() + self.rejected.len(),
            self.applied.len(),
            self.rejected.len(),
            self.balance
        );

        ProcessedResult {
            account_number: snapshot.account_number.clone(),
            account_holder: snapshot.account_holder.clone(),
            currency: snapshot.currency.clone(),
            opening_balance: self.opening_balance,
            final_balance: self.balance,
            applied_transactions: self.applied,
            rejected_transactions: self.rejected,
        }
    }
}
