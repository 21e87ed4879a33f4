//! # Ledger Processor
//!
//! Validates a list of proposed banking transactions against an account
//! snapshot, applies the valid ones to a running balance and reports what
//! was applied, what was rejected and why.
//!
//! ## Design Principles
//!
//! - **Exact decimals**: amounts use `rust_decimal`, never floating point
//! - **Never fails**: malformed input becomes a rejection or a default
//! - **Explicit coercion**: booleans, nulls and empty strings are not numbers
//! - **Order preserving**: output lists follow input order
//!
//! ## Example
//!
//! ```
//! use ledger_processor::{process, AccountSnapshot};
//!
//! let input = r#"{
//!     "accountNumber": "ACC123",
//!     "initialBalance": "1000",
//!     "transactions": [
//!         {"type": "deposit", "amount": "200"},
//!         {"type": "withdraw", "amount": "2000"}
//!     ]
//! }"#;
//!
//! let snapshot: AccountSnapshot = serde_json::from_str(input).unwrap();
//! let result = process(&snapshot);
//!
//! assert_eq!(result.final_balance.to_string(), "1200");
//! assert_eq!(result.rejected_transactions[0].reason.to_string(), "Insufficient balance");
//! ```

pub mod amount;
pub mod error;
pub mod processor;
pub mod report;
pub mod snapshot;
pub mod transaction;

pub use amount::{coerce, Amount};
pub use error::{CoercionError, LedgerError, Result};
pub use processor::process;
pub use report::{AppliedTransaction, ProcessedResult, RejectedTransaction, RejectionReason};
pub use snapshot::AccountSnapshot;
pub use transaction::{TransactionKind, TransactionRequest};
