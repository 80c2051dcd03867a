//! # Account Summary
//!
//! Aggregates a ledger of dated, signed transactions into an account summary:
//! total balance, average debit and credit amounts, and transactions per month.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: `rust_decimal` behind checked operations that refuse
//!   to overflow or round
//! - **Sign-based classification**: positive amounts are credits, zero and
//!   negative amounts are debits
//! - **All-or-nothing**: any failure aborts the run without a partial summary
//! - **Dense months**: all twelve months are reported, empty ones as zero
//!
//! ## Example
//!
//! ```
//! use account_summary::{read_csv, AccountSummary};
//! use std::io::Cursor;
//!
//! let csv = "Id,Date,Transaction\n0,7/15,+60.5\n1,7/28,-10.3\n";
//! let transactions = read_csv(Cursor::new(csv), 2024).unwrap();
//! let summary = AccountSummary::build("user@example.com", &transactions).unwrap();
//! assert_eq!(summary.total_balance.to_string(), "50.2");
//! assert_eq!(summary.transactions_per_month.get(7), 2);
//! ```

pub mod aggregate;
pub mod app;
pub mod average;
pub mod decimal;
pub mod error;
pub mod report;
pub mod source;
pub mod store;
pub mod summary;
pub mod transaction;

pub use aggregate::{aggregate, Aggregation, MonthlyCounts};
pub use app::{is_valid_email, App, Config};
pub use average::{average, Averages};
pub use decimal::{Amount, QUOTIENT_SCALE};
pub use error::{ArithmeticError, EngineError, Operation, Result};
pub use report::{Notifier, ReportNotifier};
pub use source::{read_csv, CsvFileSource, TransactionSource};
pub use store::{CsvSummaryStore, SummaryStore};
pub use summary::{AccountSummary, Execution};
pub use transaction::{Transaction, TransactionRecord};
