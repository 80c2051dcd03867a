//! Error types for the account summary engine.

use crate::decimal::Amount;
use std::fmt;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Decimal operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Divide,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => f.write_str("add"),
            Operation::Divide => f.write_str("divide"),
        }
    }
}

/// A decimal operation whose result cannot be represented exactly.
///
/// Carries the operands so the failing step can be identified from the
/// top-level error message alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("cannot {operation} {lhs} and {rhs}: result out of range")]
    Overflow {
        operation: Operation,
        lhs: Amount,
        rhs: Amount,
    },

    #[error("cannot {operation} {lhs} and {rhs}: result would lose precision")]
    Inexact {
        operation: Operation,
        lhs: Amount,
        rhs: Amount,
    },

    #[error("cannot divide {lhs} by a zero count")]
    DivisionByZero { lhs: Amount },
}

/// Errors that can occur while producing an account summary.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (wrong column count, bad quoting, ...)
    #[error("invalid file: {0}")]
    Csv(#[from] csv::Error),

    /// Input file has zero bytes
    #[error("file is empty")]
    EmptyFile,

    /// Header is not `Id,Date,Transaction`
    #[error("invalid header: expected Id,Date,Transaction, found {found}")]
    InvalidHeader { found: String },

    /// Id column is not an integer
    #[error("invalid id at row {row}: {value:?}")]
    InvalidId { row: usize, value: String },

    /// Date column matches none of the accepted layouts
    #[error("invalid date format at row {row}: {value:?}")]
    InvalidDate { row: usize, value: String },

    /// Transaction column is not a decimal amount
    #[error("invalid amount at row {row}: {value:?}")]
    InvalidAmount { row: usize, value: String },

    /// Batch contains no transactions
    #[error("no transactions")]
    NoTransactions,

    /// Recipient address failed validation
    #[error("invalid email: {0:?}")]
    InvalidEmail(String),

    /// Aggregation or averaging failed
    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] ArithmeticError),
}
