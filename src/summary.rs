//! Account summary assembled from an aggregation and its averages.

use crate::aggregate::{aggregate, Aggregation, MonthlyCounts};
use crate::average::Averages;
use crate::decimal::Amount;
use crate::error::ArithmeticError;
use crate::transaction::Transaction;

/// The unit handed to persistence and notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    /// Recipient address, validated by the caller.
    pub email: String,
    pub total_balance: Amount,
    pub average_debit: Amount,
    pub average_credit: Amount,
    pub transactions_per_month: MonthlyCounts,
}

impl AccountSummary {
    /// Combines precomputed engine outputs with the recipient address.
    pub fn new(email: impl Into<String>, aggregation: &Aggregation, averages: Averages) -> Self {
        AccountSummary {
            email: email.into(),
            total_balance: aggregation.total_balance,
            average_debit: averages.debit,
            average_credit: averages.credit,
            transactions_per_month: aggregation.per_month,
        }
    }

    /// Runs aggregation and averaging over `transactions`.
    pub fn build(
        email: impl Into<String>,
        transactions: &[Transaction],
    ) -> Result<Self, ArithmeticError> {
        let aggregation = aggregate(transactions)?;
        let averages = Averages::from_aggregation(&aggregation)?;
        Ok(Self::new(email, &aggregation, averages))
    }
}

/// One run of the app: what was read, from where, and what it summarized to.
#[derive(Debug, Clone)]
pub struct Execution<'a> {
    pub file_path: &'a str,
    pub summary: &'a AccountSummary,
    pub transactions: &'a [Transaction],
}
