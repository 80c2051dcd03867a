//! Single-pass aggregation of a transaction batch.
//!
//! Maintains the invariants `total_balance == total_credit + total_debit`,
//! `credit_count + debit_count == batch length` and
//! `per_month.total() == batch length`.

use crate::decimal::Amount;
use crate::error::ArithmeticError;
use crate::transaction::Transaction;
use log::debug;

/// Transaction counts for each month of the year.
///
/// All twelve months are always present; months without transactions hold zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlyCounts([usize; 12]);

impl MonthlyCounts {
    pub fn new() -> Self {
        MonthlyCounts([0; 12])
    }

    /// Count for `month` (1 through 12). Out-of-range months read as zero.
    pub fn get(&self, month: u32) -> usize {
        Self::index(month).map(|i| self.0[i]).unwrap_or(0)
    }

    fn increment(&mut self, month: u32) {
        if let Some(i) = Self::index(month) {
            self.0[i] += 1;
        }
    }

    fn index(month: u32) -> Option<usize> {
        (1..=12).contains(&month).then(|| month as usize - 1)
    }

    /// Sum over all months.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(month, count)` pairs for every month, January first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.0.iter().enumerate().map(|(i, &count)| (i as u32 + 1, count))
    }

    /// Like [`iter`](Self::iter) but skips months without transactions.
    pub fn non_empty(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.iter().filter(|&(_, count)| count > 0)
    }

    /// Raw counters, index 0 is January.
    pub fn as_array(&self) -> &[usize; 12] {
        &self.0
    }
}

/// Totals and counts over one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Sum of every amount.
    pub total_balance: Amount,

    /// Sum of strictly positive amounts.
    pub total_credit: Amount,

    /// Sum of zero and negative amounts.
    pub total_debit: Amount,

    pub credit_count: usize,
    pub debit_count: usize,

    pub per_month: MonthlyCounts,
}

impl Aggregation {
    /// Zero-valued result, also what an empty batch produces.
    pub fn new() -> Self {
        Aggregation {
            total_balance: Amount::ZERO,
            total_credit: Amount::ZERO,
            total_debit: Amount::ZERO,
            credit_count: 0,
            debit_count: 0,
            per_month: MonthlyCounts::new(),
        }
    }

    /// Number of transactions folded into this result.
    pub fn transaction_count(&self) -> usize {
        self.credit_count + self.debit_count
    }

    /// Folds one transaction into the running totals.
    ///
    /// On error `self` is left untouched.
    fn account(&mut self, tx: &Transaction) -> Result<(), ArithmeticError> {
        let amount = tx.amount;
        let total_balance = self.total_balance.checked_add(amount)?;

        if amount.is_credit() {
            self.total_credit = self.total_credit.checked_add(amount)?;
            self.credit_count += 1;
        } else {
            self.total_debit = self.total_debit.checked_add(amount)?;
            self.debit_count += 1;
        }

        self.total_balance = total_balance;
        self.per_month.increment(tx.month());
        Ok(())
    }
}

impl Default for Aggregation {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds `transactions` into an [`Aggregation`].
///
/// Credits are strictly positive amounts; everything else, zero included, is a
/// debit. Any failed addition aborts the whole fold.
pub fn aggregate(transactions: &[Transaction]) -> Result<Aggregation, ArithmeticError> {
    let mut result = Aggregation::new();

    for tx in transactions {
        result.account(tx)?;
    }

    debug!(
        "Aggregated {} transactions: {} credits, {} debits, balance {}",
        transactions.len(),
        result.credit_count,
        result.debit_count,
        result.total_balance
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn tx(month: u32, amount: &str) -> Transaction {
        Transaction::new(
            0,
            NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            Amount::from_str(amount).unwrap(),
        )
    }

    #[test]
    fn test_empty_batch_is_all_zero() {
        let result = aggregate(&[]).unwrap();

        assert_eq!(result, Aggregation::new());
        assert!(result.total_balance.is_zero());
        assert_eq!(result.per_month.iter().count(), 12);
        assert_eq!(result.per_month.total(), 0);
    }

    #[test]
    fn test_single_credit() {
        let result = aggregate(&[tx(7, "100")]).unwrap();

        assert_eq!(result.total_balance.to_string(), "100");
        assert_eq!(result.credit_count, 1);
        assert_eq!(result.debit_count, 0);
        assert_eq!(result.per_month.get(7), 1);
    }

    #[test]
    fn test_zero_amount_counts_as_debit() {
        let result = aggregate(&[tx(3, "0"), tx(3, "0.00")]).unwrap();

        assert_eq!(result.debit_count, 2);
        assert_eq!(result.credit_count, 0);
        assert!(result.total_debit.is_zero());
        assert_eq!(result.per_month.get(3), 2);
    }

    #[test]
    fn test_credit_and_debit_split() {
        let batch = [tx(7, "60.5"), tx(7, "-10.3"), tx(8, "-20.46"), tx(8, "+10")];
        let result = aggregate(&batch).unwrap();

        assert_eq!(result.total_credit, Amount::from_str("70.5").unwrap());
        assert_eq!(result.total_debit, Amount::from_str("-30.76").unwrap());
        assert_eq!(result.total_balance, Amount::from_str("39.74").unwrap());
        assert_eq!(result.per_month.get(7), 2);
        assert_eq!(result.per_month.get(8), 2);
        assert_eq!(
            result.per_month.non_empty().collect::<Vec<_>>(),
            vec![(7, 2), (8, 2)]
        );
    }

    #[test]
    fn test_overflow_aborts_without_partial_result() {
        let max = Transaction::new(
            1,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Amount::new(rust_decimal::Decimal::MAX),
        );

        let err = aggregate(&[max.clone(), max]).unwrap_err();
        assert!(matches!(err, ArithmeticError::Overflow { .. }));
    }

    #[test]
    fn test_failed_account_leaves_state_untouched() {
        let mut result = Aggregation::new();
        let max = Transaction::new(
            1,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Amount::new(rust_decimal::Decimal::MAX),
        );

        result.account(&max).unwrap();
        let before = result.clone();
        assert!(result.account(&max).is_err());
        assert_eq!(result, before);
    }

    #[test]
    fn test_monthly_counts_out_of_range() {
        let counts = MonthlyCounts::new();
        assert_eq!(counts.get(0), 0);
        assert_eq!(counts.get(13), 0);
    }
}
