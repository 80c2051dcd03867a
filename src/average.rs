//! Average debit and credit amounts derived from an [`Aggregation`].

use crate::aggregate::Aggregation;
use crate::decimal::Amount;
use crate::error::ArithmeticError;

/// Average amount per debit and per credit transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Averages {
    pub debit: Amount,
    pub credit: Amount,
}

impl Averages {
    /// Averages over the totals and counts of a finished aggregation.
    pub fn from_aggregation(aggregation: &Aggregation) -> Result<Self, ArithmeticError> {
        average(
            aggregation.total_debit,
            aggregation.debit_count,
            aggregation.total_credit,
            aggregation.credit_count,
        )
    }
}

/// Computes `(total_debit / debit_count, total_credit / credit_count)`.
///
/// A class with a zero count averages to exactly zero. Quotients keep
/// [`QUOTIENT_SCALE`](crate::decimal::QUOTIENT_SCALE) fractional digits.
pub fn average(
    total_debit: Amount,
    debit_count: usize,
    total_credit: Amount,
    credit_count: usize,
) -> Result<Averages, ArithmeticError> {
    Ok(Averages {
        debit: mean(total_debit, debit_count)?,
        credit: mean(total_credit, credit_count)?,
    })
}

fn mean(total: Amount, count: usize) -> Result<Amount, ArithmeticError> {
    if count == 0 {
        return Ok(Amount::ZERO);
    }
    total.checked_div_count(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_counts_average_to_zero() {
        let averages = average(dec("-50"), 0, dec("75"), 0).unwrap();

        assert!(averages.debit.is_zero());
        assert!(averages.credit.is_zero());
    }

    #[test]
    fn test_only_credits() {
        let averages = average(Amount::ZERO, 0, dec("100"), 1).unwrap();

        assert_eq!(averages.credit, dec("100"));
        assert!(averages.debit.is_zero());
    }

    #[test]
    fn test_repeating_quotient_is_not_rounded_to_cents() {
        let averages = average(dec("-10"), 3, dec("20"), 3).unwrap();

        assert_eq!(averages.debit, dec("-3.333333333333"));
        assert_eq!(averages.credit, dec("6.666666666667"));
    }

    #[test]
    fn test_from_aggregation() {
        let mut aggregation = Aggregation::new();
        aggregation.total_debit = dec("-4391567.74");
        aggregation.debit_count = 3;
        aggregation.total_credit = dec("6716519.10");
        aggregation.credit_count = 5;

        let averages = Averages::from_aggregation(&aggregation).unwrap();
        assert_eq!(averages.debit, dec("-1463855.913333333333"));
        assert_eq!(averages.credit, dec("1343303.82"));
    }
}
