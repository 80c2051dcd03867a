//! Transaction models for CSV parsing and internal representation.

use crate::decimal::Amount;
use crate::error::{EngineError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::str::FromStr;

/// Raw ledger row as read from CSV, in column order `Id,Date,Transaction`.
///
/// Fields are kept as strings so that each column can fail with its own error.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub date: String,
    pub amount: String,
}

impl TransactionRecord {
    /// Parses the raw record into a typed transaction.
    ///
    /// `row` is the 1-indexed file line used in error messages. Dates without a
    /// year are placed in `default_year`.
    pub fn parse(&self, row: usize, default_year: i32) -> Result<Transaction> {
        let id = self
            .id
            .trim()
            .parse::<i64>()
            .map_err(|_| EngineError::InvalidId {
                row,
                value: self.id.clone(),
            })?;

        let date =
            parse_date(&self.date, default_year).ok_or_else(|| EngineError::InvalidDate {
                row,
                value: self.date.clone(),
            })?;

        let amount =
            Amount::from_str(&self.amount).map_err(|_| EngineError::InvalidAmount {
                row,
                value: self.amount.clone(),
            })?;

        Ok(Transaction::new(id, date, amount))
    }
}

/// Parses `YYYY/MM/DD` (optionally followed by `HH:MM:SS`) or a year-less
/// `M/D` with one or two digits per component.
///
/// Year-less dates go into `default_year`. A `2/29` that does not exist there
/// goes into the closest earlier leap year instead, so the month is kept.
pub fn parse_date(value: &str, default_year: i32) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y/%m/%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y/%m/%d %H:%M:%S") {
        return Some(datetime.date());
    }

    let (month, day) = value.split_once('/')?;
    let month = parse_short_number(month)?;
    let day = parse_short_number(day)?;
    NaiveDate::from_ymd_opt(default_year, month, day).or_else(|| {
        if (month, day) != (2, 29) {
            return None;
        }
        (1..=8).find_map(|back| NaiveDate::from_ymd_opt(default_year.checked_sub(back)?, 2, 29))
    })
}

fn parse_short_number(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// One ledger entry handed to the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Caller-assigned identifier. Not required to be unique.
    pub id: i64,

    pub date: NaiveDate,

    /// Positive amounts are credits, zero and negative amounts are debits.
    pub amount: Amount,
}

impl Transaction {
    pub fn new(id: i64, date: NaiveDate, amount: Amount) -> Self {
        Transaction { id, date, amount }
    }

    /// Month of the transaction date, 1 through 12.
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}
