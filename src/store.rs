//! Append-only CSV persistence for executions.
//!
//! Each execution adds one row to `account_summary.csv` and one row per
//! transaction to `transactions.csv`. Headers are written when a file is
//! created. A save either appends to both files or to neither.

use crate::decimal::Amount;
use crate::error::Result;
use crate::summary::Execution;
use chrono::NaiveDate;
use csv::WriterBuilder;
use log::{info, warn};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "account_summary.csv";
pub const TRANSACTIONS_FILE: &str = "transactions.csv";

/// Persists finished executions.
pub trait SummaryStore {
    fn save(&mut self, execution: &Execution<'_>) -> Result<()>;
}

/// One line of `account_summary.csv`. Field names double as the header.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    email: &'a str,
    total_balance: Amount,
    average_debit_amount: Amount,
    average_credit_amount: Amount,
    january: usize,
    february: usize,
    march: usize,
    april: usize,
    may: usize,
    june: usize,
    july: usize,
    august: usize,
    september: usize,
    october: usize,
    november: usize,
    december: usize,
    file_path: &'a str,
}

impl<'a> SummaryRow<'a> {
    fn from_execution(execution: &Execution<'a>) -> Self {
        let summary = execution.summary;
        let [
            january,
            february,
            march,
            april,
            may,
            june,
            july,
            august,
            september,
            october,
            november,
            december,
        ] = *summary.transactions_per_month.as_array();

        SummaryRow {
            email: &summary.email,
            total_balance: summary.total_balance,
            average_debit_amount: summary.average_debit,
            average_credit_amount: summary.average_credit,
            january,
            february,
            march,
            april,
            may,
            june,
            july,
            august,
            september,
            october,
            november,
            december,
            file_path: execution.file_path,
        }
    }
}

/// One line of `transactions.csv`.
#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    id: i64,
    date: NaiveDate,
    amount: Amount,
    file_path: &'a str,
}

/// Stores executions as CSV rows under a directory.
#[derive(Debug, Clone)]
pub struct CsvSummaryStore {
    dir: PathBuf,
}

impl CsvSummaryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvSummaryStore { dir: dir.into() }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(SUMMARY_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.dir.join(TRANSACTIONS_FILE)
    }

    fn append_summary(&self, execution: &Execution<'_>) -> Result<()> {
        let (file, is_new) = open_append(&self.summary_path())?;
        let mut writer = WriterBuilder::new().has_headers(is_new).from_writer(file);

        writer.serialize(SummaryRow::from_execution(execution))?;
        writer.flush()?;
        Ok(())
    }

    fn append_transactions(&self, execution: &Execution<'_>) -> Result<()> {
        let (file, is_new) = open_append(&self.transactions_path())?;
        let mut writer = WriterBuilder::new().has_headers(is_new).from_writer(file);

        for tx in execution.transactions {
            writer.serialize(TransactionRow {
                id: tx.id,
                date: tx.date,
                amount: tx.amount,
                file_path: execution.file_path,
            })?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl SummaryStore for CsvSummaryStore {
    fn save(&mut self, execution: &Execution<'_>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let paths = [self.summary_path(), self.transactions_path()];
        let lengths = [current_len(&paths[0])?, current_len(&paths[1])?];

        let appended = self
            .append_summary(execution)
            .and_then(|()| self.append_transactions(execution));

        if let Err(err) = appended {
            for (path, len) in paths.iter().zip(lengths) {
                if let Err(rollback) = truncate(path, len) {
                    warn!("Could not roll back {}: {}", path.display(), rollback);
                }
            }
            return Err(err);
        }

        info!(
            "Stored summary and {} transactions in {}",
            execution.transactions.len(),
            self.dir.display()
        );
        Ok(())
    }
}

/// Opens `path` for appending; the flag is `true` when the file was empty.
fn open_append(path: &Path) -> Result<(File, bool)> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let is_new = file.metadata()?.len() == 0;
    Ok((file, is_new))
}

/// Length of the file at `path` before a save. A missing file counts as empty;
/// `None` means `path` is not a regular file and is left alone on rollback.
fn current_len(path: &Path) -> Result<Option<u64>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
        Ok(_) => Ok(None),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Some(0)),
        Err(err) => Err(err.into()),
    }
}

fn truncate(path: &Path, len: Option<u64>) -> std::io::Result<()> {
    match len {
        Some(len) => match OpenOptions::new().write(true).open(path) {
            Ok(file) => file.set_len(len),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        },
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Amount;
    use crate::summary::AccountSummary;
    use crate::transaction::Transaction;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::new(
                0,
                NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
                Amount::from_str("60.5").unwrap(),
            ),
            Transaction::new(
                1,
                NaiveDate::from_ymd_opt(2024, 8, 2).unwrap(),
                Amount::from_str("-10").unwrap(),
            ),
        ]
    }

    #[test]
    fn test_save_writes_headers_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvSummaryStore::new(dir.path().join("out"));
        let transactions = transactions();
        let summary = AccountSummary::build("user@example.com", &transactions).unwrap();
        let execution = Execution {
            file_path: "ledger.csv",
            summary: &summary,
            transactions: &transactions,
        };

        store.save(&execution).unwrap();
        store.save(&execution).unwrap();

        let summaries = fs::read_to_string(store.summary_path()).unwrap();
        let lines: Vec<_> = summaries.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "email,total_balance,average_debit_amount,average_credit_amount,\
january,february,march,april,may,june,july,august,september,october,november,december,\
file_path"
        );
        assert_eq!(
            lines[1],
            "user@example.com,50.5,-10,60.5,0,0,0,0,0,0,1,1,0,0,0,0,ledger.csv"
        );

        let rows = fs::read_to_string(store.transactions_path()).unwrap();
        let lines: Vec<_> = rows.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "id,date,amount,file_path");
        assert_eq!(lines[1], "0,2024-07-15,60.5,ledger.csv");
        assert_eq!(lines[2], "1,2024-08-02,-10,ledger.csv");
    }

    #[test]
    fn test_failed_transactions_append_rolls_back_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvSummaryStore::new(dir.path());
        let transactions = transactions();
        let summary = AccountSummary::build("user@example.com", &transactions).unwrap();
        let execution = Execution {
            file_path: "ledger.csv",
            summary: &summary,
            transactions: &transactions,
        };

        store.save(&execution).unwrap();
        let before = fs::read_to_string(store.summary_path()).unwrap();

        fs::remove_file(store.transactions_path()).unwrap();
        fs::create_dir(store.transactions_path()).unwrap();

        assert!(store.save(&execution).is_err());
        assert_eq!(fs::read_to_string(store.summary_path()).unwrap(), before);
        assert_eq!(before.lines().count(), 2);
    }

    #[test]
    fn test_failed_first_save_leaves_empty_summary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvSummaryStore::new(dir.path());
        let transactions = transactions();
        let summary = AccountSummary::build("user@example.com", &transactions).unwrap();
        let execution = Execution {
            file_path: "ledger.csv",
            summary: &summary,
            transactions: &transactions,
        };

        fs::create_dir(store.transactions_path()).unwrap();

        assert!(store.save(&execution).is_err());
        assert_eq!(fs::read_to_string(store.summary_path()).unwrap(), "");
    }
}
