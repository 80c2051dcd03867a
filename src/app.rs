//! Orchestration: read, summarize, persist, notify.

use crate::error::{EngineError, Result};
use crate::report::Notifier;
use crate::source::TransactionSource;
use crate::store::SummaryStore;
use crate::summary::{AccountSummary, Execution};
use log::{info, warn};

/// Everything a run needs. `store` is optional; without it nothing is persisted.
pub struct Config {
    pub email: String,
    pub file_path: String,
    pub source: Box<dyn TransactionSource>,
    pub store: Option<Box<dyn SummaryStore>>,
    pub notifier: Box<dyn Notifier>,
}

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        App { config }
    }

    /// Runs one summary end to end.
    ///
    /// Fails before touching the store or notifier if the email is invalid,
    /// the batch is empty, or the arithmetic fails.
    pub fn run(&mut self) -> Result<AccountSummary> {
        if !is_valid_email(&self.config.email) {
            return Err(EngineError::InvalidEmail(self.config.email.clone()));
        }

        let transactions = self.config.source.read_transactions()?;
        if transactions.is_empty() {
            return Err(EngineError::NoTransactions);
        }

        let summary = AccountSummary::build(self.config.email.as_str(), &transactions)?;
        info!(
            "Summarized {} transactions from {}: balance {}",
            transactions.len(),
            self.config.file_path,
            summary.total_balance
        );

        match self.config.store.as_mut() {
            Some(store) => store.save(&Execution {
                file_path: &self.config.file_path,
                summary: &summary,
                transactions: &transactions,
            })?,
            None => warn!("No output directory configured, persistence disabled"),
        }

        self.config.notifier.notify(&summary)?;
        Ok(summary)
    }
}

/// RFC 5322 specials other than `@` and `.`.
const SPECIALS: &str = "()<>[]:;,\\\"";

/// Minimal address check: `local@domain`, no whitespace, no empty domain labels.
///
/// Narrower than a full RFC 5322 address parser on purpose: only a bare
/// address is accepted, and display-name forms such as `Name <a@b.c>` or
/// quoted local parts are rejected.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty()
        || email
            .chars()
            .any(|c| c.is_whitespace() || SPECIALS.contains(c))
    {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.split('.').all(|label| !label.is_empty())
}
