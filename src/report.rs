//! Human-readable rendering of an [`AccountSummary`].
//!
//! Currency rounding happens here and only here; the engine keeps full
//! precision.

use crate::decimal::Amount;
use crate::error::Result;
use crate::summary::AccountSummary;
use log::info;
use std::io::Write;

pub const SUBJECT: &str = "Account Summary";

const CURRENCY_DECIMALS: u32 = 2;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Delivers a finished summary to its recipient.
pub trait Notifier {
    fn notify(&mut self, summary: &AccountSummary) -> Result<()>;
}

/// Writes the rendered summary, with `To:` and `Subject:` lines, to a stream.
pub struct ReportNotifier<W: Write> {
    writer: W,
}

impl<W: Write> ReportNotifier<W> {
    pub fn new(writer: W) -> Self {
        ReportNotifier { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Notifier for ReportNotifier<W> {
    fn notify(&mut self, summary: &AccountSummary) -> Result<()> {
        writeln!(self.writer, "To: {}", summary.email)?;
        writeln!(self.writer, "Subject: {}", SUBJECT)?;
        writeln!(self.writer)?;
        self.writer.write_all(render(summary).as_bytes())?;
        self.writer.flush()?;

        info!("Sent account summary to {}", summary.email);
        Ok(())
    }
}

/// Renders the report body.
///
/// Only months with at least one transaction are listed, in calendar order.
pub fn render(summary: &AccountSummary) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "Total balance: {}\n",
        printable_amount(summary.total_balance)
    ));
    body.push_str(&format!(
        "Average debit amount: {}\n",
        printable_amount(summary.average_debit)
    ));
    body.push_str(&format!(
        "Average credit amount: {}\n",
        printable_amount(summary.average_credit)
    ));

    let months: Vec<_> = summary.transactions_per_month.non_empty().collect();
    if !months.is_empty() {
        body.push('\n');
    }
    for (month, count) in months {
        body.push_str(&format!(
            "Number of transactions in {}: {}\n",
            month_name(month),
            count
        ));
    }

    body
}

/// English name of `month` (1 through 12).
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Formats an amount as `$ 1,234.57`: rounded half-to-even to cents, padded to
/// two decimals, with thousands separators.
pub fn printable_amount(amount: Amount) -> String {
    let rounded = amount.value().round_dp(CURRENCY_DECIMALS);
    let text = format!("{:.2}", rounded);

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    // -0.001 rounds to zero; never print "-0.00".
    let sign = if rounded.is_zero() { "" } else { sign };

    format!("$ {}{}.{}", sign, group_thousands(integer), fraction)
}

fn group_thousands(integer: &str) -> String {
    let mut out = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
