//! Account Summary CLI
//!
//! Reads a CSV ledger, prints the account summary report to stdout and,
//! when an output directory is given, appends the execution to CSV files there.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --email user@example.com --filepath transactions.csv --output-dir out/
//! ```
//!
//! # Environment Variables
//!
//! - `SUMMARY_EMAIL`, `SUMMARY_FILEPATH`, `SUMMARY_OUTPUT_DIR`, `SUMMARY_YEAR`:
//!   fallbacks for the corresponding flags
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use account_summary::{
    App, Config, CsvFileSource, CsvSummaryStore, ReportNotifier, Result, SummaryStore,
};
use chrono::Datelike;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "account-summary", version, about)]
struct Args {
    /// Address the summary is sent to.
    #[arg(long, env = "SUMMARY_EMAIL")]
    email: String,
    /// CSV ledger with an `Id,Date,Transaction` header.
    #[arg(long, env = "SUMMARY_FILEPATH")]
    filepath: String,
    /// Directory for account_summary.csv and transactions.csv. Persistence is
    /// disabled when absent.
    #[arg(long, env = "SUMMARY_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
    /// Year for dates written as month/day. Defaults to the current year.
    #[arg(long, env = "SUMMARY_YEAR")]
    year: Option<i32>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());

    let mut app = App::new(Config {
        source: Box::new(CsvFileSource::new(&args.filepath, year)),
        store: args
            .output_dir
            .map(|dir| Box::new(CsvSummaryStore::new(dir)) as Box<dyn SummaryStore>),
        notifier: Box::new(ReportNotifier::new(io::stdout())),
        email: args.email,
        file_path: args.filepath,
    });

    app.run()?;
    Ok(())
}
