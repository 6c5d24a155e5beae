//! Marketplace Ledger CLI
//!
//! Command-line interface for applying marketplace operation scripts to a
//! persistent ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > balances.csv
//! cargo run -- --data-dir ./ledger-data operations.csv > balances.csv
//! cargo run -- --seed-demo operations.csv > balances.csv
//! ```
//!
//! The program loads any snapshot from `--data-dir`, applies the script's
//! operations through the ledger engine, writes the final balance report to
//! stdout, and saves a fresh snapshot back to `--data-dir`.
//!
//! Recoverable errors (a bad script row, a rejected operation) are logged
//! to stderr and processing continues; set `RUST_LOG=warn` to see them.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (script unreadable, snapshot I/O failure, etc.)

use marketplace_ledger::cli::{self, CliArgs};
use marketplace_ledger::core::LedgerEngine;
use marketplace_ledger::io;
use marketplace_ledger::session::SessionStore;
use marketplace_ledger::store::repository::{snapshot_exists, CsvRepository, Repository};
use marketplace_ledger::store::EntityStore;
use marketplace_ledger::types::LedgerError;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; stdout is reserved for the balance report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), LedgerError> {
    let store = Arc::new(EntityStore::new());
    let session = SessionStore::new();
    let engine = LedgerEngine::new(Arc::clone(&store));

    if let Some(dir) = &args.data_dir {
        if snapshot_exists(dir) {
            let repository = CsvRepository::new(dir);
            repository.load(&store, &session)?;
            engine.reseed_ids();
        }
    }

    if args.seed_demo {
        engine.seed_demo_data()?;
    }

    io::run_script(&engine, &args.script)?;

    let mut stdout = std::io::stdout();
    io::write_balance_report(&store, &mut stdout)?;

    if let Some(dir) = &args.data_dir {
        let repository = CsvRepository::new(dir);
        repository.save(&store, &session)?;
    }

    Ok(())
}
