//! Script processing and report output
//!
//! The binary drives the engine from operation scripts: CSV rows are parsed
//! into `Operation`s, applied one at a time, and the final balances are
//! written back out as CSV. Fatal errors (unreadable script) abort; a bad
//! row or a rejected operation is logged and processing continues.

pub mod report;
pub mod script;

pub use report::write_balance_report;
pub use script::{Operation, OpRecord, ScriptReader};

use crate::core::LedgerEngine;
use crate::types::LedgerError;
use std::path::Path;
use tracing::warn;

/// Apply one parsed operation through the engine
pub fn apply(engine: &LedgerEngine, operation: Operation) -> Result<(), LedgerError> {
    match operation {
        Operation::CreateUser { role, balance } => {
            engine.create_user(role, balance)?;
        }
        Operation::CreateProduct {
            seller,
            title,
            price,
            link,
        } => {
            engine.create_product(
                seller,
                crate::types::NewProduct {
                    title,
                    description: String::new(),
                    price,
                    category: script::SCRIPT_CATEGORY,
                    hidden_link: link,
                },
            )?;
        }
        Operation::Purchase { buyer, product } => {
            engine.purchase(buyer, product)?;
        }
        Operation::SubmitRating { purchase, rating } => {
            engine.submit_rating(purchase, rating)?;
        }
        Operation::RequestWithdrawal { seller, amount } => {
            engine.request_withdrawal(seller, amount)?;
        }
        Operation::ResolveWithdrawal {
            withdrawal,
            decision,
        } => {
            engine.resolve_withdrawal(withdrawal, decision)?;
        }
        Operation::RequestVerification { seller } => {
            engine.request_verification(seller)?;
        }
        Operation::ResolveVerification { request, decision } => {
            engine.resolve_verification(request, decision)?;
        }
        Operation::CreateReport {
            reporter,
            product,
            reason,
            description,
        } => {
            engine.create_report(reporter, product, reason, description)?;
        }
        Operation::ResolveReport { report, decision } => {
            engine.resolve_report(report, decision)?;
        }
    }
    Ok(())
}

/// Run every operation in a script file through the engine
///
/// Row-level failures (parse errors, rejected operations) are logged and
/// skipped; the rest of the script still runs. Only failing to open the
/// script is fatal.
pub fn run_script(engine: &LedgerEngine, path: &Path) -> Result<(), LedgerError> {
    let reader = ScriptReader::new(path)?;

    for (row, result) in reader.enumerate() {
        match result {
            Ok(operation) => {
                if let Err(e) = apply(engine, operation) {
                    warn!(row = row + 1, error = %e, "operation rejected");
                }
            }
            Err(e) => {
                warn!(row = row + 1, error = %e, "script row unparseable");
            }
        }
    }
    Ok(())
}
