//! Operation-script parsing
//!
//! Scripts are CSV files with one engine operation per row. Columns beyond
//! `op` are optional; each operation names the ones it requires. Parsing is
//! streaming: rows are read and converted one at a time, and a bad row is
//! reported without aborting the iteration.

use crate::types::{
    Decision, LedgerError, ProductCategory, ReportDecision, ReportReason, Role,
};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Raw script row as deserialized from CSV
///
/// Every column except `op` is optional; `convert_record` checks presence
/// per operation.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OpRecord {
    pub op: String,
    pub actor: Option<u64>,
    pub target: Option<u64>,
    pub amount: Option<String>,
    pub rating: Option<u8>,
    pub decision: Option<String>,
    pub role: Option<String>,
    pub reason: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
}

/// A fully parsed engine operation
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreateUser {
        role: Role,
        balance: Decimal,
    },
    CreateProduct {
        seller: u64,
        title: String,
        price: Decimal,
        link: String,
    },
    Purchase {
        buyer: u64,
        product: u64,
    },
    SubmitRating {
        purchase: u64,
        rating: u8,
    },
    RequestWithdrawal {
        seller: u64,
        amount: Decimal,
    },
    ResolveWithdrawal {
        withdrawal: u64,
        decision: Decision,
    },
    RequestVerification {
        seller: u64,
    },
    ResolveVerification {
        request: u64,
        decision: Decision,
    },
    CreateReport {
        reporter: u64,
        product: u64,
        reason: ReportReason,
        description: String,
    },
    ResolveReport {
        report: u64,
        decision: ReportDecision,
    },
}

/// Convert a raw script row to an operation
///
/// Checks that the columns the operation requires are present and parse,
/// reporting `MissingField`, `Parse`, or `InvalidOperation` otherwise.
/// Operation names are case-insensitive.
pub fn convert_record(record: OpRecord) -> Result<Operation, LedgerError> {
    let op = record.op.to_lowercase();

    let actor = |field: &str| {
        record
            .actor
            .ok_or_else(|| LedgerError::missing_field(field, "actor"))
    };
    let target = |field: &str| {
        record
            .target
            .ok_or_else(|| LedgerError::missing_field(field, "target"))
    };
    let amount = |field: &str| -> Result<Decimal, LedgerError> {
        let raw = record
            .amount
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LedgerError::missing_field(field, "amount"))?;
        Decimal::from_str(raw).map_err(|_| LedgerError::Parse {
            line: None,
            message: format!("invalid amount '{}'", raw),
        })
    };
    let decision = |field: &str| -> Result<Decision, LedgerError> {
        match record.decision.as_deref().map(str::to_lowercase).as_deref() {
            Some("approve") => Ok(Decision::Approve),
            Some("reject") => Ok(Decision::Reject),
            Some(other) => Err(LedgerError::Parse {
                line: None,
                message: format!("invalid decision '{}'", other),
            }),
            None => Err(LedgerError::missing_field(field, "decision")),
        }
    };

    match op.as_str() {
        "create_user" => {
            let role = match record.role.as_deref().map(str::to_lowercase).as_deref() {
                Some("buyer") => Role::Buyer,
                Some("seller") => Role::Seller,
                Some("admin") => Role::Admin,
                Some(other) => {
                    return Err(LedgerError::Parse {
                        line: None,
                        message: format!("invalid role '{}'", other),
                    })
                }
                None => return Err(LedgerError::missing_field("create_user", "role")),
            };
            let balance = match record.amount.as_deref().filter(|s| !s.is_empty()) {
                Some(raw) => Decimal::from_str(raw).map_err(|_| LedgerError::Parse {
                    line: None,
                    message: format!("invalid amount '{}'", raw),
                })?,
                None => Decimal::ZERO,
            };
            Ok(Operation::CreateUser { role, balance })
        }
        "create_product" => Ok(Operation::CreateProduct {
            seller: actor("create_product")?,
            title: record
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| LedgerError::missing_field("create_product", "title"))?,
            price: amount("create_product")?,
            link: record.link.clone().unwrap_or_default(),
        }),
        "purchase" => Ok(Operation::Purchase {
            buyer: actor("purchase")?,
            product: target("purchase")?,
        }),
        "rate" => Ok(Operation::SubmitRating {
            purchase: target("rate")?,
            rating: record
                .rating
                .ok_or_else(|| LedgerError::missing_field("rate", "rating"))?,
        }),
        "request_withdrawal" => Ok(Operation::RequestWithdrawal {
            seller: actor("request_withdrawal")?,
            amount: amount("request_withdrawal")?,
        }),
        "resolve_withdrawal" => Ok(Operation::ResolveWithdrawal {
            withdrawal: target("resolve_withdrawal")?,
            decision: decision("resolve_withdrawal")?,
        }),
        "request_verification" => Ok(Operation::RequestVerification {
            seller: actor("request_verification")?,
        }),
        "resolve_verification" => Ok(Operation::ResolveVerification {
            request: target("resolve_verification")?,
            decision: decision("resolve_verification")?,
        }),
        "report" => {
            let reason = match record.reason.as_deref().map(str::to_lowercase).as_deref() {
                Some("scam") => ReportReason::Scam,
                Some("spam") => ReportReason::Spam,
                Some("inappropriate") => ReportReason::Inappropriate,
                Some("fake") => ReportReason::Fake,
                Some("other") | None => ReportReason::Other,
                Some(other) => {
                    return Err(LedgerError::Parse {
                        line: None,
                        message: format!("invalid report reason '{}'", other),
                    })
                }
            };
            Ok(Operation::CreateReport {
                reporter: actor("report")?,
                product: target("report")?,
                reason,
                description: record.description.clone().unwrap_or_default(),
            })
        }
        "resolve_report" => {
            let decision = match record.decision.as_deref().map(str::to_lowercase).as_deref() {
                Some("reject") => ReportDecision::Reject,
                Some("confirm_ban") => ReportDecision::ConfirmBan,
                Some(other) => {
                    return Err(LedgerError::Parse {
                        line: None,
                        message: format!("invalid report decision '{}'", other),
                    })
                }
                None => return Err(LedgerError::missing_field("resolve_report", "decision")),
            };
            Ok(Operation::ResolveReport {
                report: target("resolve_report")?,
                decision,
            })
        }
        _ => Err(LedgerError::InvalidOperation { op: record.op }),
    }
}

/// Default category for script-created products
///
/// The script format carries no category column; listings created from a
/// script land in the catch-all bucket.
pub const SCRIPT_CATEGORY: ProductCategory = ProductCategory::Other;

/// Streaming reader over an operation script
///
/// Yields one parsed `Operation` per row. Malformed rows are yielded as
/// errors carrying the line number, and iteration continues past them.
#[derive(Debug)]
pub struct ScriptReader {
    reader: csv::Reader<File>,
    line: u64,
}

impl ScriptReader {
    /// Open a script file for streaming iteration
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path)?;
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        // File lines count the header row, matching csv error positions
        Ok(ScriptReader { reader, line: 2 })
    }

    fn stamp(&self, error: LedgerError) -> LedgerError {
        // Conversion errors carry no position; attach the current file line
        match error {
            LedgerError::Parse { line: None, message } => LedgerError::Parse {
                line: Some(self.line),
                message,
            },
            other => other,
        }
    }
}

impl Iterator for ScriptReader {
    type Item = Result<Operation, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = self.reader.deserialize::<OpRecord>();

        let item = match rows.next()? {
            Ok(record) => convert_record(record).map_err(|e| self.stamp(e)),
            Err(e) => Err(LedgerError::from(e)),
        };
        self.line += 1;
        Some(item)
    }
}
