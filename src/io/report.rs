//! Balance report output
//!
//! The final state of a script run is reported as CSV: one row per user in
//! ascending id order, then a platform row for the accumulated fees. Row
//! order is deterministic so reports can be compared byte for byte.

use crate::store::EntityStore;
use crate::types::LedgerError;
use std::io::Write;

/// Write the user-balance report as CSV
///
/// Columns are `user,role,balance,banned`. Users appear sorted by id; the
/// final row is the platform balance with `platform` in the user column.
pub fn write_balance_report(
    store: &EntityStore,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["user", "role", "balance", "banned"])?;

    for user in store.users.get() {
        writer.write_record(&[
            user.id.to_string(),
            format!("{:?}", user.role),
            user.balance.to_string(),
            user.is_banned.to_string(),
        ])?;
    }

    writer.write_record(&[
        "platform".to_string(),
        String::new(),
        store.platform_balance().to_string(),
        String::new(),
    ])?;

    writer.flush()?;
    Ok(())
}
