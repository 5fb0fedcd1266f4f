//! Summary CSV output
//!
//! Writes the end-of-script ledger summary: one row per account with
//! columns `user,account,balance,transactions`. Pure over a `Write` sink
//! for easy testing.

use crate::types::UserProfile;
use std::io::Write;

/// Write user summaries to CSV format
///
/// One row per account, with the owner's full movement count repeated on
/// each of their rows. Callers pass profiles pre-sorted by username;
/// accounts keep their registration order (savings first) so the output
/// is deterministic.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_summary_csv(profiles: &[UserProfile], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["user", "account", "balance", "transactions"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for profile in profiles {
        for account in &profile.accounts {
            writer
                .write_record(&[
                    profile.username.clone(),
                    account.kind.label().to_string(),
                    format!("{:.2}", account.balance),
                    profile.transactions.len().to_string(),
                ])
                .map_err(|e| format!("Failed to write summary record: {}", e))?;
        }
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
