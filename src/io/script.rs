//! Script runner: plays a CSV command script against a BankService
//!
//! Provides a streaming iterator over script commands plus the runner that
//! executes them. Delegates format concerns to the command module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors (parse failures, rejected operations) are logged
//!   with line numbers and skipped; the batch always runs to completion
//!
//! The runner keeps a session per script user: `register` rows authenticate
//! immediately and cache the issued token, and later rows for the same user
//! reuse it. Step-up challenges are cached per user until confirmed or
//! cancelled.

use crate::io::command::{convert_csv_command, CsvCommand, ScriptCommand};
use crate::io::report::write_summary_csv;
use crate::service::{BankService, TransferResponse};
use crate::types::{
    AccountId, AccountKind, ChallengeId, LedgerError, NewUserRequest, SessionId, TransferRequest,
};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Streaming reader over script commands
///
/// Yields `Result<ScriptCommand, String>` per CSV row, with line numbers
/// in error messages.
#[derive(Debug)]
pub struct ScriptReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl ScriptReader {
    /// Open a script file for streaming iteration
    ///
    /// The CSV reader trims whitespace and allows flexible field counts
    /// because most columns are operation-specific.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for ScriptReader {
    type Item = Result<ScriptCommand, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvCommand>();

        match deserializer.next()? {
            Ok(row) => {
                self.line_num += 1;
                // Line numbers are 1-based and the header occupies line 1.
                Some(
                    convert_csv_command(row)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

/// Executes script commands against a service and reports the outcome
pub struct ScriptRunner {
    service: BankService,
    sessions: HashMap<String, SessionId>,
    challenges: HashMap<String, ChallengeId>,
}

impl ScriptRunner {
    pub fn new(service: BankService) -> Self {
        ScriptRunner {
            service,
            sessions: HashMap::new(),
            challenges: HashMap::new(),
        }
    }

    /// Play the script at `path` and write the summary CSV to `output`
    ///
    /// Rejected rows are logged and skipped; only file-level failures
    /// (unreadable script, broken output sink) are fatal.
    pub fn run(&mut self, path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = ScriptReader::new(path)?;

        for row in reader {
            let command = match row {
                Ok(command) => command,
                Err(e) => {
                    warn!("Skipping row: {}", e);
                    continue;
                }
            };
            if let Err(e) = self.execute(command) {
                warn!("Skipping row: {}", e);
            }
        }

        write_summary_csv(&self.service.summaries(), output)
    }

    /// Execute a single script command
    pub fn execute(&mut self, command: ScriptCommand) -> Result<(), String> {
        match command {
            ScriptCommand::Register {
                username,
                password,
                name,
                email,
            } => {
                self.service
                    .register(NewUserRequest {
                        username: username.clone(),
                        password: password.clone(),
                        name,
                        email,
                    })
                    .map_err(|e| e.to_string())?;
                let session = self
                    .service
                    .authenticate(&username, &password)
                    .map_err(|e| e.to_string())?;
                self.sessions.insert(username, session);
                Ok(())
            }
            ScriptCommand::Deposit {
                username,
                account,
                amount,
            } => {
                let session = self.session_for(&username)?;
                let account_id = self.account_for(session, &username, account)?;
                self.service
                    .deposit(session, &account_id, amount)
                    .map_err(|e| e.to_string())?;
                Ok(())
            }
            ScriptCommand::Withdraw {
                username,
                account,
                amount,
            } => {
                let session = self.session_for(&username)?;
                let account_id = self.account_for(session, &username, account)?;
                self.service
                    .withdraw(session, &account_id, amount)
                    .map_err(|e| e.to_string())?;
                Ok(())
            }
            ScriptCommand::Transfer {
                username,
                amount,
                destination,
                method,
            } => {
                let session = self.session_for(&username)?;
                let response = self
                    .service
                    .transfer(
                        session,
                        TransferRequest {
                            amount,
                            destination,
                            method,
                        },
                    )
                    .map_err(|e| e.to_string())?;
                if let TransferResponse::ChallengeRequired(challenge) = response {
                    self.challenges.insert(username, challenge);
                }
                Ok(())
            }
            ScriptCommand::Confirm { username, code } => {
                let session = self.session_for(&username)?;
                let challenge = *self
                    .challenges
                    .get(&username)
                    .ok_or_else(|| format!("No outstanding challenge for user '{}'", username))?;
                let result = self.service.confirm_transfer(session, challenge, &code);
                // A wrong code keeps the challenge open for retry; any other
                // outcome consumed it, including a transfer that failed at
                // execution.
                if !matches!(result, Err(LedgerError::CodeMismatch)) {
                    self.challenges.remove(&username);
                }
                result.map(|_| ()).map_err(|e| e.to_string())
            }
            ScriptCommand::Cancel { username } => {
                let session = self.session_for(&username)?;
                self.service
                    .cancel_transfer(session)
                    .map_err(|e| e.to_string())?;
                self.challenges.remove(&username);
                Ok(())
            }
        }
    }

    fn session_for(&self, username: &str) -> Result<SessionId, String> {
        self.sessions
            .get(username)
            .copied()
            .ok_or_else(|| format!("User '{}' has no session (register first)", username))
    }

    /// Resolve a `savings`/`checking` selector to the user's account id
    fn account_for(
        &self,
        session: SessionId,
        username: &str,
        kind: AccountKind,
    ) -> Result<AccountId, String> {
        let profile = self
            .service
            .fetch_profile(session)
            .map_err(|e| e.to_string())?;
        profile
            .accounts
            .iter()
            .find(|account| account.kind == kind)
            .map(|account| account.id.clone())
            .ok_or_else(|| {
                format!(
                    "User '{}' has no {} account",
                    username,
                    kind.label()
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StaticCodeVerifier, DEMO_CONFIRMATION_CODE};
    use crate::types::TransferMethod;
    use rust_decimal::Decimal;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run_script(content: &str) -> String {
        let file = create_temp_csv(content);
        let mut runner = ScriptRunner::new(BankService::new());
        let mut output = Vec::new();
        runner.run(file.path(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_script_reader_new_fails_on_missing_file() {
        let result = ScriptReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_script_reader_includes_line_numbers_in_errors() {
        let content = "op,user,password,name,email,account,amount,destination,method,code\n\
            register,alice,pw,Alice,a@example.com,,,,,\n\
            deposit,alice,,,,savings,not_a_number,,,\n";
        let file = create_temp_csv(content);

        let rows: Vec<_> = ScriptReader::new(file.path()).unwrap().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        let error = rows[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3")); // Line 3 because of header
        assert!(error.contains("Invalid amount"));
    }

    #[test]
    fn test_runner_register_deposit_withdraw() {
        let output = run_script(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,500,,,\n\
             withdraw,alice,,,,savings,125.50,,,\n",
        );

        assert_eq!(
            output,
            "user,account,balance,transactions\n\
             alice,savings,374.50,2\n\
             alice,checking,0.00,2\n"
        );
    }

    #[test]
    fn test_runner_skips_rejected_rows_and_continues() {
        // The oversized withdrawal is refused; later rows still apply.
        let output = run_script(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,100,,,\n\
             withdraw,alice,,,,savings,9999,,,\n\
             deposit,alice,,,,checking,50,,,\n",
        );

        assert_eq!(
            output,
            "user,account,balance,transactions\n\
             alice,savings,100.00,2\n\
             alice,checking,50.00,2\n"
        );
    }

    #[test]
    fn test_runner_step_up_transfer_flow() {
        let output = run_script(&format!(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,2000,,,\n\
             transfer,alice,,,,,1500,dest-1,bank-transfer,\n\
             confirm,alice,,,,,,,,{DEMO_CONFIRMATION_CODE}\n"
        ));

        assert_eq!(
            output,
            "user,account,balance,transactions\n\
             alice,savings,500.00,3\n\
             alice,checking,0.00,3\n"
        );
    }

    #[test]
    fn test_runner_small_transfer_needs_no_confirm() {
        let output = run_script(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,2000,,,\n\
             transfer,alice,,,,,1000,carol,apple-pay,\n",
        );

        assert_eq!(
            output,
            "user,account,balance,transactions\n\
             alice,savings,1000.00,2\n\
             alice,checking,0.00,2\n"
        );
    }

    #[test]
    fn test_runner_cancel_discards_challenge() {
        let output = run_script(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,2000,,,\n\
             transfer,alice,,,,,1500,dest-1,bank-transfer,\n\
             cancel,alice,,,,,,,,\n",
        );

        assert_eq!(
            output,
            "user,account,balance,transactions\n\
             alice,savings,2000.00,1\n\
             alice,checking,0.00,1\n"
        );
    }

    #[test]
    fn test_runner_commands_without_registration_are_skipped() {
        let output = run_script(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             deposit,ghost,,,,savings,100,,,\n",
        );

        assert_eq!(output, "user,account,balance,transactions\n");
    }

    #[test]
    fn test_runner_custom_policy() {
        // With a 10000 threshold the 1500 transfer completes directly.
        let file = create_temp_csv(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,2000,,,\n\
             transfer,alice,,,,,1500,dest-1,bank-transfer,\n",
        );
        let service = BankService::with_policy(
            Decimal::new(10000, 0),
            Box::new(StaticCodeVerifier::new("000000")),
        );
        let mut runner = ScriptRunner::new(service);
        let mut output = Vec::new();
        runner.run(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "user,account,balance,transactions\n\
             alice,savings,500.00,2\n\
             alice,checking,0.00,2\n"
        );
    }

    #[test]
    fn test_execute_wrong_code_keeps_challenge_open() {
        let file = create_temp_csv(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,2000,,,\n\
             transfer,alice,,,,,1500,dest-1,bank-transfer,\n",
        );
        let mut runner = ScriptRunner::new(BankService::new());
        let mut output = Vec::new();
        runner.run(file.path(), &mut output).unwrap();

        let wrong = runner.execute(ScriptCommand::Confirm {
            username: "alice".to_string(),
            code: "000000".to_string(),
        });
        assert!(wrong.is_err());

        // The retry with the right code executes the captured transfer.
        runner
            .execute(ScriptCommand::Confirm {
                username: "alice".to_string(),
                code: DEMO_CONFIRMATION_CODE.to_string(),
            })
            .unwrap();

        let mut summary = Vec::new();
        write_summary_csv(&runner.service.summaries(), &mut summary).unwrap();
        assert!(String::from_utf8(summary)
            .unwrap()
            .contains("alice,savings,500.00,3"));
    }

    #[test]
    fn test_confirm_that_fails_at_execution_clears_cached_token() {
        // The challenge is issued before funds are checked, so confirming
        // with the right code can still fail at execution.
        let file = create_temp_csv(
            "op,user,password,name,email,account,amount,destination,method,code\n\
             register,alice,pw,Alice,a@example.com,,,,,\n\
             deposit,alice,,,,savings,100,,,\n\
             transfer,alice,,,,,1500,dest-1,bank-transfer,\n",
        );
        let mut runner = ScriptRunner::new(BankService::new());
        let mut output = Vec::new();
        runner.run(file.path(), &mut output).unwrap();

        let result = runner.execute(ScriptCommand::Confirm {
            username: "alice".to_string(),
            code: DEMO_CONFIRMATION_CODE.to_string(),
        });
        assert!(result.unwrap_err().contains("Insufficient funds"));

        // The gate consumed the challenge, so the cached token goes too and
        // a fresh transfer can challenge again.
        assert!(!runner.challenges.contains_key("alice"));
        runner
            .execute(ScriptCommand::Deposit {
                username: "alice".to_string(),
                account: AccountKind::Savings,
                amount: Decimal::new(2000, 0),
            })
            .unwrap();
        runner
            .execute(ScriptCommand::Transfer {
                username: "alice".to_string(),
                amount: Decimal::new(1500, 0),
                destination: "dest-1".to_string(),
                method: TransferMethod::BankTransfer,
            })
            .unwrap();
        assert!(runner.challenges.contains_key("alice"));
        runner
            .execute(ScriptCommand::Confirm {
                username: "alice".to_string(),
                code: DEMO_CONFIRMATION_CODE.to_string(),
            })
            .unwrap();

        let mut summary = Vec::new();
        write_summary_csv(&runner.service.summaries(), &mut summary).unwrap();
        assert!(String::from_utf8(summary)
            .unwrap()
            .contains("alice,savings,600.00,3"));
    }

    #[test]
    fn test_execute_transfer_caches_challenge_token() {
        let mut runner = ScriptRunner::new(BankService::new());
        runner
            .execute(ScriptCommand::Register {
                username: "alice".to_string(),
                password: "pw".to_string(),
                name: "Alice".to_string(),
                email: "a@example.com".to_string(),
            })
            .unwrap();
        runner
            .execute(ScriptCommand::Deposit {
                username: "alice".to_string(),
                account: AccountKind::Savings,
                amount: Decimal::new(2000, 0),
            })
            .unwrap();
        runner
            .execute(ScriptCommand::Transfer {
                username: "alice".to_string(),
                amount: Decimal::new(1500, 0),
                destination: "dest-1".to_string(),
                method: TransferMethod::BankTransfer,
            })
            .unwrap();

        assert!(runner.challenges.contains_key("alice"));
    }
}
