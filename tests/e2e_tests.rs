//! End-to-end integration tests
//!
//! These tests validate the complete script pipeline using predefined CSV
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Plays all commands through a fresh BankService
//! 3. Generates the summary CSV
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Step-up transfer confirmation flows
//! - Error conditions (insufficient funds, conflicting challenges, etc.)
//! - Malformed script rows

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_banking_ledger::io::ScriptRunner;
    use rust_banking_ledger::BankService;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a fixture by playing input.csv and comparing with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let mut runner = ScriptRunner::new(BankService::new());
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        runner
            .run(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to play script: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures
    #[rstest]
    #[case("happy_path")]
    #[case("insufficient_funds")]
    #[case("stepup_transfer")]
    #[case("wrong_code_then_cancel")]
    #[case("challenge_conflict")]
    #[case("multiple_users")]
    #[case("malformed_rows")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }
}
