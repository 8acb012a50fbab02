//! End-to-end CLI tests for chatstat.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the output.
//!
//! # Test Categories
//!
//! - **Basic functionality**: the text report on stdout
//! - **Output formats**: Text, JSON, CSV, to stdout and to files
//! - **Flags**: date order, filters, rule toggles, config file
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const REFERENCE: &str = "1/2/23, 10:00 AM - Alice: Hello
1/2/23, 10:05 AM - Bob: Hi there
1/2/23, 10:06 AM - Messages and calls are end-to-end encrypted.
1/2/23, 10:07 AM - Alice: How are you?";

/// Creates a temporary directory with transcript fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("chat.txt"), REFERENCE).unwrap();

    let group = "Messages and calls are end-to-end encrypted. No one outside of this chat can read them.
3/3/24, 09:00 - Alice created group \"Trip\"
3/3/24, 09:01 - Alice added Bob
3/3/24, 09:02 - Alice: Welcome!
Looking forward to it
3/3/24, 09:05 - Bob: <Media omitted>
4/3/24, 18:30 - Carol: Meeting at 3:00
5/3/24, 07:15 - Bob: ok
5/3/24, 07:16 - Bob left";
    fs::write(dir.path().join("group.txt"), group).unwrap();

    fs::write(dir.path().join("empty.txt"), "").unwrap();
    fs::write(dir.path().join("no_entries.txt"), "just\nsome\nnotes").unwrap();
    fs::write(dir.path().join("latin1.txt"), [0x31u8, 0x2f, 0xe9, 0xff]).unwrap();

    dir
}

fn chatstat_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatstat"));
    Command::from_std(cmd)
}

fn fixture(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_reference_report() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .arg(fixture(&fixtures, "chat.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Messages: 3"))
            .stdout(predicate::str::contains("Alice: 2"))
            .stdout(predicate::str::contains("Bob: 1"))
            .stdout(predicate::str::contains("Most Texted: Alice (2)"))
            .stdout(predicate::str::contains("Least Texted: Bob (1)"))
            .stdout(predicate::str::contains("Start Date: 1/2/23"))
            .stdout(predicate::str::contains("Last Date: 1/2/23"));
    }

    #[test]
    fn test_group_chat_report() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .arg(fixture(&fixtures, "group.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Messages: 4"))
            .stdout(predicate::str::contains("Bob: 2"))
            .stdout(predicate::str::contains("Most Texted: Bob (2)"))
            .stdout(predicate::str::contains("Least Texted: Alice (1)"))
            .stdout(predicate::str::contains("Start Date: 3/3/24"))
            .stdout(predicate::str::contains("Last Date: 5/3/24"));
    }

    #[test]
    fn test_stdout_holds_only_the_report() {
        let fixtures = setup_fixtures();

        let output = chatstat_cmd()
            .arg(fixture(&fixtures, "chat.txt"))
            .output()
            .unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(stdout.lines().count(), 7);
        assert!(stdout.starts_with("Total Messages: 3"));
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_json_to_stdout() {
        let fixtures = setup_fixtures();

        let output = chatstat_cmd()
            .args([fixture(&fixtures, "chat.txt").as_str(), "-f", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["total_messages"], 3);
        assert_eq!(json["message_count"]["Alice"], 2);
        assert_eq!(json["most_texted"]["sender"], "Alice");
        assert_eq!(json["least_texted"]["count"], 1);
        assert_eq!(json["start_date"], "2023-02-01");
        assert_eq!(json["system_notices"], 1);
    }

    #[test]
    fn test_csv_to_stdout() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([fixture(&fixtures, "chat.txt").as_str(), "--format", "csv"])
            .assert()
            .success()
            .stdout(predicate::eq("Sender;Messages\nAlice;2\nBob;1\n"));
    }

    #[test]
    fn test_output_file() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "report.txt");

        chatstat_cmd()
            .args([
                fixture(&fixtures, "chat.txt").as_str(),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("report saved"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("Total Messages: 3"));
    }

    #[test]
    fn test_format_follows_output_extension() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "report.csv");

        chatstat_cmd()
            .args([
                fixture(&fixtures, "chat.txt").as_str(),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&output)
            .unwrap();
        let rows: Vec<(String, usize)> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(rows, [("Alice".to_string(), 2), ("Bob".to_string(), 1)]);
    }

    #[test]
    fn test_custom_date_format() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([
                fixture(&fixtures, "chat.txt").as_str(),
                "--date-format",
                "%Y-%m-%d",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Start Date: 2023-02-01"));
    }
}

// ============================================================================
// Flag Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_month_first() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([
                fixture(&fixtures, "chat.txt").as_str(),
                "--date-order",
                "month-first",
                "--date-format",
                "%Y-%m-%d",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Start Date: 2023-01-02"));
    }

    #[test]
    fn test_skip_media() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([fixture(&fixtures, "group.txt").as_str(), "--skip-media"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Messages: 3"))
            .stdout(predicate::str::contains("Bob: 1"));
    }

    #[test]
    fn test_disable_rule() {
        let fixtures = setup_fixtures();

        // "Bob left" becomes a message from the degenerate sender "Bob left"
        chatstat_cmd()
            .args([
                fixture(&fixtures, "group.txt").as_str(),
                "--disable-rule",
                "left-or-added",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Bob left: 1"));
    }

    #[test]
    fn test_unknown_rule_name_warns() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .env_remove("RUST_LOG")
            .args([fixture(&fixtures, "chat.txt").as_str(), "--disable-rule", "left-or-add"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Messages: 3"))
            .stderr(predicate::str::contains("left-or-add"));
    }

    #[test]
    fn test_date_window() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([
                fixture(&fixtures, "group.txt").as_str(),
                "--after",
                "2024-03-04",
                "--before",
                "2024-03-04",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Messages: 1"))
            .stdout(predicate::str::contains("Carol: 1"))
            .stdout(predicate::str::contains("Start Date: 4/3/24"));
    }

    #[test]
    fn test_config_file() {
        let fixtures = setup_fixtures();
        let config = output_path(&fixtures, "chatstat.json");
        fs::write(
            &config,
            r#"{ "skip_media_omitted": true, "extra_rules": [{ "name": "welcome", "pattern": "welcome" }] }"#,
        )
        .unwrap();

        chatstat_cmd()
            .args([
                fixture(&fixtures, "group.txt").as_str(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Messages: 2"))
            .stdout(predicate::str::contains("Alice").not());
    }

    #[test]
    fn test_list_rules() {
        chatstat_cmd()
            .arg("--list-rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("encryption"))
            .stdout(predicate::str::contains("left-or-added"))
            .stdout(predicate::str::contains("media-omitted").not());
    }

    #[test]
    fn test_list_rules_reflects_flags() {
        chatstat_cmd()
            .args(["--list-rules", "--skip-media", "--disable-rule", "blocked"])
            .assert()
            .success()
            .stdout(predicate::str::contains("media-omitted"))
            .stdout(predicate::str::contains("blocked").not());
    }

    #[test]
    fn test_verbose_logs_to_stderr() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([fixture(&fixtures, "chat.txt").as_str(), "-v"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Messages: 3"))
            .stderr(predicate::str::contains("aggregated transcript"));
    }

    #[test]
    fn test_help_and_version() {
        chatstat_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--date-order"))
            .stdout(predicate::str::contains("EXAMPLES"));

        chatstat_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_file() {
        chatstat_cmd()
            .arg("/definitely/not/here.txt")
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Cannot read chat export"));
    }

    #[test]
    fn test_empty_file() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .arg(fixture(&fixtures, "empty.txt"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("No chat entries found"));
    }

    #[test]
    fn test_file_without_entries() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .arg(fixture(&fixtures, "no_entries.txt"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("3 line(s)"));
    }

    #[test]
    fn test_not_utf8() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .arg(fixture(&fixtures, "latin1.txt"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("UTF-8"));
    }

    #[test]
    fn test_bad_filter_date() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([fixture(&fixtures, "chat.txt").as_str(), "--after", "2024/01/01"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_bad_date_format() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([fixture(&fixtures, "chat.txt").as_str(), "--date-format", "%Q"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("strftime"));
    }

    #[test]
    fn test_date_format_with_time_fields() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([fixture(&fixtures, "chat.txt").as_str(), "--date-format", "%H:%M"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("strftime"))
            .stderr(predicate::str::contains("panicked").not());
    }

    #[test]
    fn test_missing_input_argument() {
        chatstat_cmd().assert().failure();
    }

    #[test]
    fn test_unknown_format() {
        let fixtures = setup_fixtures();

        chatstat_cmd()
            .args([fixture(&fixtures, "chat.txt").as_str(), "-f", "xml"])
            .assert()
            .failure();
    }
}
