use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "budgetrec";

fn budgetrec(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).unwrap();
    cmd.env("BUDGET_RECONCILER_DATA_DIR", base);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn seed(base: &Path) {
    let data = base.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("categories.json"),
        r#"{"categories": [
            {"id": 1, "name": "Groceries", "type": "expense"},
            {"id": 2, "name": "Dining", "type": "expense"},
            {"id": 3, "name": "Reimbursement [G]", "type": "expense"},
            {"id": 4, "name": "Salary", "type": "income"}
        ]}"#,
    )
    .unwrap();
    fs::write(
        data.join("transactions.json"),
        r#"{"transactions": [
            {"id": 1, "amount": -4000, "date": "2025-01-10", "type": "expense", "category_id": 1},
            {"id": 2, "amount": -6000, "date": "2025-01-22", "type": "expense", "category_id": 1},
            {"id": 3, "amount": -1500, "date": "2025-01-23", "type": "expense"},
            {"id": 4, "amount": 300000, "date": "2025-01-25", "type": "income", "category_id": 4},
            {"id": 5, "amount": -2500, "date": "2025-02-03", "type": "expense", "category_id": 2}
        ]}"#,
    )
    .unwrap();
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    budgetrec(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("autogen").and(contains("summary")));
}

#[test]
fn config_shows_paths() {
    let temp = TempDir::new().unwrap();
    budgetrec(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Audit log").and(contains("Reimbursement")));
}

#[test]
fn autogen_seeds_from_previous_month() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    budgetrec(temp.path())
        .args(["autogen", "-p", "2025-02"])
        .assert()
        .success()
        .stdout(contains("Auto-generate completed: Created 2 new budget(s)\n"));

    budgetrec(temp.path())
        .args(["list", "-p", "2025-02"])
        .assert()
        .success()
        .stdout(contains("Groceries").and(contains("$100.00")))
        .stdout(contains("Dining"))
        .stdout(contains("Reimbursement").not());

    let budgets = fs::read_to_string(temp.path().join("data").join("budgets.json")).unwrap();
    assert!(budgets.contains("\"2025-02\""));
}

#[test]
fn autogen_twice_skips_everything() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    budgetrec(temp.path())
        .args(["autogen", "-p", "2025-02"])
        .assert()
        .success();

    budgetrec(temp.path())
        .args(["autogen", "-p", "2025-02"])
        .assert()
        .success()
        .stdout(contains("Created 0 new budget(s), skipped 2 existing budget(s)"));
}

#[test]
fn add_then_summary_reports_overspend() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    budgetrec(temp.path())
        .args(["add", "1", "80", "-p", "2025-01", "-n", "weekly shop"])
        .assert()
        .success()
        .stdout(contains("Budgeted $80.00 for 'Groceries' in 2025-01"));

    budgetrec(temp.path())
        .args(["summary", "-p", "2025-01"])
        .assert()
        .success()
        .stdout(contains("$80.00").and(contains("$100.00")))
        .stdout(contains("-$20.00"))
        .stdout(contains("125.0%"))
        .stdout(contains("Over budget"));
}

#[test]
fn add_duplicate_category_fails() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    budgetrec(temp.path())
        .args(["add", "2", "50", "-p", "2025-03"])
        .assert()
        .success();

    budgetrec(temp.path())
        .args(["add", "2", "75", "-p", "2025-03"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn edit_and_delete_are_audited() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    budgetrec(temp.path())
        .args(["add", "2", "50", "-p", "2025-03"])
        .assert()
        .success();

    budgetrec(temp.path())
        .args(["edit", "1", "--amount", "65.50"])
        .assert()
        .success()
        .stdout(contains("Updated budget 1 in 2025-03"));

    budgetrec(temp.path())
        .args(["delete", "1"])
        .assert()
        .success();

    budgetrec(temp.path())
        .args(["history"])
        .assert()
        .success()
        .stdout(contains("CREATE").and(contains("UPDATE")).and(contains("DELETE")))
        .stdout(contains("amount: $50.00 -> $65.50"));
}

#[test]
fn invalid_period_is_rejected() {
    let temp = TempDir::new().unwrap();
    budgetrec(temp.path())
        .args(["summary", "-p", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid period format"));
}

#[test]
fn negative_amount_is_rejected() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    budgetrec(temp.path())
        .args(["add", "1", "--", "-5"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}
