use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budget_planner_cli").expect("binary exists");
    cmd.env("BUDGET_PLANNER_CLI_SCRIPT", "1")
        .env("BUDGET_PLANNER_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

fn stored_entries(home: &TempDir) -> usize {
    let raw = fs::read_to_string(home.path().join("data").join("bp_v3_data.json"))
        .expect("ledger file written");
    let value: Value = serde_json::from_str(&raw).expect("ledger file is json");
    value["entries"].as_array().map_or(0, Vec::len)
}

#[test]
fn script_records_and_reports_entries() {
    let home = TempDir::new().unwrap();
    let export = home.path().join("backup.json");
    let script = format!(
        "# seed March\n\
         add 2024-03-01 Food 12.50 lunch\n\
         add 2024-03-15 Bills 60 electric bill\n\
         \n\
         list\n\
         summary\n\
         export {}\n\
         wipe\n",
        export.display()
    );

    cli(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added $12.50 to Food on 2024-03-01"))
        .stdout(predicate::str::contains("electric bill"))
        .stdout(predicate::str::contains("2 entries, $72.50 total."))
        .stdout(predicate::str::contains("Summary for March 2024"))
        .stdout(predicate::str::contains("$72.50"))
        .stdout(predicate::str::contains("Confirmation required"));

    assert_eq!(stored_entries(&home), 2);
    let exported: Value = serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(exported["schemaVersion"], 3);
    assert_eq!(exported["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn confirmed_wipe_clears_and_persists() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("add 2024-03-01 Food 5 snack\nwipe --yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All data deleted."));
    assert_eq!(stored_entries(&home), 0);

    cli(&home)
        .write_stdin("month 2024 3\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries match."));
}

#[test]
fn invalid_input_is_reported_and_the_script_continues() {
    let home = TempDir::new().unwrap();
    let script = [
        "add 2024-13-01 Food 5",
        "add 2024-03-01 Groceries 5",
        "frobnicate",
        "add 2024-03-03 Food 1,5",
        "add 2024-03-02 Food 7",
    ]
    .join("\n");
    cli(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a valid date, bucket, and amount."))
        .stdout(predicate::str::contains("Added $7.00 to Food on 2024-03-02"));
    assert_eq!(stored_entries(&home), 1);
}

#[test]
fn legacy_file_is_migrated_on_startup() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("bp_v1_data.json"),
        r#"{"transactions":[{"id":"t1","date":"2024-03-04","category":"Grocery run","amount":20}]}"#,
    )
    .unwrap();

    cli(&home)
        .write_stdin("month 2024 3\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Grocery run"));
    assert_eq!(stored_entries(&home), 1);
    assert!(data.join("bp_v1_data.json").exists());
}
