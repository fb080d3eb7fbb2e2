//! End-to-end runs of the CLI binary in script mode.
//!
//! Fresh data directories always seed the ten default categories, so the
//! first account created in a session takes id 11.

mod common;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

use common::{cli, data_dir};

#[test]
fn script_mode_runs_basic_flow() {
    let dir = data_dir();
    let script = "\
account add Everyday checking \"Acme Bank\" 1000
transaction add 11 expense 150 Dinner out --category Food --date 2025-09-03
account list
exit
";
    cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Created account #11 `Everyday`")
                .and(contains("Recorded transaction #12"))
                .and(contains("850.00 USD")),
        );
}

#[test]
fn deleting_a_transaction_restores_the_balance() {
    let dir = data_dir();
    let script = "\
account add Everyday checking Acme 1000
transaction add 11 expense 150 Dinner --date 2025-09-03
transaction remove 12
account list
exit
";
    cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Deleted transaction #12").and(contains("1000.00 USD")));
}

#[test]
fn data_survives_a_restart() {
    let dir = data_dir();
    cli(&dir)
        .write_stdin("account add Savings savings Acme 900\ntransaction add 11 expense 40 Fees --date 2025-09-05\nexit\n")
        .assert()
        .success();

    cli(&dir)
        .write_stdin("account list\ntransaction list\nexit\n")
        .assert()
        .success()
        .stdout(contains("860.00 USD").and(contains("Fees")));
}

#[test]
fn budget_progress_feeds_the_alerts_sweep() {
    let dir = data_dir();
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d");
    let script = format!(
        "\
account add Everyday checking Acme 2000
category budget Food 600
transaction add 11 expense 500 Groceries --category Food --date {today}
category list
alerts
exit
"
    );
    cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("(83.3%").and(contains("Food")));
}

#[test]
fn csv_round_trips_through_export_and_import() {
    let dir = data_dir();
    let csv_path = dir.join("out.csv");
    let script = format!(
        "\
account add Everyday checking Acme 1000
transaction add 11 income 2500 Salary --category Salary --date 2025-09-01
export csv {}
exit
",
        csv_path.display()
    );
    cli(&dir).write_stdin(script).assert().success();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Date,Type,Description,Category,Account,Amount"));
    assert!(csv.contains("2025-09-01,income,Salary,Salary,Everyday,2500"));

    cli(&dir)
        .write_stdin(format!("import {}\nexit\n", csv_path.display()))
        .assert()
        .success()
        .stdout(contains("Imported 1 transaction(s)"));
}

#[test]
fn ical_export_covers_bills_and_goals() {
    let dir = data_dir();
    let ics_path = dir.join("events.ics");
    let script = format!(
        "\
account add Everyday checking Acme 500
bill add Rent 1200 2025-09-28
goal add Vacation 3000 0 2025-12-31
export ical {}
exit
",
        ics_path.display()
    );
    cli(&dir).write_stdin(script).assert().success();

    let ics = std::fs::read_to_string(&ics_path).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert!(ics.contains("Rent"));
    assert!(ics.contains("Vacation"));
}

#[test]
fn reset_wipes_back_to_defaults() {
    let dir = data_dir();
    let script = "\
account add Everyday checking Acme 1000
reset
account list
exit
";
    cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("All data erased").and(contains("No accounts yet")));
}

#[test]
fn typos_get_a_suggestion() {
    let dir = data_dir();
    cli(&dir)
        .write_stdin("acount list\nexit\n")
        .assert()
        .success()
        .stderr(contains("did you mean `account`"));
}
