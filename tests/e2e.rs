use std::process::Command;

fn run(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_bank-sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_fixture(fixture: &str) -> (String, String, bool) {
    run(&[&format!("tests/fixtures/{fixture}")])
}

#[test]
fn valid_script() {
    let (stdout, stderr, success) = run_fixture("valid.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "account,name,kind,balance,available,overdraft_limit,card,closed"
    );
    assert_eq!(lines[1], "1,Sasi,premium,-100.00,0.00,100.00,,false");
    assert_eq!(lines[2], "2,Soman,basic,400.00,400.00,0.00,,false");
    assert_eq!(lines[3], "3,Pushpan,premium,0.00,300.00,300.00,,true");
    assert_eq!(lines.len(), 4);
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run_fixture("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("opening balance coerced"));
    assert!(stderr.contains("unrecognized command"));
    assert!(stderr.contains("missing amount"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "1,Thankappan,basic,25.00,25.00,0.00,,false");
}

#[test]
fn issued_card_appears_in_report() {
    let (stdout, _, success) = run_fixture("cards.csv");

    assert!(success);
    let row = stdout.lines().nth(1).unwrap();
    let card = row.split(',').nth(6).unwrap();
    assert_eq!(card.len(), 16);
    assert!(card.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn demo_runs_without_script() {
    let (stdout, stderr, success) = run(&[]);

    assert!(success);
    assert!(stderr.contains("opening balance coerced"));
    assert!(stdout.contains("Hi Thankappan (account number: 1)"));
    assert!(stdout.contains("Your balance: £-100.00 with an overdraft limit: £100.00"));
    assert!(stdout.contains("Your current balance is: £350.00. Basic account has no overdraft option"));
}

#[test]
fn mutating_closed_account_warns() {
    let (stdout, stderr, success) = run_fixture("closed.csv");

    assert!(success);
    assert!(stderr.contains("operating on a closed account"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "1,Soman,basic,10.00,10.00,0.00,,true");
}

#[test]
fn unrepresentable_amounts_are_rejected_without_crashing() {
    let (stdout, stderr, success) = run_fixture("overflow.csv");

    assert!(success);
    assert!(stderr.contains("'1e300' is not an amount"));
    assert!(stderr.contains("'inf' is not an amount"));
    assert!(stderr.contains("opening balance coerced"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "1,A,basic,100.00,100.00,0.00,,false");
    assert_eq!(lines[2], "2,C,basic,0.00,0.00,0.00,,false");
    assert_eq!(lines.len(), 3);
}
