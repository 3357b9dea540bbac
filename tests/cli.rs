//! E2E tests for the payec commands

use rust_decimal::Decimal;
use std::process::{Command, Output};
use std::str::FromStr;

fn payec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_payec"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command")
}

fn decimal_field(json: &serde_json::Value, field: &str) -> Decimal {
    let value = &json[field];
    let text = value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string());
    Decimal::from_str(&text).unwrap_or_else(|_| panic!("{field} is not a number: {value}"))
}

/// Test the calc command prints the audit trail table
#[test]
fn calc_prints_breakdown() {
    let output = payec(&[
        "calc",
        "tests/data/salary_annual.json",
        "--rules",
        "tests/data/test_rules.json",
        "--apply-allowance",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("PAYE BREAKDOWN (NGN 2026) - allowance applied"));
    assert!(stdout.contains("Income Amount"));
    assert!(stdout.contains("Pension Contribution (8%)"));
    assert!(stdout.contains("Personal Allowance"));
    assert!(stdout.contains("Taxable Income"));
    assert!(stdout.contains("Annual Tax: ₦72,000.00"));
}

/// Test calc JSON output for the pension scenario
#[test]
fn calc_json_output() {
    let output = payec(&[
        "calc",
        "tests/data/salary_annual.json",
        "--rules",
        "tests/data/test_rules.json",
        "--apply-allowance",
        "--json",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decimal_field(&json, "annualTax"), Decimal::from(72000));
    assert_eq!(decimal_field(&json, "taxableIncome"), Decimal::from(720000));
    assert_eq!(json["allowanceApplied"], serde_json::json!(true));
    assert_eq!(json["rulesFingerprint"].as_str().unwrap().len(), 64);
    assert_eq!(json["lineItems"][0]["label"], "Income Amount");
}

/// Test the default mode leaves the personal allowance out
#[test]
fn calc_without_allowance() {
    let output = payec(&[
        "calc",
        "tests/data/salary_annual.json",
        "--rules",
        "tests/data/test_rules.json",
        "--json",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decimal_field(&json, "taxableIncome"), Decimal::from(920000));
    assert_eq!(decimal_field(&json, "personalAllowance"), Decimal::ZERO);
    assert_eq!(json["allowanceApplied"], serde_json::json!(false));
}

/// Test non-salary input against the built-in preset
#[test]
fn calc_non_salary_with_preset() {
    let output = payec(&["calc", "tests/data/non_salary.json", "--json"]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decimal_field(&json, "annualTax"), Decimal::from(1770000));
    assert_eq!(decimal_field(&json, "totalDeductions"), Decimal::from(1000000));
}

/// Test the salary command with monthly flags
#[test]
fn salary_monthly_flags() {
    let output = payec(&[
        "salary",
        "--basic",
        "100000",
        "--housing",
        "50000",
        "--monthly",
        "--pension-pct",
        "8",
        "--nhf",
        "--json",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decimal_field(&json, "grossIncome"), Decimal::from(1800000));
    // 8% pension + 2.5% NHF
    assert_eq!(decimal_field(&json, "totalDeductions"), Decimal::from(189000));
}

/// Test negative amounts are rejected before computing
#[test]
fn calc_rejects_negative_amounts() {
    let output = payec(&["calc", "tests/data/negative_income.json"]);

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("bonus must not be negative"), "{stderr}");
}

/// Test salary flags go through the same input checks
#[test]
fn salary_rejects_out_of_range_flags() {
    let output = payec(&["salary", "--basic=100000", "--pension-pct=150"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("pensionPct must be between 0 and 100"), "{stderr}");

    let output = payec(&["salary", "--basic=-100000"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("basic must not be negative"), "{stderr}");
}

/// Test rejected rules produce a failing exit code
#[test]
fn malformed_rules_rejected() {
    let output = payec(&[
        "calc",
        "tests/data/salary_annual.json",
        "--rules",
        "tests/data/bad_rules.json",
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("does not exceed previous ceiling"), "{stderr}");
}

/// Test rules validation passes and fails
#[test]
fn rules_validate() {
    let ok = payec(&["rules", "validate", "tests/data/test_rules.json"]);
    assert!(ok.status.success(), "Command failed: {:?}", ok);
    assert!(String::from_utf8_lossy(&ok.stdout).contains("are valid (3 brackets)"));

    let bad = payec(&["rules", "validate", "tests/data/bad_rules.json"]);
    assert!(!bad.status.success());
}

/// Test rules show for the preset
#[test]
fn rules_show_preset() {
    let output = payec(&["rules", "show"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("PAYE RULES (NGN 2026)"));
    assert!(stdout.contains("and above"));
    assert!(stdout.contains("25%"));
    assert!(stdout.contains("Personal allowance: hybrid value 200000 rate 20.00%"));
    assert!(stdout.contains("Fingerprint:"));
}

/// Test stored rules keep the sentinel for the unbounded bracket
#[test]
fn rules_show_json_uses_sentinel() {
    let output = payec(&["rules", "show", "--json"]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let last = json["brackets"].as_array().unwrap().last().unwrap().clone();
    assert!(last["upTo"].is_number());
    assert_eq!(last["upTo"].as_u64(), Some(9999999999));
    assert!(last["rate"].is_number());
}

/// Test rules init writes an editable preset that validates
#[test]
fn rules_init_round_trip() {
    let path = std::env::temp_dir().join(format!("payec-init-{}.json", std::process::id()));
    let path_str = path.to_str().unwrap();

    let init = payec(&["rules", "init", path_str, "--force"]);
    assert!(init.status.success(), "Command failed: {:?}", init);

    let again = payec(&["rules", "init", path_str]);
    assert!(!again.status.success());

    let validate = payec(&["rules", "validate", path_str]);
    assert!(validate.status.success(), "Command failed: {:?}", validate);

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(written.contains("\"updatedAt\""));
}

/// Test batch CSV output keeps row order
#[test]
fn batch_csv_output() {
    let output = payec(&["batch", "tests/data/earners.csv", "--csv"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<_> = stdout.lines().collect();
    assert!(lines[0].starts_with("id,gross_income,total_deductions"));
    assert!(lines[1].starts_with("E001,"));
    assert!(lines[2].starts_with("E002,"));
    assert!(lines[3].starts_with("E003,"));
}

/// Test batch table output
#[test]
fn batch_table_output() {
    let output = payec(&["batch", "tests/data/earners.csv"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Annual Tax"));
    assert!(stdout.contains("3 records"));
}

/// Test the schema command formats
#[test]
fn schema_formats() {
    let header = payec(&["schema", "csv-header"]);
    assert!(header.status.success());
    assert!(String::from_utf8_lossy(&header.stdout).starts_with("id,period,basic,housing"));

    let fields = payec(&["schema", "csv-fields"]);
    let stdout = String::from_utf8_lossy(&fields.stdout);
    assert!(fields.status.success());
    assert!(stdout.contains("nhf_amount"));
    assert!(stdout.contains("share_gains_reinvested"));

    let inputs = payec(&["schema", "inputs"]);
    assert!(inputs.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&inputs.stdout).unwrap();
    assert!(schema.to_string().contains("earnerType"));

    let rules = payec(&["schema", "rules"]);
    assert!(rules.status.success());
    assert!(String::from_utf8_lossy(&rules.stdout).contains("personalAllowance"));
}

/// Test HTML report written to a file
#[test]
fn html_report_to_file() {
    let path = std::env::temp_dir().join(format!("payec-report-{}.html", std::process::id()));
    let output = payec(&[
        "html",
        "tests/data/non_salary.json",
        "-o",
        path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let html = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(html.contains("PAYE Tax Breakdown"));
    assert!(html.contains("Rent Relief"));
}
