//! E2E tests for the lookup, batch, bands and schema commands

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn vedc(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn vedc_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait on command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Test a modern car with an expensive list price
#[test]
fn lookup_modern_expensive_car() {
    let output = vedc(&[
        "lookup",
        "--co2",
        "148",
        "--registration-date",
        "2025-06-10",
        "--fuel-type",
        "PETROL",
        "--list-price",
        "52000",
    ]);
    let out = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(out.contains("ROAD TAX ESTIMATE - modern rules"));
    assert!(out.contains("Band: H (131-150 g/km)"));
    assert!(out.contains("First year: £540"));
    assert!(out.contains("Expensive car supplement: £410"));
    assert!(out.contains("Total annual: £605"));
    assert!(out.contains("ULEZ: Compliant (estimated)"));
    assert!(out.contains("Live CAZ data unavailable, showing estimate"));
}

/// Test JSON output for a vehicle with no usable data
#[test]
fn lookup_json_without_data() {
    let output = vedc(&["lookup", "--json"]);
    let out = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(json["tax"]["regime"], "unknown");
    assert_eq!(json["tax"]["annual_rate"], 195);
    assert_eq!(json["tax"]["first_year_rate"], serde_json::Value::Null);
    assert_eq!(json["ulez"]["status"], "Unknown");
    assert_eq!(json["fingerprint"].as_str().map(str::len), Some(64));
}

/// Identical input gives an identical snapshot
#[test]
fn lookup_json_is_deterministic() {
    let args = [
        "lookup",
        "--co2",
        "201",
        "--registration-date",
        "2018-10-10",
        "--fuel-type",
        "DIESEL",
        "--json",
    ];
    let first = vedc(&args);
    let second = vedc(&args);

    assert!(first.status.success(), "Command failed: {:?}", first);
    assert_eq!(first.stdout, second.stdout);
}

/// Test the batch table from CSV
#[test]
fn batch_csv_table() {
    let output = vedc(&["batch", "tests/data/vehicles.csv"]);
    let out = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(out.contains("Registration"));
    assert!(out.contains("AB12CDE"));
    assert!(out.contains("legacy"));
    assert!(out.contains("pre_2001"));
    assert!(out.contains("Chargeable*"));
    assert!(out.contains("* estimated"));
}

/// Test batch CSV output
#[test]
fn batch_csv_output() {
    let output = vedc(&["batch", "tests/data/vehicles.csv", "--csv"]);
    let out = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let mut lines = out.lines();
    let header = lines.next().expect("header row");
    assert!(header.starts_with("registration,regime,band"));
    assert!(header.ends_with("notes"));
    assert_eq!(lines.count(), 5);
    assert!(out.contains("engine size"));
}

/// Test that live results in JSON input replace the estimate
#[test]
fn batch_json_uses_live_results() {
    let output = vedc(&["batch", "tests/data/vehicles.json", "--json"]);
    let out = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    let vehicles = json.as_array().expect("array of snapshots");
    assert_eq!(vehicles.len(), 2);

    assert_eq!(vehicles[0]["ulez"]["source"], "live");
    assert_eq!(
        vehicles[0]["ulez"]["notes"],
        "Vehicle does not meet ULEZ standards (TfL)"
    );
    assert_eq!(vehicles[0]["caz"]["source"], "estimated");
    assert_eq!(vehicles[0]["tax"]["expensive_car_supplement"], serde_json::Value::Null);

    assert_eq!(vehicles[1]["tax"]["total_annual"], 605);
}

/// Unknown file types are rejected
#[test]
fn batch_rejects_unknown_format() {
    let output = vedc(&["batch", "Cargo.toml"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unsupported input format"));
}

/// Test the band tables
#[test]
fn bands_tables() {
    let output = vedc(&["bands"]);
    let out = stdout(&output);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(out.contains("FIRST YEAR RATES"));
    assert!(out.contains("Over 255 g/km"));
    assert!(out.contains("£5490"));

    let output = vedc(&["bands", "legacy"]);
    let out = stdout(&output);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(out.contains("Up to 100 g/km"));
    assert!(out.contains("£760"));
}

/// Test the schema outputs
#[test]
fn schema_outputs() {
    let output = vedc(&["schema", "csv-header"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout(&output).trim(),
        "registration,co2,registration_date,fuel_type,list_price,euro_status"
    );

    let output = vedc(&["schema"]);
    let out = stdout(&output);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(out.contains("\"vehicles\""));
    assert!(out.contains("\"live\""));
}

/// Test batch input piped on stdin, CSV and JSON
#[test]
fn batch_reads_stdin() {
    let csv = "registration,co2,registration_date,fuel_type,list_price,euro_status\n\
               PIPE1,125,2010-01-01,DIESEL,22000,\n";
    let output = vedc_with_stdin(&["batch", "-", "--json"], csv);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json[0]["registration"], "PIPE1");
    assert_eq!(json[0]["tax"]["regime"], "legacy");
    assert_eq!(json[0]["tax"]["annual_rate"], 165);

    let batch = r#"{"vehicles": [{"registration": "PIPE2", "co2": 0,
        "registration_date": "2024-05-01", "fuel_type": "ELECTRICITY"}]}"#;
    let output = vedc_with_stdin(&["batch", "-", "--json"], batch);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json[0]["registration"], "PIPE2");
    assert_eq!(json[0]["tax"]["band_code"], "A");
    assert_eq!(json[0]["ulez"]["status"], "Compliant");
}

/// Empty stdin is rejected
#[test]
fn batch_rejects_empty_stdin() {
    let output = vedc_with_stdin(&["batch"], "");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no input received"));
}
