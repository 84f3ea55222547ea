use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the binary against an empty config directory so a user config
/// cannot change the results.
fn divmine(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("divmine").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

#[test]
fn extract_json_to_stdout() {
    let home = tempfile::tempdir().unwrap();

    divmine(&home)
        .args(["extract", "-b", "DB"])
        .arg(fixture("db_dividend.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ISIN": "DE0005140008""#))
        .stdout(predicate::str::contains(r#""quantity": "250.000""#))
        .stdout(predicate::str::contains(r#""Bank": "78.43""#))
        .stdout(predicate::str::contains(r#""type": "Dividendengutschrift""#));
}

#[test]
fn extract_auto_detects_profile() {
    let home = tempfile::tempdir().unwrap();

    divmine(&home)
        .args(["extract", "-b", "auto", "-f", "text"])
        .arg(fixture("db_dividend.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: DB"))
        .stdout(predicate::str::contains("125,00"));
}

#[test]
fn extract_unknown_bank_fails() {
    let home = tempfile::tempdir().unwrap();

    divmine(&home)
        .args(["extract", "-b", "ING"])
        .arg(fixture("db_dividend.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown document profile: ING"));
}

#[test]
fn extract_missing_marker() {
    let home = tempfile::tempdir().unwrap();
    let input = home.path().join("other.json");
    fs::write(
        &input,
        r#"{"boxes": [{"lines": [
            {"x0": 56, "y1": 600, "text": "Bruttoertrag"},
            {"x0": 480, "y1": 600, "text": "5,00 EUR"}
        ]}]}"#,
    )
    .unwrap();

    divmine(&home)
        .args(["extract", "-b", "DB"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("anchor 'Dividendengutschrift'"));

    divmine(&home)
        .args(["extract", "-b", "DB", "--lenient"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Dividend": "5.00""#))
        .stdout(predicate::str::contains("offset fields skipped"));
}

#[test]
fn extract_writes_outputs_and_summary() {
    let home = tempfile::tempdir().unwrap();
    let out_dir = home.path().join("out");
    let summary = home.path().join("summary.csv");
    let broken = home.path().join("broken.json");
    fs::write(&broken, "not json").unwrap();

    divmine(&home)
        .args(["extract", "-b", "DB", "-f", "csv", "--continue-on-error"])
        .arg(fixture("db_dividend.json"))
        .arg(&broken)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success();

    let csv = fs::read_to_string(out_dir.join("db_dividend.csv")).unwrap();
    assert!(csv.starts_with("field,value\n"));
    assert!(csv.contains("Dividend,125.00\n"));

    let summary = fs::read_to_string(&summary).unwrap();
    let mut lines = summary.lines();
    assert_eq!(
        lines.next(),
        Some("filename,status,profile,type,quantity,WKN,ISIN,name,Dividend,KESt,QuSt,SolZ,Bank,error")
    );
    assert!(lines.next().unwrap().starts_with("db_dividend.json,success,DB,Dividendengutschrift,250.000,"));
    assert!(lines.next().unwrap().starts_with("broken.json,error,"));
}

#[test]
fn extract_keeps_outputs_with_same_stem() {
    let home = tempfile::tempdir().unwrap();
    let out_dir = home.path().join("out");
    for year in ["2023", "2024"] {
        let dir = home.path().join(year);
        fs::create_dir_all(&dir).unwrap();
        fs::copy(fixture("db_dividend.json"), dir.join("statement.json")).unwrap();
    }

    divmine(&home)
        .args(["extract", "-b", "DB", "-f", "csv"])
        .arg(home.path().join("2023").join("statement.json"))
        .arg(home.path().join("2024").join("statement.json"))
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .success();

    assert!(out_dir.join("statement.csv").is_file());
    assert!(out_dir.join("statement-2.csv").is_file());
}

#[test]
fn extract_auto_without_known_marker_fails() {
    let home = tempfile::tempdir().unwrap();
    let input = home.path().join("other.json");
    fs::write(&input, r#"{"boxes": [{"lines": [{"x0": 56, "y1": 600, "text": "Kontoauszug"}]}]}"#).unwrap();

    divmine(&home)
        .args(["extract", "-b", "auto"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no known document-type marker"));
}

#[test]
fn profiles_lists_builtin() {
    let home = tempfile::tempdir().unwrap();

    divmine(&home)
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dividendengutschrift"))
        .stdout(predicate::str::contains("Bruttoertrag"));
}
