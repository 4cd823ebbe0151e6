//! Runs the built binary against a scratch home directory

use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cableway-report"))
        .args(args)
        .env("HOME", home)
        .env_remove("CABLEWAY_OUTPUT_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run binary")
}

fn write_broken_config(home: &Path) {
    let dir = home.join(".config").join("cableway-report");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json"), "{ not json").unwrap();
}

#[test]
fn test_template_ignores_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    write_broken_config(home.path());

    let output = run(home.path(), &["template"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"Station Name\""));
    assert!(stdout.contains("\"Reviewer Name\""));
}

#[test]
fn test_generate_reports_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    write_broken_config(home.path());
    let out = home.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let output = run(home.path(), &["generate", "-o", out.to_str().unwrap(), "-d", "2024-03-14"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Report failed"));
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_generate_writes_named_report() {
    let home = tempdir().expect("Failed to create temp dir");
    let out = home.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let form = home.path().join("form.json");
    std::fs::write(&form, r#"{"Station Name": "Intake", "Station Number": "12"}"#).unwrap();

    let output = run(
        home.path(),
        &["generate", "-f", form.to_str().unwrap(), "-o", out.to_str().unwrap(), "-d", "2024-03-14"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Report saved as Cableway_Inspection_2024-03-14_Intake_12.pdf"));
    assert!(out.join("Cableway_Inspection_2024-03-14_Intake_12.pdf").exists());
}
