use assert_cmd::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_samples(dir: &Path, n: usize) -> PathBuf {
    let mut text = String::from("Timestamp,Voltage,Velocity,Acceleration\n");
    for i in 0..n {
        let v = i as f64 - n as f64 / 2.0 + 0.25;
        let a = (i % 5) as f64 - 2.0;
        let volts = 0.3 * if v > 0.0 { 1.0 } else { -1.0 } + 0.2 * v + 0.05 * a;
        text.push_str(&format!("{:.2},{volts:.9},{v},{a}\n", i as f64 * 0.01));
    }
    let path = dir.join("samples.csv");
    fs::write(&path, text).unwrap();
    path
}

fn last_json_line(bytes: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(bytes);
    let line = text
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .expect("no output");
    serde_json::from_str(line).unwrap_or_else(|e| panic!("not JSON: {line}: {e}"))
}

fn json_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sysid").unwrap();
    // Missing explicit config would be an error; point at an empty one.
    let cfg = dir.join("cfg.toml");
    fs::write(&cfg, "").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--json")
        .args(["--log-level", "error", "--config"])
        .arg(cfg);
    cmd
}

#[test]
fn identify_json_schema() {
    let dir = tempdir().unwrap();
    let samples = write_samples(dir.path(), 30);
    let out = json_cmd(dir.path())
        .args(["identify", "--samples"])
        .arg(&samples)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v = last_json_line(&out.stdout);
    for key in ["ks", "kv", "ka", "r_squared", "rms_error", "samples", "identified"] {
        assert!(v.get(key).is_some(), "missing key {key} in {v}");
    }
    assert_eq!(v["samples"], 30);
    assert_eq!(v["identified"], true);
    assert!((v["ks"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert!((v["kv"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    assert!((v["ka"].as_f64().unwrap() - 0.05).abs() < 1e-6);
    assert!(v["r_squared"].as_f64().unwrap() > 0.999);
}

#[test]
fn predict_json_schema() {
    let dir = tempdir().unwrap();
    let samples = write_samples(dir.path(), 30);
    let out = json_cmd(dir.path())
        .args(["predict", "--samples"])
        .arg(&samples)
        .args(["--velocity", "10", "--acceleration", "-2"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v = last_json_line(&out.stdout);
    assert_eq!(v["velocity"], 10.0);
    assert_eq!(v["acceleration"], -2.0);
    let expected = 0.3 + 0.2 * 10.0 + 0.05 * -2.0;
    assert!((v["voltage"].as_f64().unwrap() - expected).abs() < 1e-6);
}

#[rstest]
#[case(0, "InsufficientData")]
#[case(2, "InsufficientData")]
fn too_few_samples_json_error(#[case] n: usize, #[case] reason: &str) {
    let dir = tempdir().unwrap();
    let samples = write_samples(dir.path(), n);
    let out = json_cmd(dir.path())
        .args(["identify", "--samples"])
        .arg(&samples)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));

    let v = last_json_line(&out.stderr);
    assert_eq!(v["reason"], reason);
    assert_eq!(v["details"]["count"], n);
    assert_eq!(v["details"]["min_samples"], 3);
    assert!(out.stdout.is_empty());
}

#[test]
fn generic_error_json() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "a,b,c\n1,2,3\n").unwrap();
    let out = json_cmd(dir.path())
        .args(["identify", "--samples"])
        .arg(&bad)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));

    let v = last_json_line(&out.stderr);
    assert_eq!(v["reason"], "Error");
    assert!(v["message"].as_str().unwrap().contains("Invalid headers"));
}
