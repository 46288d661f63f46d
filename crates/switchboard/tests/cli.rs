// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the compiled binary against config files on disk.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("switchboard.toml");
    std::fs::write(&path, content).expect("write config");
    path
}

fn check_config(path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_switchboard"))
        .arg("check-config")
        .arg("--config")
        .arg(path)
        .output()
        .expect("run switchboard")
}

#[test]
fn check_config_prints_effective_settings() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
port = 9000

[models]
source = "config"
long_text_model = "long"
text_model = "short"
vision_model = "vision"
"#,
    );

    let output = check_config(&path);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config ok"));
    assert!(stdout.contains(":9000"));
    assert!(stdout.contains("long_text=long text=short vision=vision"));
}

#[test]
fn invalid_config_exits_with_status_one() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[routing]\ntoken_budjet = 10\n");

    let output = check_config(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("token_budjet"), "stderr: {stderr}");
    assert!(stderr.contains("token_budget"), "stderr: {stderr}");
}
