//! Shared helpers for CLI integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a wb_cli command with a clean environment
pub fn wb() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("wb_cli"));
    cmd.env_remove("WB_SEED").env_remove("RUST_LOG");
    cmd
}

/// Generate a seeded set into a temp directory and return its path
pub fn generate_set(tmp: &TempDir, types: &str, count: u8, seed: u64) -> PathBuf {
    let path = tmp.path().join("set.wbq");
    wb().args([
        "generate",
        "--types",
        types,
        "--count",
        &count.to_string(),
        "--seed",
        &seed.to_string(),
        "--out",
    ])
    .arg(&path)
    .assert()
    .success();
    path
}
