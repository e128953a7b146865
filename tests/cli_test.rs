#![allow(deprecated)]

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("gh-console").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("gh-console").unwrap();
    cmd.arg("--version");
    cmd.assert().success();
}

#[test]
fn test_cli_rejects_unknown_flags() {
    let mut cmd = Command::cargo_bin("gh-console").unwrap();
    cmd.arg("--no-such-flag");
    cmd.assert().failure();
}
