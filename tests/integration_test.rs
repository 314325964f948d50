use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_version_command() -> Result<()> {
    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pyviewer-setup 0.1.0"));
    Ok(())
}

#[test]
fn test_version_subcommand() -> Result<()> {
    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pyviewer-setup 0.1.0"));
    Ok(())
}

#[test]
fn test_help_command() -> Result<()> {
    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains(
        "Installer and service activation tool for the PyViewer remote desktop server",
    ));
    Ok(())
}

#[test]
fn test_install_help() -> Result<()> {
    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("install").arg("--help");
    cmd.assert().success().stdout(predicate::str::contains(
        "Install the PyViewer server and activate its user service",
    ));
    Ok(())
}

#[test]
fn test_doctor_json_output() -> Result<()> {
    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("doctor").arg("--json");
    // Exit code depends on what is installed on the host, only check the shape.
    cmd.assert()
        .stdout(predicate::str::contains("\"checks\""))
        .stdout(predicate::str::contains("\"python3\""));
    Ok(())
}

#[test]
fn test_doctor_human_output() -> Result<()> {
    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("doctor");
    cmd.assert()
        .stdout(predicate::str::contains("External binary checks:"))
        .stdout(predicate::str::contains("ffmpeg"));
    Ok(())
}

#[test]
fn test_install_fails_without_server_entry() -> Result<()> {
    // An empty source directory is missing the required server file. The
    // doctor gate runs first, so this also fails cleanly on hosts without
    // python3; either way the command must not succeed.
    let source = tempdir()?;
    let install = tempdir()?;

    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("install")
        .arg(source.path())
        .arg("--install-dir")
        .arg(install.path().join("pyviewer"))
        .arg("--no-activate");

    cmd.assert().failure();
    Ok(())
}

#[test]
fn test_unknown_subcommand_fails() -> Result<()> {
    let mut cmd = Command::cargo_bin("pyviewer-setup")?;
    cmd.arg("frobnicate");
    cmd.assert().failure();
    Ok(())
}
