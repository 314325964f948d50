//! Installation flow for the PyViewer server
//!
//! Copies the server files, provisions the Python environment, writes the
//! wrapper launcher and systemd user unit, and finally runs the activation
//! controller.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::{payload, service};
use crate::doctor;
use crate::supervisor::{self, ActivationOutcome, ServiceDescriptor, SystemdUserSupervisor};
use crate::unit::UnitGenerator;
use crate::venv::VenvBuilder;

/// Everything one installation run needs to know
pub struct InstallConfig {
    pub source_dir: PathBuf,
    pub install_dir: PathBuf,
    pub service_name: String,
    pub python_interpreter: String,
    pub extra_packages: Vec<String>,
    pub restart_sec: u32,
    pub no_activate: bool,
}

/// Result of an installation run
pub struct InstallResult {
    pub descriptor: ServiceDescriptor,
    /// None when activation was skipped with --no-activate
    pub outcome: Option<ActivationOutcome>,
}

pub struct InstallService;

impl InstallService {
    /// Run the full installation flow
    pub fn install(config: InstallConfig) -> Result<InstallResult> {
        ensure_not_root()?;

        let report = doctor::run();
        if !report.is_installable() {
            anyhow::bail!(
                "Missing required binaries: {}. Install them and re-run.",
                report.missing_required().join(", ")
            );
        }
        for check in report.checks.iter().filter(|c| !c.found) {
            warn!("{} not found; some features will be unavailable", check.name);
        }

        copy_payload(&config.source_dir, &config.install_dir)?;

        VenvBuilder::new(&config.install_dir)
            .with_interpreter(&config.python_interpreter)
            .with_extra_packages(&config.extra_packages)
            .provision()?;

        let descriptor = ServiceDescriptor::new(
            &config.service_name,
            config.install_dir.join(service::WRAPPER_NAME),
            &config.install_dir,
        );

        let generator =
            UnitGenerator::new(descriptor.clone()).with_restart_sec(config.restart_sec);
        generator.write_wrapper(payload::SERVER_ENTRY)?;
        generator.write_unit()?;

        let outcome = if config.no_activate {
            info!("Skipping service activation (--no-activate specified)");
            None
        } else {
            let sup = SystemdUserSupervisor::new();
            Some(supervisor::activate(&sup, &descriptor))
        };

        Ok(InstallResult {
            descriptor,
            outcome,
        })
    }
}

/// Copy the server payload into the installation directory
fn copy_payload(source_dir: &Path, install_dir: &Path) -> Result<()> {
    fs::create_dir_all(install_dir)
        .with_context(|| format!("Failed to create {}", install_dir.display()))?;

    for file in payload::FILES {
        let src = source_dir.join(file);
        let dest = install_dir.join(file);
        if src.exists() {
            fs::copy(&src, &dest)
                .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
            info!("Copied {} to {}", file, install_dir.display());
        } else if payload::REQUIRED.contains(file) {
            anyhow::bail!(
                "Required file {} not found in source directory {}",
                file,
                source_dir.display()
            );
        } else {
            debug!("Optional file {} not present in source, skipping", file);
        }
    }
    Ok(())
}

/// User services belong to a login user; refuse to set one up for root.
fn ensure_not_root() -> Result<()> {
    if effective_uid() == Some(0) {
        anyhow::bail!(
            "pyviewer-setup must run as the user the service belongs to, not as root"
        );
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn effective_uid() -> Option<u32> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    let uid_line = status.lines().find(|line| line.starts_with("Uid:"))?;
    uid_line.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(not(target_os = "linux"))]
fn effective_uid() -> Option<u32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_copy_payload_copies_present_files() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(source.path().join("pyviewer.server.py"), "print('hi')").unwrap();
        fs::write(source.path().join("server.ini"), "[server]").unwrap();

        copy_payload(source.path(), dest.path()).unwrap();

        assert!(dest.path().join("pyviewer.server.py").exists());
        assert!(dest.path().join("server.ini").exists());
    }

    #[test]
    fn test_copy_payload_skips_missing_optional_files() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(source.path().join("pyviewer.server.py"), "print('hi')").unwrap();

        copy_payload(source.path(), dest.path()).unwrap();

        assert!(dest.path().join("pyviewer.server.py").exists());
        assert!(!dest.path().join("server.ini").exists());
    }

    #[test]
    fn test_copy_payload_requires_server_entry() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();

        let result = copy_payload(source.path(), dest.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("pyviewer.server.py"));
    }
}
