//! Removal flow for an installed PyViewer service

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::constants::service;
use crate::supervisor::{ServiceDescriptor, Supervisor};
use crate::unit::UnitGenerator;

pub struct UninstallService;

impl UninstallService {
    /// Stop and disable the service, then remove the generated files.
    ///
    /// An unreachable supervisor downgrades the stop/disable steps to a
    /// warning; file removal proceeds either way so a broken session does not
    /// leave a stale installation behind.
    pub fn uninstall<S: Supervisor>(
        supervisor: &S,
        service_name: &str,
        install_dir: &Path,
        keep_files: bool,
    ) -> Result<()> {
        let descriptor = ServiceDescriptor::new(
            service_name,
            install_dir.join(service::WRAPPER_NAME),
            install_dir,
        );
        let unit = descriptor.unit_name();

        // Probe once so every branch below agrees on what it saw.
        let reachable = supervisor.is_reachable();

        if reachable {
            if supervisor.is_active(&unit) {
                info!("Stopping {}", unit);
                supervisor
                    .stop(&unit)
                    .with_context(|| format!("Failed to stop {}", unit))?;
            }
            if let Err(e) = supervisor.disable(&unit) {
                warn!("Could not disable {}: {:#}", unit, e);
            }
        } else {
            warn!(
                "User service manager not reachable; remove the service manually with: \
                 systemctl --user disable {}",
                unit
            );
        }

        let unit_path = UnitGenerator::user_unit_dir()?.join(&unit);
        if unit_path.exists() {
            fs::remove_file(&unit_path)
                .with_context(|| format!("Failed to remove {}", unit_path.display()))?;
            info!("Removed unit file {}", unit_path.display());
        }

        if reachable {
            if let Err(e) = supervisor.reload_definitions() {
                warn!("Could not reload unit definitions: {:#}", e);
            }
        }

        if keep_files {
            info!("Keeping installation directory {}", install_dir.display());
        } else if install_dir.exists() {
            fs::remove_dir_all(install_dir)
                .with_context(|| format!("Failed to remove {}", install_dir.display()))?;
            info!("Removed installation directory {}", install_dir.display());
        }

        Ok(())
    }
}
