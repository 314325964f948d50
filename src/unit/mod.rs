use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::python;
use crate::supervisor::ServiceDescriptor;


/// Renders and writes the systemd user unit and the wrapper launcher
/// described by a [`ServiceDescriptor`].
pub struct UnitGenerator {
    descriptor: ServiceDescriptor,
    restart_sec: u32,
}

impl UnitGenerator {
    pub fn new(descriptor: ServiceDescriptor) -> Self {
        Self {
            descriptor,
            restart_sec: 5,
        }
    }

    pub fn with_restart_sec(mut self, restart_sec: u32) -> Self {
        self.restart_sec = restart_sec;
        self
    }

    /// Directory systemd scans for user units, `~/.config/systemd/user`
    pub fn user_unit_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("systemd").join("user"))
    }

    /// Render the `.service` unit file contents
    pub fn render_unit(&self) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        format!(
            r#"# Generated by pyviewer-setup on {timestamp}. Do not edit by hand.
[Unit]
Description=PyViewer remote desktop server
After=network-online.target graphical-session.target

[Service]
Type=simple
ExecStart={exec}
WorkingDirectory={workdir}
Restart=on-failure
RestartSec={restart_sec}

[Install]
WantedBy=default.target
"#,
            exec = self.descriptor.executable_path.display(),
            workdir = self.descriptor.working_directory.display(),
            restart_sec = self.restart_sec,
        )
    }

    /// Render the wrapper launcher that activates the virtual environment and
    /// execs the server entry point
    pub fn render_wrapper(&self, server_entry: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let install_dir = self.descriptor.working_directory.display();
        format!(
            r#"#!/bin/sh
# Generated by pyviewer-setup on {timestamp}. Do not edit by hand.
cd "{install_dir}" || exit 1
exec "{install_dir}/{venv}/bin/python" "{install_dir}/{entry}" "$@"
"#,
            venv = python::VENV_DIR,
            entry = server_entry,
        )
    }

    /// Write the unit file into the user unit directory
    pub fn write_unit(&self) -> Result<PathBuf> {
        let unit_dir = Self::user_unit_dir()?;
        fs::create_dir_all(&unit_dir)
            .with_context(|| format!("Failed to create {}", unit_dir.display()))?;

        let unit_path = unit_dir.join(self.descriptor.unit_name());
        write_atomic(&unit_path, self.render_unit().as_bytes(), false)?;
        info!("Wrote unit file to {}", unit_path.display());
        Ok(unit_path)
    }

    /// Write the wrapper launcher next to the installed server files
    pub fn write_wrapper(&self, server_entry: &str) -> Result<PathBuf> {
        let wrapper_path = self.descriptor.executable_path.clone();
        if let Some(parent) = wrapper_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        write_atomic(&wrapper_path, self.render_wrapper(server_entry).as_bytes(), true)?;
        info!("Wrote wrapper launcher to {}", wrapper_path.display());
        Ok(wrapper_path)
    }
}

/// Write a file via a temporary sibling so a crash never leaves a half-written
/// unit behind for systemd to pick up.
fn write_atomic(path: &Path, contents: &[u8], executable: bool) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("No parent directory for {}", path.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    use std::io::Write;
    tmp.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    if executable {
        use std::os::unix::fs::PermissionsExt;
        let permissions = fs::Permissions::from_mode(0o755);
        tmp.as_file().set_permissions(permissions)?;
    }
    #[cfg(not(unix))]
    let _ = executable;

    tmp.persist(path)
        .with_context(|| format!("Failed to persist {}", path.display()))?;
    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
