use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error, info};

use crate::constants::python;

#[cfg(test)]
mod tests;

/// Provisions the isolated Python environment the PyViewer server runs in.
pub struct VenvBuilder {
    install_dir: PathBuf,
    interpreter: String,
    packages: Vec<String>,
}

#[derive(Debug)]
pub struct VenvResult {
    /// Path to the environment's python binary
    pub python_path: PathBuf,
}

impl VenvBuilder {
    pub fn new(install_dir: impl AsRef<Path>) -> Self {
        Self {
            install_dir: install_dir.as_ref().to_path_buf(),
            interpreter: python::DEFAULT_INTERPRETER.to_string(),
            packages: python::PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.interpreter = interpreter.to_string();
        self
    }

    pub fn with_extra_packages(mut self, packages: &[String]) -> Self {
        self.packages.extend(packages.iter().cloned());
        self
    }

    fn venv_dir(&self) -> PathBuf {
        self.install_dir.join(python::VENV_DIR)
    }

    fn venv_bin(&self, name: &str) -> PathBuf {
        self.venv_dir().join("bin").join(name)
    }

    /// Create the environment and install the package set.
    ///
    /// Re-running against an existing environment is fine: `python -m venv`
    /// leaves an existing tree in place and pip upgrades what is outdated.
    pub fn provision(&self) -> Result<VenvResult> {
        info!(
            "Provisioning virtual environment at {:?}",
            self.venv_dir()
        );

        let mut cmd = Command::new(&self.interpreter);
        cmd.arg("-m").arg("venv").arg(self.venv_dir());
        run_checked(&mut cmd, "create the virtual environment")?;

        let pip = self.venv_bin("pip");

        let mut cmd = Command::new(&pip);
        cmd.args(["install", "--upgrade", "pip"]);
        run_checked(&mut cmd, "upgrade pip")?;

        info!("Installing Python packages: {}", self.packages.join(", "));
        let mut cmd = Command::new(&pip);
        cmd.arg("install");
        for package in &self.packages {
            cmd.arg(package);
        }
        run_checked(&mut cmd, "install Python packages")?;

        let python_path = self.venv_bin("python");
        if !python_path.exists() {
            anyhow::bail!(
                "Virtual environment python not found at {:?}",
                python_path
            );
        }

        info!("Virtual environment ready at {:?}", self.venv_dir());
        Ok(VenvResult { python_path })
    }
}

fn run_checked(cmd: &mut Command, what: &str) -> Result<std::process::Output> {
    debug!("Running command: {:?}", cmd);
    let output = cmd
        .output()
        .with_context(|| format!("Failed to {}", what))?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Command failed while trying to {}", what);
        error!("stdout:\n{}", stdout);
        error!("stderr:\n{}", stderr);
        anyhow::bail!("Failed to {}: {}", what, stderr.trim());
    }

    Ok(output)
}
