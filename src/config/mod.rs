use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{python, service};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the systemd user unit, without the ".service" suffix
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Where the server files and virtual environment are installed.
    /// Defaults to `~/.local/share/pyviewer`.
    pub install_dir: Option<PathBuf>,

    /// Python interpreter used to create the virtual environment
    #[serde(default = "default_interpreter")]
    pub python_interpreter: String,

    /// Extra pip packages installed on top of the server's own dependencies
    #[serde(default)]
    pub extra_packages: Vec<String>,

    /// RestartSec value written into the unit file
    #[serde(default = "default_restart_sec")]
    pub restart_sec: u32,
}

fn default_service_name() -> String {
    service::DEFAULT_NAME.to_string()
}

fn default_interpreter() -> String {
    python::DEFAULT_INTERPRETER.to_string()
}

fn default_restart_sec() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            install_dir: None,
            python_interpreter: default_interpreter(),
            extra_packages: Vec::new(),
            restart_sec: default_restart_sec(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("pyviewer-setup").join("config.toml");
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path)?;
                let config: Config = toml::from_str(&content)?;
                return Ok(config);
            }
        }
        Ok(Config::default())
    }

    /// Effective installation directory, defaulting under the user data dir
    pub fn install_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.install_dir {
            return Ok(dir.clone());
        }
        let data_dir =
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("pyviewer"))
    }
}
