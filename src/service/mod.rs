//! Orchestration layer for the installer
//!
//! Ties the doctor checks, payload copy, virtual environment provisioning,
//! unit generation, and service activation together, separating that flow
//! from the CLI layer in main.rs.

pub mod install;
pub mod uninstall;

pub use install::{InstallConfig, InstallResult, InstallService};
pub use uninstall::UninstallService;
