use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::{debug, info, warn};

use crate::constants::service;


/// Static description of the managed service, built once at configuration time.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Unit name without the ".service" suffix
    pub name: String,
    /// Absolute path to the wrapper launcher the supervisor execs
    pub executable_path: PathBuf,
    /// Directory the service runs in
    pub working_directory: PathBuf,
}

impl ServiceDescriptor {
    pub fn new(
        name: impl Into<String>,
        executable_path: impl Into<PathBuf>,
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            executable_path: executable_path.into(),
            working_directory: working_directory.into(),
        }
    }

    /// Unit name as the supervisor knows it, e.g. "pyviewer.service"
    pub fn unit_name(&self) -> String {
        format!("{}{}", self.name, service::UNIT_SUFFIX)
    }
}

/// Terminal result of one activation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Service is enabled and running (or was restarted to pick up changes)
    Started,
    /// No supervisor session was reachable; an operator must finish activation
    ManualActivationRequired,
    /// A supervisor command failed; `remedy` tells the operator what to run
    Failed { remedy: String },
}

impl ActivationOutcome {
    /// Process exit code the installer reports for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            ActivationOutcome::Started => 0,
            ActivationOutcome::ManualActivationRequired => 2,
            ActivationOutcome::Failed { .. } => 1,
        }
    }
}

/// Capability interface over a per-user service manager.
///
/// The real implementation shells out to `systemctl --user`; tests use an
/// in-memory recording fake. All operations are synchronous and scoped to the
/// invoking user's service namespace.
pub trait Supervisor {
    /// Whether a supervisor instance is reachable for the current session
    fn is_reachable(&self) -> bool;
    /// Ask the supervisor to re-read unit definitions from disk
    fn reload_definitions(&self) -> Result<()>;
    /// Mark the unit enabled so it survives supervisor restarts
    fn enable(&self, unit: &str) -> Result<()>;
    /// Whether the unit is currently running
    fn is_active(&self, unit: &str) -> bool;
    fn start(&self, unit: &str) -> Result<()>;
    fn restart(&self, unit: &str) -> Result<()>;
    fn stop(&self, unit: &str) -> Result<()>;
    fn disable(&self, unit: &str) -> Result<()>;
}

/// Bring the described service to "enabled and running".
///
/// The reachability probe runs before any mutation so that nothing is issued
/// into a session without a supervisor context (the usual failure mode when
/// invoked from a remote shell with no login session). When the service is
/// already active it is restarted rather than started, so repeated
/// invocations converge on a fresh instance instead of erroring.
pub fn activate<S: Supervisor>(supervisor: &S, descriptor: &ServiceDescriptor) -> ActivationOutcome {
    let unit = descriptor.unit_name();

    if !supervisor.is_reachable() {
        warn!("No reachable user service manager for this session");
        return ActivationOutcome::ManualActivationRequired;
    }

    debug!("Reloading unit definitions");
    if let Err(e) = supervisor.reload_definitions() {
        return ActivationOutcome::Failed {
            remedy: format!(
                "Reloading unit definitions failed: {e:#}. Retry manually with: systemctl --user daemon-reload"
            ),
        };
    }

    debug!("Enabling {}", unit);
    if let Err(e) = supervisor.enable(&unit) {
        return ActivationOutcome::Failed {
            remedy: format!(
                "Enabling the service failed: {e:#}. Retry manually with: systemctl --user enable {unit}"
            ),
        };
    }

    let result = if supervisor.is_active(&unit) {
        info!("{} is already running, restarting to apply changes", unit);
        supervisor.restart(&unit)
    } else {
        info!("Starting {}", unit);
        supervisor.start(&unit)
    };

    if let Err(e) = result {
        return ActivationOutcome::Failed {
            remedy: format!(
                "Starting the service failed: {e:#}. Inspect it with: systemctl --user status {unit}"
            ),
        };
    }

    ActivationOutcome::Started
}

/// Commands an operator must run when no supervisor session was reachable.
pub fn manual_activation_help(descriptor: &ServiceDescriptor) -> String {
    let unit = descriptor.unit_name();
    format!(
        "Could not reach your user service manager (no active login session?).\n\
         To activate the service later, log in and run:\n\
         \n\
         \x20 systemctl --user daemon-reload\n\
         \x20 systemctl --user enable {unit}\n\
         \x20 systemctl --user start {unit}\n\
         \n\
         To let the service run without an interactive session, additionally run:\n\
         \n\
         \x20 sudo loginctl enable-linger $USER"
    )
}

/// Supervisor backed by `systemctl --user`.
pub struct SystemdUserSupervisor;

impl SystemdUserSupervisor {
    pub fn new() -> Self {
        Self
    }

    fn systemctl(&self, args: &[&str]) -> Result<Output> {
        debug!("Running command: systemctl --user {}", args.join(" "));
        Command::new("systemctl")
            .arg("--user")
            .args(args)
            .output()
            .context("Failed to execute systemctl")
    }

    fn run_checked(&self, args: &[&str]) -> Result<()> {
        let output = self.systemctl(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "systemctl --user {} failed: {}",
                args.join(" "),
                stderr.trim()
            );
        }
        Ok(())
    }
}

/// Reachability judged purely on whether the query reached a manager: a
/// failed spawn or a non-zero exit means no, stderr text is never inspected.
fn manager_answered(result: Result<Output>) -> bool {
    result.map(|output| output.status.success()).unwrap_or(false)
}

impl Default for SystemdUserSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor for SystemdUserSupervisor {
    fn is_reachable(&self) -> bool {
        // `show` answers from the manager itself and exits zero whenever the
        // bus connection worked, regardless of run state or locale, unlike
        // `is-system-running` which exits non-zero for a degraded manager.
        manager_answered(self.systemctl(&["show", "--property=Version", "--no-pager"]))
    }

    fn reload_definitions(&self) -> Result<()> {
        self.run_checked(&["daemon-reload"])
    }

    fn enable(&self, unit: &str) -> Result<()> {
        self.run_checked(&["enable", unit])
    }

    fn is_active(&self, unit: &str) -> bool {
        // is-active exits non-zero for inactive units; either way the answer
        // is a plain boolean, never an error.
        self.systemctl(&["is-active", "--quiet", unit])
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn start(&self, unit: &str) -> Result<()> {
        self.run_checked(&["start", unit])
    }

    fn restart(&self, unit: &str) -> Result<()> {
        self.run_checked(&["restart", unit])
    }

    fn stop(&self, unit: &str) -> Result<()> {
        self.run_checked(&["stop", unit])
    }

    fn disable(&self, unit: &str) -> Result<()> {
        self.run_checked(&["disable", unit])
    }
}
