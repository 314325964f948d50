use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::constants::binaries;

#[cfg(test)]
mod tests;

/// How much of PyViewer stops working when a binary is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Installation cannot proceed
    Required,
    /// Major features (FFmpeg streaming, audio) are unavailable
    Recommended,
    /// Minor features (GPU encoder detection) are unavailable
    Optional,
}

/// Result of probing one external binary
#[derive(Debug, Clone, Serialize)]
pub struct BinaryCheck {
    pub name: String,
    pub severity: Severity,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Everything the installer learned about the host environment
#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub checks: Vec<BinaryCheck>,
    /// First available Wayland screenshot tool, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wayland_capture_tool: Option<String>,
}

impl DoctorReport {
    /// All required binaries are present
    pub fn is_installable(&self) -> bool {
        self.checks
            .iter()
            .filter(|c| c.severity == Severity::Required)
            .all(|c| c.found)
    }

    /// Required binaries that were not found
    pub fn missing_required(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.severity == Severity::Required && !c.found)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Human-readable summary, one line per check
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for check in &self.checks {
            let status = match (&check.found, check.severity) {
                (true, _) => "ok",
                (false, Severity::Required) => "MISSING (required)",
                (false, Severity::Recommended) => "missing (recommended)",
                (false, Severity::Optional) => "missing (optional)",
            };
            lines.push(format!("  {:<18} {}", check.name, status));
        }
        match &self.wayland_capture_tool {
            Some(tool) => lines.push(format!("  {:<18} ok ({})", "wayland capture", tool)),
            None => lines.push(format!(
                "  {:<18} missing (optional, any of: {})",
                "wayland capture",
                binaries::WAYLAND_CAPTURE.join(", ")
            )),
        }
        lines.join("\n")
    }
}

fn probe(name: &str, severity: Severity) -> BinaryCheck {
    let path = which::which(name).ok();
    debug!("Probed {}: {:?}", name, path);
    BinaryCheck {
        name: name.to_string(),
        severity,
        found: path.is_some(),
        path,
    }
}

/// Probe every external binary the PyViewer server uses at runtime.
pub fn run() -> DoctorReport {
    let mut checks = Vec::new();

    for name in binaries::REQUIRED {
        checks.push(probe(name, Severity::Required));
    }
    for name in binaries::RECOMMENDED {
        checks.push(probe(name, Severity::Recommended));
    }
    for name in binaries::OPTIONAL {
        checks.push(probe(name, Severity::Optional));
    }

    let wayland_capture_tool = binaries::WAYLAND_CAPTURE
        .iter()
        .find(|tool| which::which(tool).is_ok())
        .map(|tool| tool.to_string());

    DoctorReport {
        checks,
        wayland_capture_tool,
    }
}
