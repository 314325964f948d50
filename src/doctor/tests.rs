#[cfg(test)]
mod tests {
    use super::super::*;

    fn check(name: &str, severity: Severity, found: bool) -> BinaryCheck {
        BinaryCheck {
            name: name.to_string(),
            severity,
            found,
            path: found.then(|| PathBuf::from(format!("/usr/bin/{}", name))),
        }
    }

    #[test]
    fn test_installable_when_required_present() {
        let report = DoctorReport {
            checks: vec![
                check("python3", Severity::Required, true),
                check("systemctl", Severity::Required, true),
                check("ffmpeg", Severity::Recommended, false),
            ],
            wayland_capture_tool: None,
        };
        assert!(report.is_installable());
        assert!(report.missing_required().is_empty());
    }

    #[test]
    fn test_not_installable_when_required_missing() {
        let report = DoctorReport {
            checks: vec![
                check("python3", Severity::Required, false),
                check("systemctl", Severity::Required, true),
            ],
            wayland_capture_tool: None,
        };
        assert!(!report.is_installable());
        assert_eq!(report.missing_required(), vec!["python3"]);
    }

    #[test]
    fn test_summary_marks_missing_binaries() {
        let report = DoctorReport {
            checks: vec![
                check("python3", Severity::Required, true),
                check("ffmpeg", Severity::Recommended, false),
                check("lspci", Severity::Optional, false),
            ],
            wayland_capture_tool: Some("grim".to_string()),
        };
        let summary = report.summary();
        assert!(summary.contains("python3"));
        assert!(summary.contains("missing (recommended)"));
        assert!(summary.contains("missing (optional)"));
        assert!(summary.contains("ok (grim)"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = DoctorReport {
            checks: vec![check("ffmpeg", Severity::Recommended, true)],
            wayland_capture_tool: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"name\":\"ffmpeg\""));
        assert!(json.contains("\"severity\":\"recommended\""));
        assert!(!json.contains("wayland_capture_tool"));
    }

    #[test]
    fn test_run_probes_all_constant_binaries() {
        let report = run();
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"python3"));
        assert!(names.contains(&"systemctl"));
        assert!(names.contains(&"ffmpeg"));
        assert!(names.contains(&"parec"));
        assert!(names.contains(&"pactl"));
        assert!(names.contains(&"lspci"));
    }
}
