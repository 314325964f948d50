#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "pyviewer");
        assert_eq!(config.python_interpreter, "python3");
        assert!(config.install_dir.is_none());
        assert!(config.extra_packages.is_empty());
        assert_eq!(config.restart_sec, 5);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
service_name = "pyviewer-test"
extra_packages = ["numpy"]
"#,
        )
        .unwrap();
        assert_eq!(config.service_name, "pyviewer-test");
        assert_eq!(config.extra_packages, vec!["numpy"]);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.python_interpreter, "python3");
        assert_eq!(config.restart_sec, 5);
    }

    #[test]
    fn test_explicit_install_dir_wins() {
        let config = Config {
            install_dir: Some(PathBuf::from("/opt/pyviewer")),
            ..Config::default()
        };
        assert_eq!(config.install_dir().unwrap(), PathBuf::from("/opt/pyviewer"));
    }
}
