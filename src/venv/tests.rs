#[cfg(test)]
mod tests {
    use super::super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_packages() {
        let dir = tempdir().unwrap();
        let builder = VenvBuilder::new(dir.path());
        assert_eq!(builder.packages, vec!["PyQt6", "Pillow", "mss", "pynput"]);
        assert_eq!(builder.interpreter, "python3");
    }

    #[test]
    fn test_with_extra_packages() {
        let dir = tempdir().unwrap();
        let builder = VenvBuilder::new(dir.path())
            .with_extra_packages(&["numpy".to_string(), "opencv-python".to_string()]);
        assert!(builder.packages.contains(&"numpy".to_string()));
        assert!(builder.packages.contains(&"opencv-python".to_string()));
        // Defaults are kept in front of the extras.
        assert_eq!(builder.packages[0], "PyQt6");
    }

    #[test]
    fn test_venv_paths() {
        let dir = tempdir().unwrap();
        let builder = VenvBuilder::new(dir.path());
        assert_eq!(builder.venv_dir(), dir.path().join("venv"));
        assert_eq!(builder.venv_bin("pip"), dir.path().join("venv/bin/pip"));
    }

    #[test]
    fn test_provision_with_missing_interpreter() {
        let dir = tempdir().unwrap();
        let builder = VenvBuilder::new(dir.path()).with_interpreter("nonexistent_python_12345");
        let result = builder.provision();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("create the virtual environment"));
    }
}
