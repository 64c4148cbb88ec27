//! Config file location, reading, and writing.
//!
//! The config file lives in the user configuration directory, e.g.
//! `~/.config/sntr/config.json` on Linux. Reading goes through the JSON5
//! parser, which accepts plain JSON as well; writing always produces
//! pretty-printed JSON.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Directory name under the user config directory.
const CONFIG_DIR: &str = "sntr";

/// Config file name inside [`CONFIG_DIR`].
const CONFIG_FILE: &str = "config.json";

/// Returns the sntr configuration directory.
///
/// This is typically `~/.config/sntr/` on Unix systems.
///
/// # Errors
///
/// Returns an error if the user config directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR))
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the default configuration file path.
///
/// This is typically `~/.config/sntr/config.json`.
///
/// # Errors
///
/// Returns an error if the user config directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Reads and parses a configuration file.
///
/// Accepts both JSON and JSON5 content.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if its content is not
/// a valid configuration (empty files and syntax errors are reported with
/// the offending path).
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json5::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes a configuration to a file as pretty-printed JSON.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the value
/// cannot be serialized, or the file cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        value: i32,
    }

    #[test]
    fn read_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        std::fs::write(&path, r#"{"name": "test", "value": 42}"#).unwrap();

        let config: TestConfig = read_config_file(&path).unwrap();
        assert_eq!(config.name, "test");
        assert_eq!(config.value, 42);
    }

    #[test]
    fn read_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        std::fs::write(
            &path,
            r#"
            {
                // Comments are tolerated
                name: "test",
                value: 42,
            }
            "#,
        )
        .unwrap();

        let config: TestConfig = read_config_file(&path).unwrap();
        assert_eq!(config.name, "test");
    }

    #[test]
    fn read_nonexistent_file() {
        let result: Result<TestConfig> = read_config_file("/nonexistent/path.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_empty_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "").unwrap();

        let result: Result<TestConfig> = read_config_file(&path);
        match result {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result: Result<TestConfig> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn write_and_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roundtrip.json");

        let original = TestConfig {
            name: "test".to_string(),
            value: 42,
        };

        write_config_file(&path, &original).unwrap();
        let loaded: TestConfig = read_config_file(&path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dirs").join("config.json");

        let config = TestConfig {
            name: "test".to_string(),
            value: 42,
        };

        write_config_file(&path, &config).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn default_config_path_ends_with_expected_names() {
        // May fail only in environments without a config directory
        if dirs::config_dir().is_some() {
            let path = default_config_path().unwrap();
            assert!(path.ends_with("sntr/config.json"));
        }
    }
}
