use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML config file. Every value present here wins over the CLI.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub db_dir: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub static_dir: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080\nlogging_level = \"headers\"").unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.logging_level.as_deref(), Some("headers"));
        assert!(config.db_dir.is_none());
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn rejects_malformed_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
