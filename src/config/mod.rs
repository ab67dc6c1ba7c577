mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

const BOARD_DB_FILE_NAME: &str = "jobboard.db";

/// CLI arguments that can be used for config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {}", s),
            },
            None => cli.logging_level.clone(),
        };

        let static_dir = file
            .static_dir
            .map(PathBuf::from)
            .or_else(|| cli.static_dir.clone());
        if let Some(static_dir) = &static_dir {
            if !static_dir.is_dir() {
                bail!("static_dir is not a directory: {:?}", static_dir);
            }
        }

        Ok(Self {
            db_dir,
            port,
            logging_level,
            static_dir,
        })
    }

    pub fn board_db_path(&self) -> PathBuf {
        self.db_dir.join(BOARD_DB_FILE_NAME)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
