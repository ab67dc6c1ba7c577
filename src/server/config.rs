use super::RequestsLoggingLevel;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Served under /static when set.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 5000,
            static_dir: None,
        }
    }
}
