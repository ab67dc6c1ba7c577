use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobboard_server::config::{AppConfig, CliConfig, FileConfig};
use jobboard_server::{run_server, RequestsLoggingLevel, ServerConfig, SqliteBoardStore};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the jobboard.db SQLite file, created on first start.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Directory served under /static.
    #[clap(long, value_parser = parse_path)]
    pub static_dir: Option<PathBuf>,

    /// TOML file whose values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config = CliConfig {
        db_dir: cli_args.db_dir,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        static_dir: cli_args.static_dir,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let db_path = config.board_db_path();
    info!("Opening SQLite board database at {:?}...", db_path);
    let store = Arc::new(SqliteBoardStore::new(&db_path)?);

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level,
        port: config.port,
        static_dir: config.static_dir,
    };
    info!("Ready to serve at port {}!", server_config.port);
    run_server(server_config, store).await
}
