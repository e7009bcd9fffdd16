//! Process-wide configuration, built once at startup and passed to the backend.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file,
//! `EXPENSE_TRACKER_*` environment variables, then command line flags.

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "expense-tracker.toml";
const ENV_PREFIX: &str = "EXPENSE_TRACKER";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the expense file and default exports
    pub data_directory: PathBuf,
    pub expense_file_name: String,
    /// Address the REST interface listens on
    pub bind_address: String,
    /// Origin allowed to call the REST interface from a browser frontend
    pub allowed_origin: String,
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            expense_file_name: "expenses.csv".to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults with the data directory replaced, used by tests and embedders
    pub fn for_directory<P: AsRef<Path>>(data_directory: P) -> Self {
        Self {
            data_directory: data_directory.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn expense_file_path(&self) -> PathBuf {
        self.data_directory.join(&self.expense_file_name)
    }
}

/// ~/Documents/Expense Tracker, or the working directory if there is no documents folder
fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .map(|documents| documents.join("Expense Tracker"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Default, Parser)]
#[command(name = "expense-tracker", about = "Expense Tracker backend")]
pub struct CliArgs {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the data directory.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Override the listen address (e.g. 127.0.0.1:3000).
    #[arg(long)]
    pub bind: Option<String>,
    /// Override the log level (e.g. debug).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Load configuration from the process arguments and environment
pub fn load() -> Result<AppConfig> {
    load_from(CliArgs::parse())
}

pub fn load_from(args: CliArgs) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = args.data_dir {
        settings.data_directory = data_dir;
    }
    if let Some(bind) = args.bind {
        settings.bind_address = bind;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
