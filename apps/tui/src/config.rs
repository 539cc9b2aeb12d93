use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DATABASE_NAME: &str = "rfc-finder.db";
pub const DEFAULT_LOG_FILE: &str = "rfc-finder.log";
pub const DEFAULT_ANIMATION_MS: u64 = 2000;
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("invalid database path: {0}")]
    InvalidPath(String),
    #[error("cannot resolve working directory: {0}")]
    WorkingDirectory(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub database_url: String,
    /// URL of the page the user is reading, if any.
    pub page_url: Option<String>,
    pub animation: Duration,
    pub api_timeout: Duration,
    pub log_file: PathBuf,
}

/// Initializes the application configuration from `.env` and the environment
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();
    let base_dir = env::current_dir()?;
    AppConfig::from_lookup(&base_dir, |key| env::var(key).ok())
}

impl AppConfig {
    pub fn from_lookup(
        base_dir: &std::path::Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = lookup("API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let db_name =
            lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
        let database_url = database_url(&base_dir.join(db_name))?;

        let page_url = lookup("PAGE_URL").filter(|value| !value.trim().is_empty());

        let animation_ms = parse_number("ANIMATION_MS", lookup("ANIMATION_MS"), DEFAULT_ANIMATION_MS)?;
        let timeout_secs = parse_number(
            "API_TIMEOUT_SECS",
            lookup("API_TIMEOUT_SECS"),
            DEFAULT_API_TIMEOUT_SECS,
        )?;

        let log_file = lookup("LOG_FILE")
            .map_or_else(|| base_dir.join(DEFAULT_LOG_FILE), PathBuf::from);

        Ok(Self {
            api_url,
            database_url,
            page_url,
            animation: Duration::from_millis(animation_ms),
            api_timeout: Duration::from_secs(timeout_secs),
            log_file,
        })
    }
}

fn parse_number(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}

/// Formats a SQLite URL for SQLx
/// - absolute paths: sqlite:///absolute/path/to/file.db (3 slashes total)
/// - relative paths: sqlite://relative/path/to/file.db (2 slashes total)
fn database_url(database_path: &std::path::Path) -> Result<String, ConfigError> {
    let path_str = database_path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(database_path.display().to_string()))?;

    let clean_path = path_str.trim_start_matches('/');

    if database_path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}
