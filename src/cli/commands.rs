//! CLI command implementations
//!
//! `init` seeds everything the server needs; `start` loads the config,
//! wires the states together, and serves.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::auth::credentials::DEFAULT_ADMIN_EMAIL;
use crate::auth::{CredentialsFile, SessionRegistry};
use crate::content::{ContentDocument, ContentStore};
use crate::http_server::{AuthState, ContentState, HttpServer, HttpServerConfig};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Content document file name inside the data directory
const CONTENT_FILE: &str = "content.json";

/// Admin credentials file name inside the data directory
const CREDENTIALS_FILE: &str = "admin.json";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory holding the content document and admin credentials
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Session lifetime in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_session_ttl_hours() -> i64 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            http: HttpServerConfig::default(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let bytes = fs::read(path).map_err(|e| {
            CliError::not_initialized(format!("cannot read config {}: {}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| CliError::config_error(format!("{}: {}", path.display(), e)))
    }

    /// Write config to a JSON file
    pub fn write(&self, path: &Path) -> CliResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::config_error(e.to_string()))?;
        fs::write(path, json).map_err(CliError::from)
    }
}

/// Parse arguments and dispatch to the chosen command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Initialize config, data directory, content document, and admin login
///
/// Idempotent: existing files are left untouched.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        let config = Config::default();
        config.write(config_path)?;
        println!("Created config: {}", config_path.display());
        config
    };

    let data_dir = Path::new(&config.data_dir);
    fs::create_dir_all(data_dir)?;

    let store = ContentStore::new(data_dir.join(CONTENT_FILE));
    if !store.path().exists() {
        store
            .save(&ContentDocument::new())
            .map_err(|e| CliError::io_error(e.to_string()))?;
        println!("Created content document: {}", store.path().display());
    }

    let credentials = CredentialsFile::new(data_dir.join(CREDENTIALS_FILE));
    if !credentials.exists() {
        credentials
            .bootstrap()
            .map_err(|e| CliError::io_error(e.to_string()))?;
        println!(
            "Created admin credentials ({}), change the default password after first login",
            DEFAULT_ADMIN_EMAIL
        );
    }

    println!("Initialized data directory: {}", data_dir.display());
    Ok(())
}

/// Load the config and serve until the process is stopped
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data_dir = Path::new(&config.data_dir);

    if !data_dir.exists() {
        return Err(CliError::not_initialized(format!(
            "data directory {} does not exist, run `foliocms init` first",
            data_dir.display()
        )));
    }

    let content = Arc::new(ContentState::new(ContentStore::new(
        data_dir.join(CONTENT_FILE),
    )));

    let credentials = CredentialsFile::new(data_dir.join(CREDENTIALS_FILE));
    // Lazily seed the default login if init predates the auth surface
    credentials
        .bootstrap()
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    let sessions = SessionRegistry::new(Duration::hours(config.session_ttl_hours));
    let auth = Arc::new(AuthState::new(credentials, sessions));

    let server = HttpServer::new(config.http.clone(), content, auth);
    Logger::info(
        "SERVER_BOOT",
        &[
            ("addr", &server.socket_addr()),
            ("data_dir", &config.data_dir),
        ],
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.http.port, 3000);
    }

    #[test]
    fn test_init_seeds_files() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("foliocms.json");

        // point the data dir inside the temp dir
        let config = Config {
            data_dir: temp.path().join("data").display().to_string(),
            ..Default::default()
        };
        config.write(&config_path).unwrap();

        init(&config_path).unwrap();

        let data_dir = temp.path().join("data");
        assert!(data_dir.join(CONTENT_FILE).exists());
        assert!(data_dir.join(CREDENTIALS_FILE).exists());

        // idempotent
        init(&config_path).unwrap();
    }

    #[test]
    fn test_start_without_init_fails() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("missing.json");

        let err = start(&config_path).unwrap_err();
        assert_eq!(err.code(), &super::super::errors::CliErrorCode::NotInitialized);
    }
}
