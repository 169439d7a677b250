//! Configuration Module
//!
//! Handles loading server and store configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which repository implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MySQL table accessed through a connection pool
    MySql,
    /// Process-local map, for demos and tests
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Connection parameters for the student store.
///
/// Read once at startup and handed to the repository constructor; never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "alumnos".to_string(),
            max_connections: 10,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Store connection parameters
    pub store: StoreConfig,
    /// Repository implementation to use
    pub backend: StoreBackend,
    /// Directory receiving uploaded files
    pub upload_dir: PathBuf,
    /// Base API-description document served on `/options`
    pub options_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3001)
    /// - `MYSQLHOST` - Store host (default: localhost)
    /// - `MYSQLPORT` - Store port (default: 3306)
    /// - `MYSQLUSER` - Store user (default: root)
    /// - `MYSQLPASSWORD` - Store password (default: empty)
    /// - `MYSQL_DATABASE` - Schema name (default: alumnos)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
    /// - `STORE_BACKEND` - `mysql` or `memory` (default: mysql)
    /// - `UPLOAD_DIR` - Upload directory (default: archivos)
    /// - `API_OPTIONS_PATH` - Base API description (default: Options.json)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            server_port: parse_or(lookup("PORT"), defaults.server_port),
            store: StoreConfig {
                host: lookup("MYSQLHOST").unwrap_or(defaults.store.host),
                port: parse_or(lookup("MYSQLPORT"), defaults.store.port),
                user: lookup("MYSQLUSER").unwrap_or(defaults.store.user),
                password: lookup("MYSQLPASSWORD").unwrap_or(defaults.store.password),
                database: lookup("MYSQL_DATABASE").unwrap_or(defaults.store.database),
                max_connections: parse_or(
                    lookup("DB_MAX_CONNECTIONS"),
                    defaults.store.max_connections,
                ),
            },
            backend: parse_or(lookup("STORE_BACKEND"), defaults.backend),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            options_path: lookup("API_OPTIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.options_path),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3001,
            store: StoreConfig::default(),
            backend: StoreBackend::MySql,
            upload_dir: PathBuf::from("archivos"),
            options_path: PathBuf::from("Options.json"),
        }
    }
}
