//! Storage configuration loaded from the environment.
//!
//! Variables use the `DAILY_QUOTA_` prefix:
//!
//! - `DAILY_QUOTA_BACKEND`: `postgres` or `sqlite` (the legacy environment
//!   codes `D`/`docker` and `T`/`test` are accepted as aliases)
//! - `DAILY_QUOTA_DATABASE_URL`: connection string or `SQLite` file path
//! - `DAILY_QUOTA_MAX_CONNECTIONS`: pool size, defaults to 10

use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "DAILY_QUOTA";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Relational backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `PostgreSQL` server reachable through a connection URL.
    #[serde(alias = "D", alias = "docker")]
    Postgres,
    /// `SQLite` database file.
    #[serde(alias = "T", alias = "test")]
    Sqlite,
}

/// Settings needed to build the storage connection pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Backend to connect to.
    pub backend: StorageBackend,
    /// Connection URL (`PostgreSQL`) or database path (`SQLite`).
    pub database_url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

const fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialised.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// The pool size is zero.
    #[error("max_connections must be at least 1")]
    ZeroConnections,

    /// The database URL is blank.
    #[error("database_url must not be blank")]
    BlankDatabaseUrl,
}

impl StorageConfig {
    /// Creates a configuration with the default pool size.
    #[must_use]
    pub fn new(backend: StorageBackend, database_url: impl Into<String>) -> Self {
        Self {
            backend,
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Overrides the pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Loads configuration from `DAILY_QUOTA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()
    }

    /// Checks invariants that deserialisation cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroConnections`] or
    /// [`ConfigError::BlankDatabaseUrl`].
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::BlankDatabaseUrl);
        }
        Ok(self)
    }
}
