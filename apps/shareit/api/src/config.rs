use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Where the repositories keep their data, selected by `STORAGE`
#[derive(Clone, Debug)]
pub enum StorageConfig {
    /// Process memory; everything is lost on restart
    Memory,
    Postgres(PostgresConfig),
}

impl FromEnv for StorageConfig {
    /// - STORAGE: `postgres` (default) or `memory`
    /// - DATABASE_URL and the `DB_*` pool settings when using postgres
    fn from_env() -> Result<Self, ConfigError> {
        match env_or_default("STORAGE", "postgres").as_str() {
            "postgres" => Ok(StorageConfig::Postgres(PostgresConfig::from_env()?)),
            "memory" => Ok(StorageConfig::Memory),
            other => Err(ConfigError::ParseError {
                key: "STORAGE".to_string(),
                details: format!("expected 'postgres' or 'memory', got '{}'", other),
            }),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let storage = StorageConfig::from_env()?;
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 unless set

        Ok(Self {
            app: app_info!(),
            storage,
            server,
            environment,
        })
    }
}
