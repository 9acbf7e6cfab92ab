//! # configs
//!
//! Runtime settings for the Postboard server.
//!
//! Sources, later ones winning: built-in defaults, an optional
//! `postboard.toml` in the working directory, then `POSTBOARD__*` environment
//! variables (`POSTBOARD__SERVER__PORT=9000`). A `.env` file is loaded into
//! the environment first if present.

use config::{Config, ConfigBuilder, Environment, File, Source};
use config::builder::DefaultState;
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "POSTBOARD";
const CONFIG_FILE: &str = "postboard";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// sqlx connection URL, e.g. `sqlite:postboard.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
}

impl Settings {
    /// Loads `.env`, the optional config file and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("loaded environment from {}", path.display());
        }
        Self::from_sources(
            File::with_name(CONFIG_FILE).required(false),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn from_sources<S>(file: S, env: Environment) -> Result<Self, SettingsError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Self::defaults()?
            .add_source(file)
            .add_source(env.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite:postboard.db")?
            .set_default("database.max_connections", 5)
    }

    /// `host:port` for the listening socket.
    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
