//! Application settings, read from an optional `settings.toml` next to the
//! binary and overridden by `FINANCAS_*` environment variables
//! (`FINANCAS_SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub port: u16,
    pub bind: Option<String>,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 3000)?
            .set_default("server.database", "memory")?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("FINANCAS").separator("__"))
            .build()?
            .try_deserialize()
    }
}
