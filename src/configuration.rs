use config::ConfigError;
use std::path::PathBuf;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub polka: PolkaSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Directory served under `/app`
    pub filepath_root: PathBuf,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Path of the JSON document backing the store
    pub path: PathBuf,
}

/// JWT signing settings. Token lifetimes are fixed per token kind and are not configurable.
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
}

/// Settings for the Polka payment webhook
#[derive(serde::Deserialize, Clone)]
pub struct PolkaSettings {
    pub api_key: String,
}

/// Reads `configuration.{yaml,toml,json}` from the working directory when present,
/// then overlays `APP_*` environment variables (`APP_JWT__SECRET`, `APP_DATABASE__PATH`, ...).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    dotenv::dotenv().ok();

    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 8080)?
        .set_default("application.filepath_root", ".")?
        .set_default("database.path", "database.json")?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
