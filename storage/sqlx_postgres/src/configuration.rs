use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use shared_kernel::configuration::config_with_file;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database: DbSettings,
}

type DbName = String;

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    username: String,
    password: Secret<String>,
    database_name: DbName,
    require_ssl: bool,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    acquire_timeout_secs: u64,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Self> {
        let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
        config_with_file::<Settings>(file)
    }
}

impl DbSettings {
    pub fn without_db(&self) -> (PgConnectOptions, DbName) {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        (
            PgConnectOptions::new()
                .host(&self.host)
                .username(&self.username)
                .password(self.password.expose_secret())
                .port(self.port)
                .ssl_mode(ssl_mode),
            self.database_name.clone(),
        )
    }

    pub fn with_db(&self) -> PgConnectOptions {
        let (options, database_name) = self.without_db();
        options.database(&database_name)
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}
