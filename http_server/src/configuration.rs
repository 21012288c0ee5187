use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use shared_kernel::configuration::config_with_file;
use sqlx_postgres::configuration::DbSettings;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub storage: StorageSettings,
    /// Only read when `storage.backend` is `postgres`.
    pub database: Option<DbSettings>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Self> {
        let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
        config_with_file::<Settings>(file)
    }
}

#[cfg(test)]
mod tests {
    use super::{Settings, StorageBackend};
    use rstest::rstest;

    #[test]
    fn test_that_test_settings_use_the_memory_backend() {
        let settings = Settings::parse().unwrap();
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert_eq!(settings.application.address(), ("127.0.0.1".to_string(), 8080));
        assert!(settings.database.is_none());
    }

    #[rstest]
    #[case("\"memory\"", StorageBackend::Memory)]
    #[case("\"postgres\"", StorageBackend::Postgres)]
    fn test_known_backends(#[case] raw: &str, #[case] expected: StorageBackend) {
        let backend: StorageBackend = serde_json::from_str(raw).unwrap();
        assert_eq!(backend, expected);
    }

    #[rstest]
    #[case("\"redis\"")]
    #[case("\"Memory\"")]
    #[case("\"\"")]
    fn test_unknown_backends_are_rejected(#[case] raw: &str) {
        assert!(serde_json::from_str::<StorageBackend>(raw).is_err());
    }
}
