use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Loads `Settings` from `./configuration` of the running process.
///
/// `base.yaml` is used for normal runs and `test.yaml` under `cfg!(test)`. Values
/// can be overridden with `APP_` prefixed environment variables, nested keys are
/// separated by `__`, e.g. `APP_DATABASE__PORT=5433`.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    config_with_file(file)
}

/// Same as [`config`] with an explicit file name. `cfg!(test)` only holds inside
/// the crate under test, so crates pick their own file when running tests.
pub fn config_with_file<Settings: DeserializeOwned>(file: &str) -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    config_from(&base_path.join("configuration").join(file))
}

pub fn config_from<Settings: DeserializeOwned>(file: &Path) -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::from(file))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build configuration from {}", file.display()))?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
