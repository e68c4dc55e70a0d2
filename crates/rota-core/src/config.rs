use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub schedule: ScheduleConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Path to the declarative schedule document.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the OAuth client credentials file.
    pub credentials_path: String,
    /// Path where the acquired token is cached between runs.
    pub token_path: String,
    /// Title of the task list obligations are recorded into.
    pub list_title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("schedule.path", "schedule.yaml")?
            .set_default("store.credentials_path", "credentials.json")?
            .set_default("store.token_path", "token.json")?
            .set_default("store.list_title", "Monthly Tasks")?
            .set_default("logging.level", "info")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let settings = Settings::load().expect("defaults alone should produce a valid config");
        assert_eq!(settings.schedule.path, "schedule.yaml");
        assert_eq!(settings.store.list_title, "Monthly Tasks");
        assert_eq!(settings.logging.level, "info");
    }
}
