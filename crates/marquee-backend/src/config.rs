use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use marquee_bridge::config::Config;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g. `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the
    /// expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "marquee", "marquee")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ConfigError::DirectoriesNotFound)
}

/// Loads the application configuration from the user's config directory.
pub async fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_dir()?).await
}

/// Loads `config.toml` from `dir`. A missing file is created with the
/// default configuration, which points at the bundled catalog.
pub async fn load_config_from(dir: &Path) -> Result<Config, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        return Ok(toml::from_str(&contents)?);
    }

    let config = Config::default();
    create_dir_all(dir).await?;

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use marquee_bridge::config::{API_KEY_SENTINEL, FetchDelays};
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("marquee");

        let config = load_config_from(&nested).await.unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.provider.api_key, API_KEY_SENTINEL);
        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn existing_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.provider.api_key = "live-key".to_string();
        config.fetch_delays = FetchDelays::NONE;

        let contents = toml::to_string_pretty(&config).unwrap();
        tokio::fs::write(dir.path().join(CONFIG_FILE_NAME), contents)
            .await
            .unwrap();
        let loaded = load_config_from(dir.path()).await.unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.provider.credential(), Some("live-key"));
    }

    #[tokio::test]
    async fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(CONFIG_FILE_NAME), "provider = [")
            .await
            .unwrap();

        let error = load_config_from(dir.path()).await.unwrap_err();
        assert!(matches!(error, ConfigError::DeserializeError(_)));
    }
}
