use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Placeholder value shipped in the default configuration. A key equal to it
/// means no credential was actually supplied.
pub const API_KEY_SENTINEL: &str = "YOUR_TMDB_API_KEY_HERE";

/// Connection settings for the movie metadata provider (TMDB).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key sent as the `api_key` query parameter.
    pub api_key: String,
    /// Base URL of the REST API, without a trailing category path.
    pub base_url: String,
    /// Prefix joined with poster paths returned by the provider.
    pub image_base_url: String,
    /// Prefix joined with backdrop paths returned by the provider.
    pub backdrop_base_url: String,
    /// Value of the `language` query parameter.
    pub language: String,
}

impl ProviderConfig {
    /// Returns the configured API key, or `None` when it is empty or still the
    /// shipped placeholder. `None` selects the bundled fallback dataset.
    pub fn credential(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() || key == API_KEY_SENTINEL {
            None
        } else {
            Some(key)
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: API_KEY_SENTINEL.to_string(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            backdrop_base_url: "https://image.tmdb.org/t/p/w780".to_string(),
            language: "en-US".to_string(),
        }
    }
}

/// Artificial delays applied before a fetch so that busy indicators stay
/// visible. Not a timeout and not a backoff.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchDelays {
    /// Delay before the first load, in milliseconds.
    pub initial_load_ms: u64,
    /// Delay before a pull-to-refresh, in milliseconds.
    pub refresh_ms: u64,
}

impl FetchDelays {
    /// Zero delays, for tests and headless use.
    pub const NONE: FetchDelays = FetchDelays {
        initial_load_ms: 0,
        refresh_ms: 0,
    };

    /// Delay to apply for a fetch of the given kind.
    pub fn for_fetch(&self, is_refresh: bool) -> Duration {
        if is_refresh {
            Duration::from_millis(self.refresh_ms)
        } else {
            Duration::from_millis(self.initial_load_ms)
        }
    }
}

impl Default for FetchDelays {
    fn default() -> Self {
        Self {
            initial_load_ms: 300,
            refresh_ms: 600,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Movie metadata provider settings.
    pub provider: ProviderConfig,
    /// Spinner visibility delays.
    pub fetch_delays: FetchDelays,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_empty_keys_mean_no_credential() {
        let mut provider = ProviderConfig::default();
        assert_eq!(provider.credential(), None);

        provider.api_key = String::new();
        assert_eq!(provider.credential(), None);

        provider.api_key = "   ".to_string();
        assert_eq!(provider.credential(), None);

        provider.api_key = "abc123".to_string();
        assert_eq!(provider.credential(), Some("abc123"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[provider]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.provider.api_key, "k");
        assert_eq!(config.provider.language, "en-US");
        assert_eq!(config.fetch_delays, FetchDelays::default());
    }

    #[test]
    fn delays_pick_the_fetch_kind() {
        let delays = FetchDelays::default();
        assert_eq!(delays.for_fetch(false), Duration::from_millis(300));
        assert_eq!(delays.for_fetch(true), Duration::from_millis(600));
        assert_eq!(FetchDelays::NONE.for_fetch(true), Duration::ZERO);
    }
}
