use marquee_bridge::config::Config;

use crate::source::CatalogSource;

/// Backend resources shared across service handlers: the configuration and
/// the catalog source derived from it.
///
/// The catalog session itself lives in [`crate::store::Store`]; this struct
/// only holds what is needed to produce it.
#[derive(Debug, Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: Config,
    /// Where fetches read the catalog from. Holds the shared, pooled HTTP
    /// client when the provider is used.
    pub source: CatalogSource,
}

impl State {
    pub fn new(config: Config, request_client: reqwest::Client) -> Self {
        let source = CatalogSource::from_config(&config.provider, request_client);
        Self { config, source }
    }
}

/// Thread-safe, async-friendly shared reference to the backend [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
