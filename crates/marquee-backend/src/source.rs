//! Catalog source adapter.
//!
//! Translates the movie provider's list responses into [`CatalogItem`]s and
//! selects the bundled fallback dataset when no credential is configured.

use marquee_bridge::{
    catalog::{CatalogItem, Category},
    config::ProviderConfig,
};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::{fallback::fallback_catalog, genres::genre_labels};

/// Title used for records that come without one.
pub const UNTITLED: &str = "Untitled";
/// Synopsis used for records that come without one.
pub const NO_OVERVIEW: &str = "No overview available.";

/// Errors raised while loading one category from the provider.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The configured base URL cannot be turned into a request URL.
    #[error("invalid provider URL {url:?}")]
    InvalidUrl { url: String },
    /// The request could not be sent or the connection failed.
    #[error("request for {category} failed: {source}")]
    Transport {
        category: Category,
        #[source]
        source: reqwest::Error,
    },
    /// The provider answered with a non-success status.
    #[error("request for {category} returned HTTP {status}")]
    Status {
        category: Category,
        status: StatusCode,
    },
    /// The response body is not a valid list response.
    #[error("failed to decode {category} response: {source}")]
    Decode {
        category: Category,
        #[source]
        source: reqwest::Error,
    },
}

/// One record of a provider list response. Every descriptive field may be
/// missing or `null`.
#[derive(Debug, Deserialize)]
struct RawMovie {
    id: u64,
    title: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    genre_ids: Option<Vec<u32>>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Option<Vec<RawMovie>>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn join_image(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Normalizes a provider record into a catalog item of `category`.
fn map_record(raw: RawMovie, category: Category, config: &ProviderConfig) -> CatalogItem {
    let genre_ids = raw.genre_ids.unwrap_or_default();
    let genres = genre_labels(&genre_ids);
    CatalogItem {
        id: raw.id,
        title: non_empty(raw.title).unwrap_or_else(|| UNTITLED.to_string()),
        overview: non_empty(raw.overview).unwrap_or_else(|| NO_OVERVIEW.to_string()),
        poster_url: non_empty(raw.poster_path)
            .map(|path| join_image(&config.image_base_url, &path))
            .unwrap_or_default(),
        backdrop_url: non_empty(raw.backdrop_path)
            .map(|path| join_image(&config.backdrop_base_url, &path)),
        content_rating: None,
        release_date: raw.release_date.unwrap_or_default(),
        genre_ids,
        genres,
        category,
        store_url: None,
    }
}

/// HTTP client for the provider's category list endpoints.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    config: ProviderConfig,
    api_key: String,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, config: ProviderConfig, api_key: impl Into<String>) -> Self {
        Self {
            client,
            config,
            api_key: api_key.into(),
        }
    }

    /// Builds `<base>/movie/<category>?api_key=..&language=..&page=1`.
    fn category_url(&self, category: Category) -> Result<Url, SourceError> {
        let endpoint = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            category.api_path()
        );
        Url::parse_with_params(
            &endpoint,
            &[
                ("api_key", self.api_key.as_str()),
                ("language", self.config.language.as_str()),
                ("page", "1"),
            ],
        )
        .map_err(|_| SourceError::InvalidUrl { url: endpoint })
    }

    /// Fetches and normalizes the first page of one category.
    pub async fn fetch_category(&self, category: Category) -> Result<Vec<CatalogItem>, SourceError> {
        let url = self.category_url(category)?;
        // the query carries the API key, so only the path is logged
        log::debug!("Requesting {category} from {}", url.path());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                category,
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { category, status });
        }

        let body: ListResponse = response.json().await.map_err(|source| SourceError::Decode {
            category,
            source: source.without_url(),
        })?;

        let results = body.results.unwrap_or_default();
        log::debug!("Received {} records for {category}", results.len());
        Ok(results
            .into_iter()
            .map(|raw| map_record(raw, category, &self.config))
            .collect())
    }
}

/// Where the catalog comes from for the current configuration.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// No credential configured; the bundled dataset is served as-is.
    Bundled,
    /// Live data from the provider.
    Tmdb(TmdbClient),
}

impl CatalogSource {
    /// Picks the live provider when a real credential is configured and the
    /// bundled dataset otherwise.
    pub fn from_config(config: &ProviderConfig, client: reqwest::Client) -> Self {
        match config.credential() {
            Some(key) => CatalogSource::Tmdb(TmdbClient::new(client, config.clone(), key)),
            None => CatalogSource::Bundled,
        }
    }

    pub fn is_bundled(&self) -> bool {
        matches!(self, CatalogSource::Bundled)
    }

    /// Loads the complete catalog: one sequential request per category,
    /// concatenated in enumeration order. The first failing category aborts
    /// the whole load.
    pub async fn load_catalog(&self) -> Result<Vec<CatalogItem>, SourceError> {
        match self {
            CatalogSource::Bundled => Ok(fallback_catalog()),
            CatalogSource::Tmdb(client) => {
                let mut items = Vec::new();
                for category in Category::ALL {
                    items.extend(client.fetch_category(category).await?);
                }
                Ok(items)
            }
        }
    }
}
