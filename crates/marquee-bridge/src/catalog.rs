use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a catalog item, unique within a single fetch.
pub type ItemId = u64;

/// Fixed classification tag carried by every catalog item.
///
/// The declaration order is the enumeration order used when aggregating
/// category requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Movies currently showing in theatres.
    NowPlaying,
    Popular,
    TopRated,
    /// Movies with a release date in the near future.
    Upcoming,
}

impl Category {
    /// Every category, in enumeration order.
    pub const ALL: [Category; 4] = [
        Category::NowPlaying,
        Category::Popular,
        Category::TopRated,
        Category::Upcoming,
    ];

    /// Machine-readable name, as used by the provider and by filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NowPlaying => "now_playing",
            Category::Popular => "popular",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
        }
    }

    /// Human-readable label for filter chips and headings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::NowPlaying => "Now Playing",
            Category::Popular => "Popular",
            Category::TopRated => "Top Rated",
            Category::Upcoming => "Upcoming",
        }
    }

    /// Path of the provider endpoint listing this category, relative to the
    /// API base URL.
    pub fn api_path(&self) -> String {
        format!("movie/{}", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither a category nor `all`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category filter: {0:?}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// The user-selected lens over categories. `All` is only ever a filter value,
/// never an item attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns `true` when an item of `category` passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

/// One browsable movie, normalized into the application's shape.
///
/// Items are built once per fetch and never patched afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    /// Free-text synopsis.
    pub overview: String,
    /// Primary (portrait) image. Empty when the provider had none.
    pub poster_url: String,
    /// Secondary wide image.
    pub backdrop_url: Option<String>,
    /// Content/age rating such as `PG-13`.
    pub content_rating: Option<String>,
    /// ISO `YYYY-MM-DD` date, possibly empty.
    pub release_date: String,
    /// Provider genre identifiers, as received.
    pub genre_ids: Vec<u32>,
    /// Display labels for `genre_ids`, same order, duplicates kept.
    pub genres: Vec<String>,
    pub category: Category,
    /// External purchase or streaming link.
    pub store_url: Option<String>,
}

impl CatalogItem {
    /// The poster, or a seeded placeholder image when the item has none.
    pub fn poster_or_placeholder(&self) -> String {
        if self.poster_url.is_empty() {
            format!("https://picsum.photos/seed/movie-{}/400/600", self.id)
        } else {
            self.poster_url.clone()
        }
    }

    /// Image shown at the top of the detail view: the backdrop when present,
    /// the poster otherwise.
    pub fn hero_image(&self) -> String {
        match &self.backdrop_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => self.poster_or_placeholder(),
        }
    }

    /// Four-digit release year, or an empty string when the date is unknown.
    pub fn release_year(&self) -> &str {
        self.release_date.get(..4).unwrap_or("")
    }

    /// Case-insensitive containment of an already lowercased `needle` in the
    /// title, the overview or any genre label.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.overview.to_lowercase().contains(needle)
            || self
                .genres
                .iter()
                .any(|genre| genre.to_lowercase().contains(needle))
    }
}
