//! Catalog configuration
//!
//! The only externally configurable value is the remote base URL; the feed
//! keyword, search keyword and curated titles are fixed defaults that tests
//! may override.

/// Base URL of the public TVMaze API.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Keyword whose search results form the discovery feed.
pub const FEED_KEYWORD: &str = "korean";

/// Keyword appended to free-text searches to keep results on topic.
pub const SEARCH_KEYWORD: &str = "korean";

/// Hand-picked titles resolved by exact-title lookup.
pub const CURATED_TITLES: [&str; 10] = [
    "Crash Landing on You",
    "The Heirs",
    "Legend of the Blue Sea",
    "True Beauty",
    "King the Land",
    "The Penthouse",
    "Descendants of the Sun",
    "Vincenzo",
    "Goblin",
    "Signal",
];

/// Settings for a [`crate::Catalog`] and its remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the remote show-metadata service
    pub base_url: String,
    /// Keyword used to fetch the discovery feed
    pub feed_keyword: String,
    /// Keyword appended to every title search
    pub search_keyword: String,
    /// Titles making up the curated list, in display order
    pub curated_titles: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            feed_keyword: FEED_KEYWORD.to_string(),
            search_keyword: SEARCH_KEYWORD.to_string(),
            curated_titles: CURATED_TITLES.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl CatalogConfig {
    /// Returns the configuration with a different remote base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the remote query for a free-text title search.
    #[must_use]
    pub fn search_query(&self, query: &str) -> String {
        format!("{} {}", query.trim(), self.search_keyword)
    }
}
