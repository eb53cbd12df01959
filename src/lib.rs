//! KDrama Catalog - browse Korean dramas from a remote show-metadata service
//!
//! This library provides the data access layer for a drama browsing front
//! end: reading the discovery feed, curated titles, searches and show details
//! from TVMaze, filtering and grouping them on the client, and loading whole
//! pages for the routes a browser navigates to.

pub mod catalog;
pub mod config;
pub mod metadata_retrieval;
pub mod pages;
pub mod render;

pub use catalog::{Catalog, CuratedList, UnresolvedTitle};
pub use config::CatalogConfig;
pub use metadata_retrieval::{
    CastMember, ErrorKind, LocalShowSource, MetadataRetrievalError, Show, ShowDetails, ShowId,
    ShowImage, ShowSource, TvMazeProvider,
};
pub use pages::{Navigator, Page, PageState, Route, load_page};

use thiserror::Error;
use url::Url;

/// Top-level error type for KDrama Catalog operations
#[derive(Debug, Error)]
pub enum KdramaCatalogError {
    /// The configured base URL could not be parsed
    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Error during metadata retrieval
    #[error("Metadata retrieval error: {0}")]
    MetadataRetrieval(#[from] MetadataRetrievalError),
}

/// Creates a catalog backed by the TVMaze API at the configured base URL.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot be
/// built. No request is sent.
///
/// # Examples
///
/// ```no_run
/// use kdrama_catalog::{CatalogConfig, connect};
///
/// # async fn run() -> Result<(), kdrama_catalog::KdramaCatalogError> {
/// let catalog = connect(CatalogConfig::default())?;
/// let romance = catalog.fetch_by_genre("romance").await?;
/// for show in romance {
///     println!("{} ({})", show.name, show.rating_label());
/// }
/// # Ok(())
/// # }
/// ```
pub fn connect(config: CatalogConfig) -> Result<Catalog<TvMazeProvider>, KdramaCatalogError> {
    let base_url =
        Url::parse(&config.base_url).map_err(|source| KdramaCatalogError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

    let provider = TvMazeProvider::new(base_url)?;
    tracing::debug!(base_url = %provider.base_url(), "Catalog connected");

    Ok(Catalog::new(provider, config))
}
