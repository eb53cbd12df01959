//! Catalog data access layer
//!
//! Translates browsing intents (popular feed, curated list, search, genre and
//! year browsing, detail lookup) into reads against a [`LocalShowSource`] and
//! reshapes the answers into the view model. Every operation is a stateless
//! read producing a fresh snapshot; nothing is cached between calls.
#![allow(clippy::future_not_send)]

pub mod filters;

use crate::config::CatalogConfig;
use crate::metadata_retrieval::{
    LocalShowSource, MetadataRetrievalError, Show, ShowDetails, ShowId,
};
use futures::{StreamExt, stream};
use tracing::instrument;

/// Maximum number of curated title lookups in flight at once.
const CURATED_LOOKUP_CONCURRENCY: usize = 10;

/// A curated title whose lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTitle {
    /// The title as configured
    pub title: String,
    /// Why it could not be resolved
    pub error: MetadataRetrievalError,
}

/// Result of resolving the curated title list.
///
/// Failed lookups never abort the list; they are reported in `unresolved`
/// so callers can tell "no titles resolved" from "the lookups failed".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CuratedList {
    /// One show per resolved title, in configured title order
    pub shows: Vec<Show>,
    /// Titles that could not be resolved
    pub unresolved: Vec<UnresolvedTitle>,
}

/// Read-only access to the drama catalog.
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    source: S,
    config: CatalogConfig,
}

impl<S> Catalog<S>
where
    S: LocalShowSource,
{
    /// Creates a catalog reading from `source`.
    pub const fn new(source: S, config: CatalogConfig) -> Self {
        Self { source, config }
    }

    /// Returns the source this catalog reads from.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the discovery feed, in the order the service ranks it.
    ///
    /// # Errors
    ///
    /// Returns the source error if the feed request fails.
    #[instrument(skip(self))]
    pub async fn fetch_popular(&self) -> Result<Vec<Show>, MetadataRetrievalError> {
        self.source.search_shows(&self.config.feed_keyword).await
    }

    /// Resolves every curated title concurrently, one lookup per title.
    ///
    /// Titles that fail to resolve are left out of `shows` and listed in
    /// `unresolved`; they are not retried. Two titles resolving to the same
    /// show yield a single entry. Results keep configured title order no
    /// matter which lookup settles first.
    #[instrument(skip(self))]
    pub async fn fetch_curated(&self) -> CuratedList {
        let titles = &self.config.curated_titles;
        let results: Vec<_> = stream::iter(titles)
            .map(|title| self.source.lookup_title(title))
            .buffered(CURATED_LOOKUP_CONCURRENCY)
            .collect()
            .await;

        let mut shows = Vec::with_capacity(titles.len());
        let mut unresolved = Vec::new();

        for (title, result) in titles.iter().zip(results) {
            match result {
                Ok(show) => shows.push(show),
                Err(error) => {
                    tracing::warn!(%title, %error, "Curated title could not be resolved");
                    unresolved.push(UnresolvedTitle {
                        title: title.clone(),
                        error,
                    });
                }
            }
        }

        CuratedList {
            shows: filters::dedup_by_id(shows),
            unresolved,
        }
    }

    /// Searches titles matching free text, narrowed by the search keyword.
    ///
    /// A blank query matches nothing and is never sent to the source.
    ///
    /// # Errors
    ///
    /// Returns the source error if the search request fails.
    #[instrument(skip(self))]
    pub async fn search_by_title(&self, query: &str) -> Result<Vec<Show>, MetadataRetrievalError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let remote_query = self.config.search_query(query);
        self.source.search_shows(&remote_query).await
    }

    /// Fetches a show and then its cast, combined into one result.
    ///
    /// # Errors
    ///
    /// Fails as a whole if either call fails; partial data is never returned.
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, id: ShowId) -> Result<ShowDetails, MetadataRetrievalError> {
        let show = self.source.show(id).await?;
        let cast = self.source.cast(id).await?;

        Ok(ShowDetails { show, cast })
    }

    /// Fetches the feed and keeps the shows matching `predicate`.
    ///
    /// This is the shared shape of every client-side filter: the service
    /// offers no native filtering, so each one is a predicate over the same
    /// feed snapshot.
    ///
    /// # Errors
    ///
    /// Returns the source error if the feed request fails.
    pub async fn fetch_filtered<P>(&self, predicate: P) -> Result<Vec<Show>, MetadataRetrievalError>
    where
        P: Fn(&Show) -> bool,
    {
        let feed = self.fetch_popular().await?;
        Ok(filters::retain_matching(feed, predicate))
    }

    /// Feed shows listing `genre`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns the source error if the feed request fails.
    #[instrument(skip(self))]
    pub async fn fetch_by_genre(&self, genre: &str) -> Result<Vec<Show>, MetadataRetrievalError> {
        self.fetch_filtered(filters::genre(genre)).await
    }

    /// Feed shows that premiered in `year`.
    ///
    /// # Errors
    ///
    /// Returns the source error if the feed request fails.
    #[instrument(skip(self))]
    pub async fn fetch_by_year(&self, year: i32) -> Result<Vec<Show>, MetadataRetrievalError> {
        self.fetch_filtered(filters::premiere_year(year)).await
    }

    /// Distinct genres across the feed, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns the source error if the feed request fails.
    #[instrument(skip(self))]
    pub async fn fetch_all_genres(&self) -> Result<Vec<String>, MetadataRetrievalError> {
        let feed = self.fetch_popular().await?;
        Ok(filters::distinct_genres(&feed))
    }
}
