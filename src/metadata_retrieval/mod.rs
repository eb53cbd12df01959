//! Data structures and traits for show metadata retrieval.
//!
//! This module provides the read-only view model (shows and their cast) that
//! pages consume, the error taxonomy for remote lookups, and the trait that
//! remote show sources implement.
#![allow(clippy::future_not_send)]

mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeProvider;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Identifier assigned to a show by the remote service.
pub type ShowId = u64;

/// Errors that can occur during metadata retrieval operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataRetrievalError {
    /// The request never produced a usable response (network, DNS, HTTP status)
    #[error("Request failed: {0}")]
    Fetch(String),

    /// The response body did not have the expected JSON shape
    #[error("Failed to parse API response: {0}")]
    Decode(String),

    /// The requested show or title does not exist on the remote service
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Coarse classification of a [`MetadataRetrievalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport or HTTP failure
    Fetch,
    /// Malformed or unexpected JSON
    Decode,
    /// Lookup for something that does not exist
    NotFound,
}

impl MetadataRetrievalError {
    /// Returns the kind of failure without its message.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(_) => ErrorKind::Fetch,
            Self::Decode(_) => ErrorKind::Decode,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Poster artwork for a show, in the two sizes the service offers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowImage {
    /// Small variant, used on cards
    pub medium: Option<String>,
    /// Full-size variant, used on the detail page
    pub original: Option<String>,
}

/// A single drama as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Show {
    /// Stable identifier, the only key used for lookup and de-duplication
    pub id: ShowId,
    /// Display name
    pub name: String,
    /// Date of the first broadcast
    pub premiered: Option<NaiveDate>,
    /// Genres in the order the service lists them, verbatim
    pub genres: Vec<String>,
    /// Average rating on a 0-10 scale
    pub rating: Option<f64>,
    /// Broadcasting network or streaming channel
    pub network: Option<String>,
    /// Running status (e.g. "Ended")
    pub status: Option<String>,
    /// Plain-text summary with markup already stripped
    pub summary: Option<String>,
    /// Poster artwork
    pub image: Option<ShowImage>,
    /// Official website
    pub official_site: Option<String>,
}

impl Show {
    /// Year of the premiere, if the premiere date is known.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.premiered.map(|date| date.year())
    }

    /// Whether the show lists `genre`, compared case-insensitively.
    #[must_use]
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == wanted)
    }

    /// Rating formatted to one decimal place, or `N/A`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.rating
            .map_or_else(|| String::from("N/A"), |average| format!("{average:.1}"))
    }

    /// Large artwork, falling back to the small one.
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        let image = self.image.as_ref()?;
        image.original.as_deref().or(image.medium.as_deref())
    }

    /// Small artwork, falling back to the large one.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        let image = self.image.as_ref()?;
        image.medium.as_deref().or(image.original.as_deref())
    }
}

/// A cast credit: the person and the character they play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// Identifier of the person on the remote service
    pub person_id: u64,
    /// Person's name
    pub person_name: String,
    /// Portrait of the person
    pub person_image: Option<String>,
    /// Name of the character played, if credited
    pub character_name: Option<String>,
}

/// A show together with the cast fetched for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetails {
    /// Show metadata
    pub show: Show,
    /// Cast credited for exactly this show
    pub cast: Vec<CastMember>,
}

/// Trait for remote sources of show metadata.
///
/// Every method is a single read against the remote service; nothing is
/// cached or retried. Uses `trait_variant::make` to also provide a
/// `Send`-bound variant.
#[trait_variant::make(ShowSource: Send)]
pub trait LocalShowSource {
    /// Keyword search, results in the order the service ranks them.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` or `Decode` when the request or parsing fails.
    async fn search_shows(&self, query: &str) -> Result<Vec<Show>, MetadataRetrievalError>;

    /// Resolves an exact title to a single show.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the title does not resolve, `Fetch` or
    /// `Decode` otherwise.
    async fn lookup_title(&self, title: &str) -> Result<Show, MetadataRetrievalError>;

    /// Fetches a show by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown identifier, `Fetch` or `Decode`
    /// otherwise.
    async fn show(&self, id: ShowId) -> Result<Show, MetadataRetrievalError>;

    /// Fetches the cast list of a show.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown identifier, `Fetch` or `Decode`
    /// otherwise.
    async fn cast(&self, id: ShowId) -> Result<Vec<CastMember>, MetadataRetrievalError>;
}
