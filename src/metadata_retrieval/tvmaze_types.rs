/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Only the fields the catalog displays are modelled; everything else in the
/// payload is ignored.
use serde::Deserialize;

/// One hit from the TVMaze search endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show
    pub show: TvMazeShow,
}

/// A show object as returned by the search, singlesearch and shows endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: u64,
    pub name: String,
    /// Premiere date as `YYYY-MM-DD`
    pub premiered: Option<String>,
    pub genres: Option<Vec<String>>,
    pub rating: Option<TvMazeRating>,
    pub network: Option<TvMazeChannel>,
    /// Streaming service, set for web-only releases where `network` is null
    #[serde(rename = "webChannel")]
    pub web_channel: Option<TvMazeChannel>,
    pub status: Option<String>,
    /// Summary in HTML format
    pub summary: Option<String>,
    pub image: Option<TvMazeImage>,
    #[serde(rename = "officialSite")]
    pub official_site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvMazeRating {
    pub average: Option<f64>,
}

/// A broadcast network or web channel.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeChannel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

/// One entry of the `/shows/{id}/cast` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeCastCredit {
    pub person: TvMazePerson,
    pub character: Option<TvMazeCharacter>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvMazePerson {
    pub id: u64,
    pub name: String,
    pub image: Option<TvMazeImage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvMazeCharacter {
    pub name: Option<String>,
}
