/// TVMaze metadata provider implementation.
use super::tvmaze_types::{TvMazeCastCredit, TvMazeImage, TvMazeSearchResult, TvMazeShow};
use super::{CastMember, MetadataRetrievalError, Show, ShowId, ShowImage, ShowSource};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Metadata provider for the TVMaze API.
///
/// This provider reads show information from https://api.tvmaze.com (or any
/// base URL serving the same endpoints) using unauthenticated GET requests.
#[derive(Debug, Clone)]
pub struct TvMazeProvider {
    client: Client,
    base_url: Url,
}

impl TvMazeProvider {
    /// Creates a provider talking to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(mut base_url: Url) -> Result<Self, reqwest::Error> {
        // Url::join replaces the last segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request and decodes the JSON body.
    ///
    /// HTTP 404 maps to `NotFound`, any other non-success status or transport
    /// failure to `Fetch`, and an unexpected body to `Decode`.
    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MetadataRetrievalError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| MetadataRetrievalError::Fetch(format!("invalid path {path}: {e}")))?;

        tracing::debug!(%url, "TVMaze API request");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| MetadataRetrievalError::Fetch(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(MetadataRetrievalError::NotFound(response.url().to_string()));
        }

        if !status.is_success() {
            return Err(MetadataRetrievalError::Fetch(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MetadataRetrievalError::Fetch(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| MetadataRetrievalError::Decode(format!("{path}: {e}")))
    }

    /// Converts a TVMaze show to our internal Show structure.
    fn convert_show(tvmaze_show: TvMazeShow) -> Show {
        let premiered = tvmaze_show
            .premiered
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok());

        let summary = tvmaze_show
            .summary
            .map(|s| nanohtml2text::html2text(&s).trim().to_string())
            .filter(|s| !s.is_empty());

        Show {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            premiered,
            genres: tvmaze_show.genres.unwrap_or_default(),
            rating: tvmaze_show.rating.and_then(|r| r.average),
            network: tvmaze_show
                .network
                .or(tvmaze_show.web_channel)
                .map(|channel| channel.name),
            status: tvmaze_show.status,
            summary,
            image: tvmaze_show.image.map(Self::convert_image),
            official_site: tvmaze_show.official_site,
        }
    }

    fn convert_image(image: TvMazeImage) -> ShowImage {
        ShowImage {
            medium: image.medium,
            original: image.original,
        }
    }

    fn convert_cast_member(credit: TvMazeCastCredit) -> CastMember {
        CastMember {
            person_id: credit.person.id,
            person_name: credit.person.name,
            person_image: credit
                .person
                .image
                .and_then(|image| image.medium.or(image.original)),
            character_name: credit.character.and_then(|c| c.name),
        }
    }
}

impl ShowSource for TvMazeProvider {
    #[instrument(skip(self))]
    async fn search_shows(&self, query: &str) -> Result<Vec<Show>, MetadataRetrievalError> {
        let results: Vec<TvMazeSearchResult> =
            self.get_json("search/shows", &[("q", query)]).await?;

        Ok(results
            .into_iter()
            .map(|result| Self::convert_show(result.show))
            .collect())
    }

    #[instrument(skip(self))]
    async fn lookup_title(&self, title: &str) -> Result<Show, MetadataRetrievalError> {
        // The endpoint answers 404 for unknown titles, but a null body is
        // treated the same way
        let show: Option<TvMazeShow> = self
            .get_json("singlesearch/shows", &[("q", title)])
            .await?;

        show.map(Self::convert_show)
            .ok_or_else(|| MetadataRetrievalError::NotFound(title.to_string()))
    }

    #[instrument(skip(self))]
    async fn show(&self, id: ShowId) -> Result<Show, MetadataRetrievalError> {
        let show: TvMazeShow = self.get_json(&format!("shows/{id}"), &[]).await?;
        Ok(Self::convert_show(show))
    }

    #[instrument(skip(self))]
    async fn cast(&self, id: ShowId) -> Result<Vec<CastMember>, MetadataRetrievalError> {
        let credits: Vec<TvMazeCastCredit> =
            self.get_json(&format!("shows/{id}/cast"), &[]).await?;

        Ok(credits.into_iter().map(Self::convert_cast_member).collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::metadata_retrieval::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> TvMazeProvider {
        TvMazeProvider::new(Url::parse(&server.uri()).unwrap()).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let provider =
            TvMazeProvider::new(Url::parse("http://localhost:8080/api").unwrap()).unwrap();
        assert_eq!(provider.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            provider.base_url().join("shows/1").unwrap().as_str(),
            "http://localhost:8080/api/shows/1"
        );
    }

    #[test]
    fn test_convert_show_strips_summary_markup() {
        let json = include_str!("../../fixtures/tvmaze/show_goblin.json");
        let tvmaze_show: TvMazeShow = serde_json::from_str(json).unwrap();

        let show = TvMazeProvider::convert_show(tvmaze_show);

        assert_eq!(show.id, 26_093);
        assert_eq!(show.name, "Guardian: The Lonely and Great God");
        assert_eq!(show.premiered, NaiveDate::from_ymd_opt(2016, 12, 2));
        assert_eq!(show.genres, vec!["Drama", "Fantasy", "Romance"]);
        assert_eq!(show.rating, Some(8.6));
        assert_eq!(show.network.as_deref(), Some("tvN"));
        let summary = show.summary.unwrap();
        assert!(!summary.contains('<'));
        assert!(summary.starts_with("Kim Shin"));
    }

    #[test]
    fn test_convert_show_tolerates_missing_fields() {
        let json = r#"{
            "id": 7,
            "name": "Untitled",
            "premiered": null,
            "genres": null,
            "rating": {"average": null},
            "network": null,
            "webChannel": {"name": "Netflix"},
            "summary": "<p> </p>",
            "image": null
        }"#;
        let tvmaze_show: TvMazeShow = serde_json::from_str(json).unwrap();

        let show = TvMazeProvider::convert_show(tvmaze_show);

        assert_eq!(show.premiered, None);
        assert!(show.genres.is_empty());
        assert_eq!(show.rating, None);
        assert_eq!(show.network.as_deref(), Some("Netflix"));
        assert_eq!(show.summary, None);
        assert_eq!(show.image, None);
        assert_eq!(show.official_site, None);
    }

    #[test]
    fn test_convert_show_ignores_malformed_premiere() {
        let json = r#"{"id": 8, "name": "Odd", "premiered": "2016"}"#;
        let tvmaze_show: TvMazeShow = serde_json::from_str(json).unwrap();

        assert_eq!(TvMazeProvider::convert_show(tvmaze_show).premiered, None);
    }

    #[tokio::test]
    async fn test_search_shows_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../fixtures/tvmaze/search_korean.json");

        Mock::given(method("GET"))
            .and(path("/search/shows"))
            .and(query_param("q", "korean"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let shows = provider.search_shows("korean").await.unwrap();

        // Assert
        assert_eq!(shows.len(), 4);
        assert_eq!(shows[0].name, "Descendants of the Sun");
        assert_eq!(shows[3].premiered, None);
    }

    fn spawn_search<S>(
        source: S,
        query: &'static str,
    ) -> tokio::task::JoinHandle<Result<Vec<Show>, MetadataRetrievalError>>
    where
        S: ShowSource + 'static,
    {
        tokio::spawn(async move { source.search_shows(query).await })
    }

    #[tokio::test]
    async fn test_search_runs_on_spawned_task() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/shows"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        // Act
        let handle = spawn_search(provider_for(&mock_server), "korean");

        // Assert
        assert!(handle.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_title_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../fixtures/tvmaze/show_goblin.json");

        Mock::given(method("GET"))
            .and(path("/singlesearch/shows"))
            .and(query_param("q", "Goblin"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let show = provider.lookup_title("Goblin").await.unwrap();

        // Assert
        assert_eq!(show.id, 26_093);
    }

    #[tokio::test]
    async fn test_lookup_title_404_is_not_found() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/singlesearch/shows"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let result = provider.lookup_title("No Such Drama").await;

        // Assert
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_title_null_body_is_not_found() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/singlesearch/shows"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let result = provider.lookup_title("Signal").await;

        // Assert
        assert_eq!(
            result.unwrap_err(),
            MetadataRetrievalError::NotFound(String::from("Signal"))
        );
    }

    #[tokio::test]
    async fn test_show_and_cast_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/shows/26093"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(include_str!("../../fixtures/tvmaze/show_goblin.json")),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/shows/26093/cast"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(include_str!("../../fixtures/tvmaze/cast_goblin.json")),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let show = provider.show(26_093).await.unwrap();
        let cast = provider.cast(26_093).await.unwrap();

        // Assert
        assert_eq!(show.name, "Guardian: The Lonely and Great God");
        assert_eq!(cast.len(), 3);
        assert_eq!(cast[0].person_name, "Gong Yoo");
        assert_eq!(cast[0].character_name.as_deref(), Some("Kim Shin"));
        assert!(cast[0].person_image.is_some());
        assert_eq!(cast[2].person_image, None);
    }

    #[tokio::test]
    async fn test_unknown_show_is_not_found() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let result = provider.show(999_999).await;

        // Assert
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_server_error_is_fetch_error() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let result = provider.search_shows("korean").await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"unexpected": true}"#))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);

        // Act
        let result = provider.search_shows("korean").await;

        // Assert
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Arrange: nothing listens on port 1
        let provider = TvMazeProvider::new(Url::parse("http://127.0.0.1:1").unwrap()).unwrap();

        // Act
        let result = provider.search_shows("korean").await;

        // Assert
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Fetch);
    }
}
