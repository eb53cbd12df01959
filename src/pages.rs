//! Page routing and loading
//!
//! Maps client-side routes to catalog reads and tracks the result of the
//! current navigation as an explicit [`PageState`]. Each navigation takes a
//! fresh generation; a load that finishes after the user has moved on is
//! discarded instead of replacing the newer page.
#![allow(clippy::future_not_send)]

use crate::catalog::{Catalog, CuratedList};
use crate::metadata_retrieval::{
    LocalShowSource, MetadataRetrievalError, Show, ShowDetails, ShowId,
};
use std::fmt;

/// Number of feed entries shown on the home page.
pub const HOME_FEATURED_LIMIT: usize = 10;

/// Number of cast members shown on the detail page.
pub const DETAILS_CAST_LIMIT: usize = 6;

/// A navigable client-side location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/drama/<id>`
    Details(ShowId),
    /// `/search?q=<query>`
    Search(String),
    /// `/genre/<genre>`
    Genre(String),
    /// `/year/<yyyy>`
    Year(i32),
    /// `/curated`
    Curated,
    /// Anything else; carries the requested path
    NotFound(String),
}

impl Route {
    /// Parses a path such as `/genre/Romance` or `/search?q=goblin`.
    ///
    /// Path segments are percent-decoded. Unknown paths, malformed ids and
    /// malformed years map to [`Route::NotFound`].
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Some(Self::Home),
            ["curated"] => Some(Self::Curated),
            ["search"] => Some(Self::Search(search_term(query))),
            ["drama", id] => id.parse().ok().map(Self::Details),
            ["genre", genre] => urlencoding::decode(genre)
                .ok()
                .map(|genre| Self::Genre(genre.into_owned())),
            ["year", year] => year.parse().ok().map(Self::Year),
            _ => None,
        };

        route.unwrap_or_else(|| Self::NotFound(location.to_string()))
    }
}

/// Extracts the `q` parameter from a query string.
fn search_term(query: &str) -> String {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Details(id) => write!(f, "/drama/{id}"),
            Self::Search(query) => {
                let encoded: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", query)
                    .finish();
                write!(f, "/search?{encoded}")
            }
            Self::Genre(genre) => write!(f, "/genre/{}", urlencoding::encode(genre)),
            Self::Year(year) => write!(f, "/year/{year}"),
            Self::Curated => write!(f, "/curated"),
            Self::NotFound(path) => write!(f, "{path}"),
        }
    }
}

/// Lifecycle of a single page load.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    /// Requests issued, not all settled yet
    Pending,
    /// Every request settled successfully
    Ready(T),
    /// At least one request failed
    Failed(MetadataRetrievalError),
}

impl<T> PageState<T> {
    /// Whether the load is still in flight.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The loaded value, if ready.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Result<T, MetadataRetrievalError>> for PageState<T> {
    fn from(result: Result<T, MetadataRetrievalError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Home page: the discovery feed and the genres found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct HomePage {
    /// Full feed, in remote order
    pub popular: Vec<Show>,
    /// Distinct genres, first-seen order
    pub genres: Vec<String>,
}

impl HomePage {
    /// The feed entries displayed on the page.
    pub fn featured(&self) -> &[Show] {
        &self.popular[..self.popular.len().min(HOME_FEATURED_LIMIT)]
    }
}

/// Search results for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    /// The query as the user typed it
    pub query: String,
    /// Matching shows
    pub results: Vec<Show>,
}

/// Shows grouped under a genre or premiere year.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowsePage<K> {
    /// The genre or year browsed
    pub key: K,
    /// Matching shows
    pub shows: Vec<Show>,
}

/// A fully loaded page.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// `/`
    Home(HomePage),
    /// `/drama/<id>`
    Details(ShowDetails),
    /// `/search`
    Search(SearchPage),
    /// `/genre/<genre>`
    Genre(BrowsePage<String>),
    /// `/year/<yyyy>`
    Year(BrowsePage<i32>),
    /// `/curated`
    Curated(CuratedList),
    /// Fallback for unknown routes
    NotFound(String),
}

/// Issues every read `route` needs and assembles the page once all settle.
///
/// # Errors
///
/// Returns the first failing read. The curated page never fails; its
/// unresolved titles are part of the page.
pub async fn load_page<S>(
    catalog: &Catalog<S>,
    route: &Route,
) -> Result<Page, MetadataRetrievalError>
where
    S: LocalShowSource,
{
    let page = match route {
        Route::Home => {
            let (popular, genres) =
                futures::join!(catalog.fetch_popular(), catalog.fetch_all_genres());
            Page::Home(HomePage {
                popular: popular?,
                genres: genres?,
            })
        }
        Route::Details(id) => Page::Details(catalog.fetch_details(*id).await?),
        Route::Search(query) => Page::Search(SearchPage {
            query: query.clone(),
            results: catalog.search_by_title(query).await?,
        }),
        Route::Genre(genre) => Page::Genre(BrowsePage {
            key: genre.clone(),
            shows: catalog.fetch_by_genre(genre).await?,
        }),
        Route::Year(year) => Page::Year(BrowsePage {
            key: *year,
            shows: catalog.fetch_by_year(*year).await?,
        }),
        Route::Curated => Page::Curated(catalog.fetch_curated().await),
        Route::NotFound(path) => Page::NotFound(path.clone()),
    };

    Ok(page)
}

/// Identifies one navigation; only the newest ticket may apply its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    route: Route,
}

impl LoadTicket {
    /// The route this load was started for.
    pub const fn route(&self) -> &Route {
        &self.route
    }
}

/// Holds the current route and its page state.
///
/// State flows one way: [`Navigator::navigate`] resets to `Pending` and
/// hands out a ticket, [`Navigator::complete`] applies a finished load if
/// its ticket is still current.
#[derive(Debug)]
pub struct Navigator {
    generation: u64,
    route: Route,
    state: PageState<Page>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts at the home route with nothing loaded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            route: Route::Home,
            state: PageState::Pending,
        }
    }

    /// Moves to `route`, discarding whatever was shown before.
    pub fn navigate(&mut self, route: Route) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.route = route.clone();
        self.state = PageState::Pending;

        LoadTicket {
            generation: self.generation,
            route,
        }
    }

    /// Applies a finished load. Returns `false` and drops the result when a
    /// newer navigation has started since `ticket` was issued.
    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Page, MetadataRetrievalError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(route = %ticket.route, "Discarding stale page load");
            return false;
        }

        if let Err(error) = &result {
            tracing::warn!(route = %ticket.route, %error, "Page load failed");
        }

        self.state = result.into();
        true
    }

    /// The route currently navigated to.
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// The state of the current page.
    pub const fn state(&self) -> &PageState<Page> {
        &self.state
    }

    /// Navigates to `route` and loads it to completion.
    pub async fn open<S>(&mut self, catalog: &Catalog<S>, route: Route) -> &PageState<Page>
    where
        S: LocalShowSource,
    {
        let ticket = self.navigate(route);
        let result = load_page(catalog, ticket.route()).await;
        self.complete(&ticket, result);
        &self.state
    }
}
