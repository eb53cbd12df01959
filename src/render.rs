//! Plain-text rendering of loaded pages
//!
//! Rendering is a direct function of a [`PageState`]; it never issues
//! requests of its own.

use crate::catalog::CuratedList;
use crate::metadata_retrieval::{Show, ShowDetails};
use crate::pages::{BrowsePage, DETAILS_CAST_LIMIT, HomePage, Page, PageState, SearchPage};
use std::fmt;

/// Message shown for every failed load, whatever its kind.
pub const GENERIC_ERROR: &str = "Failed to fetch data. Please try again later.";

/// Renders the current state of a page.
#[must_use]
pub fn render_state(state: &PageState<Page>) -> String {
    match state {
        PageState::Pending => String::from("Loading...\n"),
        PageState::Ready(page) => render_page(page),
        PageState::Failed(_) => format!("{GENERIC_ERROR}\n"),
    }
}

/// Renders a loaded page.
#[must_use]
pub fn render_page(page: &Page) -> String {
    page.to_string()
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home(home) => write_home(f, home),
            Self::Details(details) => write_details(f, details),
            Self::Search(search) => write_search(f, search),
            Self::Genre(genre) => write_genre(f, genre),
            Self::Year(year) => write_year(f, year),
            Self::Curated(curated) => write_curated(f, curated),
            Self::NotFound(path) => write_not_found(f, path),
        }
    }
}

/// One-line card for a show: name, year and rating.
#[must_use]
pub fn card(show: &Show) -> String {
    match show.year() {
        Some(year) => format!(
            "[{}] {} ({year}) - {}",
            show.id,
            show.name,
            show.rating_label()
        ),
        None => format!("[{}] {} - {}", show.id, show.name, show.rating_label()),
    }
}

/// Renders a list of genres, one per line with its route.
#[must_use]
pub fn render_genres(genres: &[String]) -> String {
    GenreLinks(genres).to_string()
}

/// Genre index lines, displayable on their own or inside the home page.
struct GenreLinks<'a>(&'a [String]);

impl fmt::Display for GenreLinks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for genre in self.0 {
            writeln!(f, "  {genre:<20} /genre/{}", urlencoding::encode(genre))?;
        }
        Ok(())
    }
}

fn write_cards(f: &mut fmt::Formatter<'_>, shows: &[Show]) -> fmt::Result {
    for show in shows {
        writeln!(f, "  {}", card(show))?;
    }
    Ok(())
}

fn write_home(f: &mut fmt::Formatter<'_>, home: &HomePage) -> fmt::Result {
    writeln!(f, "=== Popular K-Dramas ===")?;
    if home.popular.is_empty() {
        writeln!(f, "No dramas found. Please try again later.")?;
    } else {
        write_cards(f, home.featured())?;
    }

    writeln!(f, "\n=== Browse by Genre ===")?;
    write!(f, "{}", GenreLinks(&home.genres))
}

fn write_details(f: &mut fmt::Formatter<'_>, details: &ShowDetails) -> fmt::Result {
    let show = &details.show;

    writeln!(f, "=== {} ===", show.name)?;
    if let Some(year) = show.year() {
        writeln!(f, "Year:     {year}")?;
    }
    if show.rating.is_some() {
        writeln!(f, "Rating:   {}/10", show.rating_label())?;
    }
    if !show.genres.is_empty() {
        writeln!(f, "Genres:   {}", show.genres.join(", "))?;
    }
    if let Some(network) = &show.network {
        writeln!(f, "Network:  {network}")?;
    }
    if let Some(status) = &show.status {
        writeln!(f, "Status:   {status}")?;
    }
    if let Some(poster) = show.poster() {
        writeln!(f, "Poster:   {poster}")?;
    }

    writeln!(f, "\nSummary")?;
    writeln!(
        f,
        "{}",
        show.summary.as_deref().unwrap_or("No summary available.")
    )?;

    if let Some(site) = &show.official_site {
        writeln!(f, "\nOfficial Website: {site}")?;
    }

    if !details.cast.is_empty() {
        writeln!(f, "\n=== Cast ===")?;
        for member in details.cast.iter().take(DETAILS_CAST_LIMIT) {
            match &member.character_name {
                Some(character) => writeln!(f, "  {} as {character}", member.person_name)?,
                None => writeln!(f, "  {}", member.person_name)?,
            }
        }
    }

    Ok(())
}

fn write_search(f: &mut fmt::Formatter<'_>, search: &SearchPage) -> fmt::Result {
    let count = search.results.len();

    if count > 0 {
        writeln!(f, "=== Search Results for \"{}\" ===", search.query)?;
    } else {
        writeln!(f, "=== No results found for \"{}\" ===", search.query)?;
    }
    writeln!(
        f,
        "{count} {} found",
        if count == 1 { "result" } else { "results" }
    )?;

    if count == 0 {
        writeln!(f, "No K-dramas found matching your search.")?;
        writeln!(f, "Try different keywords or browse our recommendations.")
    } else {
        write_cards(f, &search.results)
    }
}

fn write_genre(f: &mut fmt::Formatter<'_>, genre: &BrowsePage<String>) -> fmt::Result {
    writeln!(f, "=== {} K-Dramas ===", genre.key)?;
    if genre.shows.is_empty() {
        writeln!(f, "No K-dramas found in the {} genre.", genre.key)
    } else {
        write_cards(f, &genre.shows)
    }
}

fn write_year(f: &mut fmt::Formatter<'_>, year: &BrowsePage<i32>) -> fmt::Result {
    writeln!(f, "=== K-Dramas from {} ===", year.key)?;
    if year.shows.is_empty() {
        writeln!(f, "No K-dramas found that premiered in {}.", year.key)
    } else {
        write_cards(f, &year.shows)
    }
}

fn write_curated(f: &mut fmt::Formatter<'_>, curated: &CuratedList) -> fmt::Result {
    writeln!(f, "=== Iconic K-Dramas ===")?;
    write_cards(f, &curated.shows)?;

    if !curated.unresolved.is_empty() {
        let titles: Vec<&str> = curated
            .unresolved
            .iter()
            .map(|u| u.title.as_str())
            .collect();
        writeln!(f, "\nUnavailable: {}", titles.join(", "))?;
    }

    Ok(())
}

fn write_not_found(f: &mut fmt::Formatter<'_>, path: &str) -> fmt::Result {
    writeln!(f, "404 - Page not found: {path}")?;
    writeln!(f, "Back to Home: /")
}
