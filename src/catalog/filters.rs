//! Pure predicates and reductions over feed snapshots
//!
//! The remote service has no genre or year filter, so every narrowing of
//! the feed happens here on the client.

use crate::metadata_retrieval::Show;
use std::collections::HashSet;

/// Predicate: the show lists `genre` (case-insensitive).
pub fn genre(genre: &str) -> impl Fn(&Show) -> bool + '_ {
    move |show: &Show| show.has_genre(genre)
}

/// Predicate: the show premiered in `year`. Shows without a premiere date
/// never match.
pub fn premiere_year(year: i32) -> impl Fn(&Show) -> bool {
    move |show: &Show| show.year() == Some(year)
}

/// Keeps the shows matching `predicate`, in feed order.
pub fn retain_matching<P>(shows: Vec<Show>, predicate: P) -> Vec<Show>
where
    P: Fn(&Show) -> bool,
{
    shows.into_iter().filter(|show| predicate(show)).collect()
}

/// Distinct genre strings across `shows`, in first-seen order.
///
/// Genres are compared verbatim so that display spelling is preserved.
pub fn distinct_genres<'a, I>(shows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Show>,
{
    let mut seen = HashSet::new();
    let mut genres = Vec::new();

    for show in shows {
        for genre in &show.genres {
            if seen.insert(genre.as_str()) {
                genres.push(genre.clone());
            }
        }
    }

    genres
}

/// Drops later shows whose identifier was already seen.
pub fn dedup_by_id(shows: Vec<Show>) -> Vec<Show> {
    let mut seen = HashSet::new();
    shows
        .into_iter()
        .filter(|show| seen.insert(show.id))
        .collect()
}
