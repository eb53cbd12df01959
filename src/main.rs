use clap::{Parser, Subcommand};
use kdrama_catalog::config::DEFAULT_BASE_URL;
use kdrama_catalog::render::{GENERIC_ERROR, render_genres, render_state};
use kdrama_catalog::{CatalogConfig, Navigator, PageState, Route, connect};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Browse Korean dramas from the TVMaze catalog.
#[derive(Debug, Parser)]
#[command(name = "kdrama", version, about)]
struct Cli {
    /// Base URL of the show-metadata service
    #[arg(long, env = "KDRAMA_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Popular dramas and the genres they cover
    Home,
    /// Hand-picked iconic dramas
    Curated,
    /// Search dramas by title
    Search {
        /// Words to search for
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Details and cast of one drama
    Show {
        /// TVMaze show id
        id: u64,
    },
    /// Dramas in a genre
    Genre {
        /// Genre name, case-insensitive
        genre: String,
    },
    /// Dramas that premiered in a year
    Year {
        /// Premiere year, e.g. 2016
        year: i32,
    },
    /// All genres in the discovery feed
    Genres,
    /// Open a route such as /drama/26093 or "/search?q=goblin"
    Open {
        /// Route path
        route: String,
    },
}

impl Command {
    /// The page route for this command, if it renders a page.
    fn route(&self) -> Option<Route> {
        match self {
            Self::Home => Some(Route::Home),
            Self::Curated => Some(Route::Curated),
            Self::Search { query } => Some(Route::Search(query.join(" "))),
            Self::Show { id } => Some(Route::Details(*id)),
            Self::Genre { genre } => Some(Route::Genre(genre.clone())),
            Self::Year { year } => Some(Route::Year(*year)),
            Self::Genres => None,
            Self::Open { route } => Some(Route::parse(route)),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CatalogConfig::default().with_base_url(cli.base_url);

    let catalog = match connect(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(route) = cli.command.route() else {
        // Genre index without the rest of the home page
        return match catalog.fetch_all_genres().await {
            Ok(genres) => {
                print!("{}", render_genres(&genres));
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::warn!(error = %e, "Genre list failed");
                eprintln!("{GENERIC_ERROR}");
                ExitCode::FAILURE
            }
        };
    };

    let mut navigator = Navigator::new();
    let state = navigator.open(&catalog, route).await;

    match state {
        PageState::Failed(_) => {
            eprint!("{}", render_state(state));
            ExitCode::FAILURE
        }
        _ => {
            print!("{}", render_state(state));
            ExitCode::SUCCESS
        }
    }
}
