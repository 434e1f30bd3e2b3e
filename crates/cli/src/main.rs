use anyhow::{Result, bail};
use app::{AuthProvider, DemoAuth, MovieSession, SessionError};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use store::{FileStore, Movie, MovieDraft, MovieId, MoviePatch, RatingEvent, ValidationErrors};

/// CineMatch - personalized movie recommendations
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(
    about = "Rate movies and get preference-driven recommendations",
    long_about = None
)]
struct Cli {
    /// Directory holding the persisted catalog and ratings
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Fixed seed for the scoring jitter (reproducible rankings)
    #[arg(long)]
    seed: Option<u64>,

    /// Authorize catalog mutations for this invocation (demo login)
    #[arg(long)]
    admin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    List {
        /// Restrict to one genre (exact match)
        #[arg(long)]
        genre: Option<String>,

        /// Case-insensitive title substring to match
        #[arg(long)]
        query: Option<String>,
    },

    /// Show one movie in full
    Show {
        #[arg(long)]
        id: MovieId,
    },

    /// Rate a movie from 1 to 5 stars
    Rate {
        #[arg(long)]
        id: MovieId,

        #[arg(long)]
        stars: u8,
    },

    /// Forget the rating for a movie
    Unrate {
        #[arg(long)]
        id: MovieId,
    },

    /// Print the current recommendation list
    Recommend,

    /// Add a movie to the catalog (requires --admin)
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        genre: String,

        #[arg(long)]
        year: i32,

        /// Intrinsic quality score, 0-10
        #[arg(long)]
        rating: f32,

        /// Poster URL
        #[arg(long)]
        image: String,

        #[arg(long)]
        description: String,
    },

    /// Edit fields of an existing movie (requires --admin)
    Update {
        #[arg(long)]
        id: MovieId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        rating: Option<f32>,

        #[arg(long)]
        image: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a movie from the catalog (requires --admin)
    Remove {
        #[arg(long)]
        id: MovieId,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let port = Arc::new(FileStore::new(&cli.data_dir));
    let auth: Box<dyn AuthProvider> = if cli.admin {
        Box::new(DemoAuth::authorized())
    } else {
        Box::new(DemoAuth::new("admin@cinematch.local", "demo"))
    };
    let mut session = match cli.seed {
        Some(seed) => MovieSession::start_seeded(port, auth, seed),
        None => MovieSession::start(port, auth),
    };

    // Acknowledge saved ratings, the terminal stand-in for a toast.
    session.subscribe_ratings(|event| {
        if let RatingEvent::Saved { .. } = event {
            println!(
                "{} Rating saved! Your preferences sharpen future picks.",
                "✓".green()
            );
        }
    });

    match cli.command {
        Commands::List { genre, query } => {
            handle_list(&session, genre.as_deref(), query.as_deref())
        }
        Commands::Show { id } => handle_show(&session, id)?,
        Commands::Rate { id, stars } => handle_rate(&mut session, id, stars)?,
        Commands::Unrate { id } => handle_unrate(&mut session, id),
        Commands::Recommend => handle_recommend(&session),
        Commands::Add {
            title,
            genre,
            year,
            rating,
            image,
            description,
        } => handle_add(
            &mut session,
            MovieDraft {
                title,
                genre,
                year,
                rating,
                image,
                description,
            },
        )?,
        Commands::Update {
            id,
            title,
            genre,
            year,
            rating,
            image,
            description,
        } => handle_update(
            &mut session,
            id,
            MoviePatch {
                title,
                genre,
                year,
                rating,
                image,
                description,
            },
        )?,
        Commands::Remove { id } => handle_remove(&mut session, id)?,
    }

    Ok(())
}

fn handle_list(session: &MovieSession<FileStore>, genre: Option<&str>, query: Option<&str>) {
    let movies = session.search(query.unwrap_or(""), genre);
    if movies.is_empty() {
        println!("No movies match.");
        return;
    }

    println!("{}", "Catalog".bold());
    for movie in movies {
        print_movie_row(session, movie);
    }
    println!("\nGenres: {}", session.genres().join(", "));
}

fn handle_show(session: &MovieSession<FileStore>, id: MovieId) -> Result<()> {
    let Some(movie) = session.find_movie(id) else {
        bail!("movie {id} not found");
    };

    println!("{} ({})", movie.title.bold(), movie.year);
    println!("  Genre:  {}", movie.genre);
    println!("  Rating: {:.1}/10", movie.rating);
    if let Some(stars) = session.rating_of(id) {
        println!("  Yours:  {}", "★".repeat(stars as usize).yellow());
    }
    println!("  Poster: {}", movie.image);
    println!("  {}", movie.description);
    Ok(())
}

fn handle_rate(session: &mut MovieSession<FileStore>, id: MovieId, stars: u8) -> Result<()> {
    if session.find_movie(id).is_none() {
        bail!("movie {id} not found");
    }
    if let Err(err) = session.rate(id, stars) {
        bail!("could not save rating: {err}");
    }
    handle_recommend(session);
    Ok(())
}

fn handle_unrate(session: &mut MovieSession<FileStore>, id: MovieId) {
    if session.unrate(id) {
        println!("{} Rating removed.", "✓".green());
    } else {
        println!("Movie {id} had no rating.");
    }
}

fn handle_recommend(session: &MovieSession<FileStore>) {
    if !session.recommendations_visible() {
        println!("\nRate a few movies to unlock recommendations.");
        return;
    }

    let recommendations = session.recommendations();
    if recommendations.is_empty() {
        println!("\nNothing left to recommend - you have rated everything!");
        return;
    }

    println!("\n{}", "Recommended for you".bold());
    for (rank, recommendation) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - {} [score {:.2}]",
            rank + 1,
            recommendation.movie.title.bold(),
            recommendation.movie.year,
            recommendation.movie.genre,
            recommendation.score,
        );
    }
}

fn handle_add(session: &mut MovieSession<FileStore>, draft: MovieDraft) -> Result<()> {
    match session.add_movie(draft) {
        Ok(movie) => {
            println!(
                "{} Added '{}' with id {}.",
                "✓".green(),
                movie.title,
                movie.id
            );
            Ok(())
        }
        Err(err) => mutation_failure("movie was not added", err),
    }
}

fn handle_update(
    session: &mut MovieSession<FileStore>,
    id: MovieId,
    patch: MoviePatch,
) -> Result<()> {
    if patch.is_empty() {
        bail!("nothing to update - pass at least one field");
    }
    match session.update_movie(id, patch) {
        Ok(movie) => {
            println!("{} Updated '{}'.", "✓".green(), movie.title);
            Ok(())
        }
        Err(err) => mutation_failure("movie was not updated", err),
    }
}

fn handle_remove(session: &mut MovieSession<FileStore>, id: MovieId) -> Result<()> {
    match session.remove_movie(id) {
        Ok(true) => {
            println!("{} Removed movie {id}.", "✓".green());
            Ok(())
        }
        Ok(false) => {
            println!("Movie {id} was not in the catalog.");
            Ok(())
        }
        Err(err) => mutation_failure("movie was not removed", err),
    }
}

/// Render a mutation failure: per-field messages for validation, a single
/// human-readable line for everything else.
fn mutation_failure(action: &str, err: SessionError) -> Result<()> {
    match err {
        SessionError::Validation(errors) => {
            print_validation_errors(&errors);
            bail!("{action}");
        }
        SessionError::Auth(_) => bail!("admin access required (rerun with --admin)"),
        other => bail!("{action}: {other}"),
    }
}

fn print_validation_errors(errors: &ValidationErrors) {
    for (field, message) in errors {
        println!("{} {}: {}", "✗".red(), field.bold(), message);
    }
}

fn print_movie_row(session: &MovieSession<FileStore>, movie: &Movie) {
    let stars = match session.rating_of(movie.id) {
        Some(stars) => "★".repeat(stars as usize).yellow().to_string(),
        None => "unrated".dimmed().to_string(),
    };
    println!(
        "{:>4}  {} ({}) - {} - {:.1}/10 - {}",
        movie.id,
        movie.title.bold(),
        movie.year,
        movie.genre,
        movie.rating,
        stars,
    );
}
