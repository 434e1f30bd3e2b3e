//! Preference-driven scoring of catalog movies.
//!
//! ## Algorithm
//! 1. No preferences means no signal: return an empty list
//! 2. Partition the catalog into rated and unrated; only unrated movies
//!    are eligible
//! 3. Average the user's preference values per genre over the rated
//!    movies still present in the catalog (stale ids are skipped)
//! 4. Score each eligible movie: intrinsic quality scaled to `[0, 1]`,
//!    plus up to 0.5 of genre affinity when the user has signal for that
//!    genre, plus a `[0, 0.1)` jitter to break ties
//! 5. Sort descending, keep the top six
//!
//! The jitter source is injected, so callers that need reproducible
//! output seed the rng themselves.

use rand::Rng;
use std::collections::HashMap;
use store::{Movie, Preferences};
use tracing::{debug, instrument};

/// Upper bound on the length of a recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Exclusive upper bound of the tie-breaking jitter term.
pub const JITTER_BOUND: f32 = 0.1;

/// A catalog movie decorated with its transient score. Never persisted;
/// recomputed on every derivation cycle.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub movie: Movie,
    pub score: f32,
}

/// Score and rank the unrated part of the catalog.
///
/// Pure apart from the injected rng: identical inputs and an identically
/// seeded rng produce identical output.
#[instrument(skip_all, fields(rated = preferences.len(), catalog = catalog.len()))]
pub fn recommend<R: Rng + ?Sized>(
    preferences: &Preferences,
    catalog: &[Movie],
    rng: &mut R,
) -> Vec<Recommendation> {
    if preferences.is_empty() {
        return Vec::new();
    }

    let genre_affinity = genre_averages(preferences, catalog);

    let mut scored: Vec<Recommendation> = catalog
        .iter()
        .filter(|movie| !preferences.contains_key(&movie.id))
        .map(|movie| {
            let mut score = movie.rating / 10.0;
            if let Some(average) = genre_affinity.get(movie.genre.as_str()) {
                // The affinity term tops out at 0.5, so intrinsic quality
                // stays the dominant signal.
                score += (average / 5.0) * 0.5;
            }
            score += rng.random_range(0.0..JITTER_BOUND);
            Recommendation {
                movie: movie.clone(),
                score,
            }
        })
        .collect();

    debug!("scored {} eligible movies", scored.len());
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored
}

/// Arithmetic mean of the user's preference values per genre, computed
/// over rated movies present in the catalog. Preference keys that no
/// longer resolve to a catalog movie contribute nothing.
pub fn genre_averages(preferences: &Preferences, catalog: &[Movie]) -> HashMap<String, f32> {
    let mut stats: HashMap<&str, (f32, u32)> = HashMap::new();
    for movie in catalog {
        if let Some(&value) = preferences.get(&movie.id) {
            let entry = stats.entry(movie.genre.as_str()).or_insert((0.0, 0));
            entry.0 += f32::from(value);
            entry.1 += 1;
        }
    }

    stats
        .into_iter()
        .map(|(genre, (sum, count))| (genre.to_string(), sum / count as f32))
        .collect()
}
