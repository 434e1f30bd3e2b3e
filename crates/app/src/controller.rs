//! The derivation controller: keeps the recommendation list consistent
//! with the latest catalog and preference state.
//!
//! The controller subscribes to both store notifiers. Each event carries
//! a full snapshot, so the controller caches the inputs locally and never
//! reaches back into a store. Recomputation happens synchronously inside
//! the notification; there is no scheduling.
//!
//! Derived state rules:
//! - preferences present: recompute and show the list
//! - preferences empty: clear the list and hide it
//! - `toggle_visibility` flips the flag without touching scores

use engine::{Recommendation, recommend};
use rand::SeedableRng;
use rand::rngs::StdRng;
use store::{CatalogEvent, Movie, Preferences, RatingEvent};
use tracing::debug;

pub struct DerivationController {
    movies: Vec<Movie>,
    preferences: Preferences,
    recommendations: Vec<Recommendation>,
    visible: bool,
    rng: StdRng,
}

impl DerivationController {
    /// Controller with an OS-seeded jitter source.
    pub fn new(movies: Vec<Movie>, preferences: Preferences) -> Self {
        Self::with_rng(movies, preferences, StdRng::from_os_rng())
    }

    /// Controller with a fixed seed, for reproducible output.
    pub fn with_seed(movies: Vec<Movie>, preferences: Preferences, seed: u64) -> Self {
        Self::with_rng(movies, preferences, StdRng::seed_from_u64(seed))
    }

    fn with_rng(movies: Vec<Movie>, preferences: Preferences, rng: StdRng) -> Self {
        let mut controller = Self {
            movies,
            preferences,
            recommendations: Vec::new(),
            visible: false,
            rng,
        };
        controller.recompute();
        controller
    }

    pub fn on_catalog_event(&mut self, event: &CatalogEvent) {
        let CatalogEvent::Changed { movies } = event;
        self.movies = movies.clone();
        self.recompute();
    }

    pub fn on_rating_event(&mut self, event: &RatingEvent) {
        let ratings = match event {
            RatingEvent::Saved { ratings, .. } => ratings,
            RatingEvent::Removed { ratings, .. } => ratings,
        };
        self.preferences = ratings.clone();
        self.recompute();
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Flip visibility. Scores are left exactly as they are.
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    fn recompute(&mut self) {
        if self.preferences.is_empty() {
            self.recommendations.clear();
            self.visible = false;
            return;
        }

        self.recommendations = recommend(&self.preferences, &self.movies, &mut self.rng);
        self.visible = true;
        debug!(
            count = self.recommendations.len(),
            "recomputed recommendations"
        );
    }
}

impl std::fmt::Debug for DerivationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivationController")
            .field("movies", &self.movies.len())
            .field("preferences", &self.preferences.len())
            .field("recommendations", &self.recommendations.len())
            .field("visible", &self.visible)
            .finish()
    }
}
