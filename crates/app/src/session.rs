//! Session orchestration: wires the stores, the derivation controller
//! and the authorization gate into one front-end-facing surface.
//!
//! Construction order matters: the controller is primed with the loaded
//! snapshots, then subscribed to both store notifiers, so every later
//! mutation recomputes the derived state before the mutating call
//! returns.

use crate::auth::{AuthError, AuthProvider, AuthSession, Credentials};
use crate::controller::DerivationController;
use engine::Recommendation;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use store::{
    CatalogStore, KeyValueStore, Movie, MovieDraft, MovieId, MoviePatch, Preferences, RatingError,
    RatingEvent, RatingStore, UpdateError, ValidationErrors,
};
use thiserror::Error;

/// Failures surfaced to a front end by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    #[error("movie {0} not found")]
    NotFound(MovieId),

    #[error(transparent)]
    Rating(#[from] RatingError),
}

pub struct MovieSession<S> {
    catalog: CatalogStore<S>,
    ratings: RatingStore<S>,
    derived: Rc<RefCell<DerivationController>>,
    auth: Box<dyn AuthProvider>,
}

impl<S: KeyValueStore> MovieSession<S> {
    /// Load both stores from the port and wire up the derivation layer.
    pub fn start(port: Arc<S>, auth: Box<dyn AuthProvider>) -> Self {
        Self::build(port, auth, None)
    }

    /// Like `start`, with a fixed jitter seed for reproducible rankings.
    pub fn start_seeded(port: Arc<S>, auth: Box<dyn AuthProvider>, seed: u64) -> Self {
        Self::build(port, auth, Some(seed))
    }

    fn build(port: Arc<S>, auth: Box<dyn AuthProvider>, seed: Option<u64>) -> Self {
        let mut catalog = CatalogStore::load(port.clone());
        let mut ratings = RatingStore::load(port);

        let movies = catalog.movies().to_vec();
        let preferences = ratings.all().clone();
        let controller = match seed {
            Some(seed) => DerivationController::with_seed(movies, preferences, seed),
            None => DerivationController::new(movies, preferences),
        };

        let derived = Rc::new(RefCell::new(controller));
        let sink = derived.clone();
        catalog.subscribe(move |event| sink.borrow_mut().on_catalog_event(event));
        let sink = derived.clone();
        ratings.subscribe(move |event| sink.borrow_mut().on_rating_event(event));

        Self {
            catalog,
            ratings,
            derived,
            auth,
        }
    }

    // Catalog reads, open to everyone.

    pub fn movies(&self) -> &[Movie] {
        self.catalog.movies()
    }

    pub fn find_movie(&self, id: MovieId) -> Option<&Movie> {
        self.catalog.find_by_id(id)
    }

    pub fn genres(&self) -> Vec<String> {
        self.catalog.genres()
    }

    pub fn search(&self, query: &str, genre: Option<&str>) -> Vec<&Movie> {
        self.catalog.search(query, genre)
    }

    // Catalog writes, gated on the capability provider. The gate lives
    // here so the store itself stays authorization-free.

    pub fn add_movie(&mut self, draft: MovieDraft) -> Result<Movie, SessionError> {
        self.require_authorized()?;
        self.catalog.add(draft).map_err(SessionError::Validation)
    }

    pub fn update_movie(&mut self, id: MovieId, patch: MoviePatch) -> Result<Movie, SessionError> {
        self.require_authorized()?;
        self.catalog.update(id, patch).map_err(|err| match err {
            UpdateError::NotFound(id) => SessionError::NotFound(id),
            UpdateError::Invalid(errors) => SessionError::Validation(errors),
        })
    }

    /// Returns false if the id was absent. Never cascades into ratings.
    pub fn remove_movie(&mut self, id: MovieId) -> Result<bool, SessionError> {
        self.require_authorized()?;
        Ok(self.catalog.remove(id))
    }

    // Ratings, ungated.

    pub fn rate(&mut self, id: MovieId, value: u8) -> Result<(), SessionError> {
        Ok(self.ratings.rate(id, value)?)
    }

    pub fn unrate(&mut self, id: MovieId) -> bool {
        self.ratings.unrate(id)
    }

    pub fn rating_of(&self, id: MovieId) -> Option<u8> {
        self.ratings.get(id)
    }

    pub fn preferences(&self) -> &Preferences {
        self.ratings.all()
    }

    /// Acknowledgment hook: front ends subscribe here to confirm saved
    /// ratings to the user.
    pub fn subscribe_ratings(&mut self, listener: impl Fn(&RatingEvent) + 'static) {
        self.ratings.subscribe(listener);
    }

    // Derived state.

    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.derived.borrow().recommendations().to_vec()
    }

    pub fn recommendations_visible(&self) -> bool {
        self.derived.borrow().visible()
    }

    pub fn toggle_recommendations(&mut self) {
        self.derived.borrow_mut().toggle_visibility();
    }

    // Authorization.

    pub fn is_authorized(&self) -> bool {
        self.auth.is_authorized()
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        self.auth.login(credentials)
    }

    pub fn logout(&mut self) {
        self.auth.logout();
    }

    fn require_authorized(&self) -> Result<(), SessionError> {
        if self.auth.is_authorized() {
            Ok(())
        } else {
            Err(AuthError::NotAuthorized.into())
        }
    }
}

impl<S> std::fmt::Debug for MovieSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieSession")
            .field("catalog", &self.catalog)
            .field("ratings", &self.ratings)
            .field("derived", &self.derived.borrow())
            .finish()
    }
}
