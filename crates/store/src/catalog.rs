//! The catalog store: owns the mutable movie collection.
//!
//! Responsibilities:
//! - load the persisted snapshot, falling back to the seed catalog when
//!   the record is missing or unreadable
//! - normalize legacy image URLs on load (idempotent migration)
//! - CRUD with field validation and monotonic id allocation
//! - persist a full snapshot after every successful mutation
//! - emit a `CatalogEvent` after every successful mutation
//!
//! Persistence is best-effort: a failed write is logged at `warn` and the
//! in-memory state stays authoritative for the rest of the session.

use crate::error::{UpdateError, ValidationErrors};
use crate::notify::Notifier;
use crate::seed::seed_catalog;
use crate::storage::{CATALOG_KEY, KeyValueStore};
use crate::types::{CatalogEvent, Movie, MovieDraft, MovieId, MoviePatch};
use crate::validate::validate;
use chrono::Datelike;
use std::sync::Arc;
use tracing::{debug, warn};

/// Image host that proved unreliable in old persisted catalogs; rewritten
/// to the stable placeholder on load.
const UNSTABLE_IMAGE_HOST: &str = "unsplash.com";

/// Deterministic placeholder poster URL keyed by movie id.
pub fn placeholder_image(id: MovieId) -> String {
    format!("https://picsum.photos/seed/{id}/400/600")
}

pub struct CatalogStore<S> {
    store: Arc<S>,
    movies: Vec<Movie>,
    current_year: i32,
    notifier: Notifier<CatalogEvent>,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Load the catalog from the persistence port, with the year bound
    /// taken from the system clock.
    pub fn load(store: Arc<S>) -> Self {
        Self::load_with_year(store, chrono::Utc::now().year())
    }

    /// Load with a pinned `current_year`, for tests.
    pub fn load_with_year(store: Arc<S>, current_year: i32) -> Self {
        let persisted = match store.get(CATALOG_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Movie>>(&bytes) {
                Ok(movies) => Some(movies),
                Err(err) => {
                    warn!("discarding unreadable catalog record: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("catalog read failed, starting from seed: {err}");
                None
            }
        };

        let mut movies = persisted.unwrap_or_else(seed_catalog);
        let migrated = normalize_images(&mut movies);

        let catalog = Self {
            store,
            movies,
            current_year,
            notifier: Notifier::new(),
        };
        if migrated {
            debug!("migrated legacy image URLs, persisting normalized catalog");
            catalog.persist();
        }
        catalog
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn find_by_id(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Distinct genres in first-seen order.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for movie in &self.movies {
            if !genres.contains(&movie.genre) {
                genres.push(movie.genre.clone());
            }
        }
        genres
    }

    /// Case-insensitive title substring search, optionally restricted to
    /// an exact genre.
    pub fn search(&self, query: &str, genre: Option<&str>) -> Vec<&Movie> {
        let query = query.to_lowercase();
        self.movies
            .iter()
            .filter(|m| genre.is_none_or(|g| m.genre == g))
            .filter(|m| m.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Register a listener for catalog change events.
    pub fn subscribe(&mut self, listener: impl Fn(&CatalogEvent) + 'static) {
        self.notifier.subscribe(listener);
    }

    /// Validate and append a new movie, allocating the next id.
    ///
    /// On failure the catalog is untouched and every invalid field is
    /// reported in the returned map.
    pub fn add(&mut self, draft: MovieDraft) -> Result<Movie, ValidationErrors> {
        let errors = validate(&draft, self.current_year);
        if !errors.is_empty() {
            return Err(errors);
        }

        let id = self.next_id();
        let movie = draft.into_movie(id);
        self.movies.push(movie.clone());
        debug!(id, title = %movie.title, "added movie");
        self.commit();
        Ok(movie)
    }

    /// Merge `patch` onto the existing movie and re-validate the merged
    /// record. Commits only if validation passes; the id is immutable.
    pub fn update(&mut self, id: MovieId, patch: MoviePatch) -> Result<Movie, UpdateError> {
        let position = self
            .movies
            .iter()
            .position(|m| m.id == id)
            .ok_or(UpdateError::NotFound(id))?;

        let mut draft = self.movies[position].to_draft();
        patch.apply(&mut draft);

        let errors = validate(&draft, self.current_year);
        if !errors.is_empty() {
            return Err(UpdateError::Invalid(errors));
        }

        let movie = draft.into_movie(id);
        self.movies[position] = movie.clone();
        debug!(id, "updated movie");
        self.commit();
        Ok(movie)
    }

    /// Remove the movie with the given id. Returns false (and stays
    /// silent) if the id is absent. Preference entries for the removed
    /// movie are deliberately left alone; the engine ignores stale keys.
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        let removed = self.movies.len() != before;
        if removed {
            debug!(id, "removed movie");
            self.commit();
        }
        removed
    }

    /// Next identifier: `max(existing) + 1`, or 1 for an empty catalog.
    /// Ids are never reused after deletion.
    fn next_id(&self) -> MovieId {
        self.movies.iter().map(|m| m.id).max().map_or(1, |max| max + 1)
    }

    fn commit(&mut self) {
        self.persist();
        self.notifier.emit(&CatalogEvent::Changed {
            movies: self.movies.clone(),
        });
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.movies) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("could not serialize catalog snapshot: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(CATALOG_KEY, &bytes) {
            warn!("catalog write failed, keeping in-memory state: {err}");
        }
    }
}

impl<S> std::fmt::Debug for CatalogStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("movies", &self.movies.len())
            .field("current_year", &self.current_year)
            .finish()
    }
}

/// Rewrite any image hosted on the unstable provider to the placeholder
/// keyed by movie id. Returns true if anything changed. Running this on
/// an already-normalized catalog changes nothing.
fn normalize_images(movies: &mut [Movie]) -> bool {
    let mut changed = false;
    for movie in movies {
        if movie.image.contains(UNSTABLE_IMAGE_HOST) {
            movie.image = placeholder_image(movie.id);
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    const YEAR: i32 = 2026;

    fn empty_catalog() -> (Arc<MemoryStore>, CatalogStore<MemoryStore>) {
        // An explicitly persisted empty catalog, so the seed does not kick in.
        let store = Arc::new(MemoryStore::with_entry(CATALOG_KEY, b"[]"));
        let catalog = CatalogStore::load_with_year(store.clone(), YEAR);
        (store, catalog)
    }

    fn draft(title: &str, genre: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            genre: genre.to_string(),
            year: 2010,
            rating: 7.0,
            image: "https://example.com/poster.png".to_string(),
            description: "A movie.".to_string(),
        }
    }

    #[test]
    fn missing_record_falls_back_to_seed() {
        let catalog = CatalogStore::load_with_year(Arc::new(MemoryStore::new()), YEAR);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.movies(), seed_catalog().as_slice());
    }

    #[test]
    fn malformed_record_falls_back_to_seed() {
        let store = Arc::new(MemoryStore::with_entry(CATALOG_KEY, b"{not json"));
        let catalog = CatalogStore::load_with_year(store, YEAR);
        assert_eq!(catalog.movies(), seed_catalog().as_slice());
    }

    #[test]
    fn ids_allocate_monotonically_from_one() {
        let (_, mut catalog) = empty_catalog();

        let first = catalog.add(draft("First", "Drama")).unwrap();
        assert_eq!(first.id, 1);

        let second = catalog.add(draft("Second", "Action")).unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let (_, mut catalog) = empty_catalog();

        catalog.add(draft("First", "Drama")).unwrap();
        let second = catalog.add(draft("Second", "Action")).unwrap();
        assert!(catalog.remove(second.id));

        let third = catalog.add(draft("Third", "Comedy")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn invalid_add_reports_fields_and_leaves_catalog_unchanged() {
        let (_, mut catalog) = empty_catalog();

        let errors = catalog
            .add(MovieDraft {
                year: 1899,
                ..draft("Early", "Drama")
            })
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["year"], "Year must be 1900–2026");
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn update_merges_patch_and_keeps_id() {
        let (_, mut catalog) = empty_catalog();
        let movie = catalog.add(draft("Original", "Drama")).unwrap();

        let updated = catalog
            .update(
                movie.id,
                MoviePatch {
                    title: Some("Renamed".to_string()),
                    ..MoviePatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, movie.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.genre, "Drama");
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let (_, mut catalog) = empty_catalog();

        let err = catalog.update(99, MoviePatch::default()).unwrap_err();
        assert!(matches!(err, UpdateError::NotFound(99)));
    }

    #[test]
    fn invalid_update_does_not_commit() {
        let (_, mut catalog) = empty_catalog();
        let movie = catalog.add(draft("Original", "Drama")).unwrap();

        let err = catalog
            .update(
                movie.id,
                MoviePatch {
                    rating: Some(11.0),
                    ..MoviePatch::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, UpdateError::Invalid(ref e) if e.contains_key("rating")));
        assert_eq!(catalog.find_by_id(movie.id).unwrap().rating, 7.0);
    }

    #[test]
    fn remove_missing_id_is_a_noop() {
        let (_, mut catalog) = empty_catalog();
        catalog.add(draft("Only", "Drama")).unwrap();

        assert!(!catalog.remove(42));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn mutations_persist_and_survive_reload() {
        let (store, mut catalog) = empty_catalog();
        let movie = catalog.add(draft("Persisted", "Drama")).unwrap();

        let reloaded = CatalogStore::load_with_year(store, YEAR);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.find_by_id(movie.id).unwrap().title, "Persisted");
    }

    #[test]
    fn legacy_images_are_normalized_once() {
        let legacy = vec![Movie {
            image: "https://images.unsplash.com/photo-123".to_string(),
            ..draft("Legacy", "Drama").into_movie(3)
        }];
        let store = Arc::new(MemoryStore::with_entry(
            CATALOG_KEY,
            &serde_json::to_vec(&legacy).unwrap(),
        ));

        let catalog = CatalogStore::load_with_year(store.clone(), YEAR);
        let image = &catalog.find_by_id(3).unwrap().image;
        assert_eq!(image, "https://picsum.photos/seed/3/400/600");

        // The migration persists, so a second load sees stable URLs and
        // rewrites nothing: normalizing twice equals normalizing once.
        let again = CatalogStore::load_with_year(store, YEAR);
        assert_eq!(&again.find_by_id(3).unwrap().image, image);
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut movies = vec![Movie {
            image: "https://unsplash.com/a.png".to_string(),
            ..draft("A", "Drama").into_movie(1)
        }];

        assert!(normalize_images(&mut movies));
        let once = movies.clone();

        assert!(!normalize_images(&mut movies));
        assert_eq!(movies, once);
    }

    #[test]
    fn successful_mutations_emit_change_events() {
        let (_, mut catalog) = empty_catalog();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        catalog.subscribe(move |CatalogEvent::Changed { movies }| {
            sink.borrow_mut().push(movies.len());
        });

        let movie = catalog.add(draft("One", "Drama")).unwrap();
        catalog.remove(movie.id);

        // A failed add emits nothing.
        let _ = catalog.add(draft("", "Drama"));

        assert_eq!(&*seen.borrow(), &[1, 0]);
    }

    #[test]
    fn search_matches_substring_and_genre() {
        let (_, mut catalog) = empty_catalog();
        catalog.add(draft("The Long Night", "Drama")).unwrap();
        catalog.add(draft("Night Shift", "Comedy")).unwrap();
        catalog.add(draft("Daybreak", "Drama")).unwrap();

        assert_eq!(catalog.search("night", None).len(), 2);
        assert_eq!(catalog.search("night", Some("Drama")).len(), 1);
        assert_eq!(catalog.search("", Some("Drama")).len(), 2);
        assert!(catalog.search("nothing", None).is_empty());
    }

    #[test]
    fn genres_are_distinct_in_first_seen_order() {
        let (_, mut catalog) = empty_catalog();
        catalog.add(draft("A", "Drama")).unwrap();
        catalog.add(draft("B", "Action")).unwrap();
        catalog.add(draft("C", "Drama")).unwrap();

        assert_eq!(catalog.genres(), vec!["Drama", "Action"]);
    }
}
