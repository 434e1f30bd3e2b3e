//! The rating store: the user's per-movie preference signals.
//!
//! A preference is an integer in 1-5; out-of-range values are rejected
//! here even when the front end already constrains its inputs.
//! Persistence follows the same snapshot-per-mutation,
//! swallow-on-failure policy as the catalog store.

use crate::error::RatingError;
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, RATINGS_KEY};
use crate::types::{MovieId, Preferences, RatingEvent};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RatingStore<S> {
    store: Arc<S>,
    ratings: Preferences,
    notifier: Notifier<RatingEvent>,
}

impl<S: KeyValueStore> RatingStore<S> {
    /// Load persisted preferences; missing or unreadable data starts the
    /// session with an empty map.
    pub fn load(store: Arc<S>) -> Self {
        let ratings = match store.get(RATINGS_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Preferences>(&bytes) {
                Ok(ratings) => ratings,
                Err(err) => {
                    warn!("discarding unreadable ratings record: {err}");
                    Preferences::new()
                }
            },
            Ok(None) => Preferences::new(),
            Err(err) => {
                warn!("ratings read failed, starting empty: {err}");
                Preferences::new()
            }
        };

        Self {
            store,
            ratings,
            notifier: Notifier::new(),
        }
    }

    pub fn all(&self) -> &Preferences {
        &self.ratings
    }

    pub fn get(&self, movie_id: MovieId) -> Option<u8> {
        self.ratings.get(&movie_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Register a listener for rating change events.
    pub fn subscribe(&mut self, listener: impl Fn(&RatingEvent) + 'static) {
        self.notifier.subscribe(listener);
    }

    /// Upsert the preference for a movie.
    ///
    /// The emitted `Saved` event carries the new snapshot and doubles as
    /// the acknowledgment hook for front ends.
    pub fn rate(&mut self, movie_id: MovieId, value: u8) -> Result<(), RatingError> {
        if !(1..=5).contains(&value) {
            return Err(RatingError::OutOfRange(value));
        }

        self.ratings.insert(movie_id, value);
        debug!(movie_id, value, "saved rating");
        self.persist();
        self.notifier.emit(&RatingEvent::Saved {
            movie_id,
            value,
            ratings: self.ratings.clone(),
        });
        Ok(())
    }

    /// Delete the preference for a movie, if present.
    pub fn unrate(&mut self, movie_id: MovieId) -> bool {
        if self.ratings.remove(&movie_id).is_none() {
            return false;
        }

        debug!(movie_id, "removed rating");
        self.persist();
        self.notifier.emit(&RatingEvent::Removed {
            movie_id,
            ratings: self.ratings.clone(),
        });
        true
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.ratings) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("could not serialize ratings snapshot: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(RATINGS_KEY, &bytes) {
            warn!("ratings write failed, keeping in-memory state: {err}");
        }
    }
}

impl<S> std::fmt::Debug for RatingStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingStore")
            .field("ratings", &self.ratings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn starts_empty_without_persisted_data() {
        let ratings = RatingStore::load(Arc::new(MemoryStore::new()));
        assert!(ratings.is_empty());
    }

    #[test]
    fn malformed_record_starts_empty() {
        let store = Arc::new(MemoryStore::with_entry(RATINGS_KEY, b"[[1,2]]"));
        let ratings = RatingStore::load(store);
        assert!(ratings.is_empty());
    }

    #[test]
    fn rate_upserts_and_survives_reload() {
        let store = Arc::new(MemoryStore::new());
        let mut ratings = RatingStore::load(store.clone());

        ratings.rate(3, 4).unwrap();
        ratings.rate(3, 5).unwrap();

        let reloaded = RatingStore::load(store);
        assert_eq!(reloaded.get(3), Some(5));
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut ratings = RatingStore::load(Arc::new(MemoryStore::new()));

        assert!(matches!(ratings.rate(1, 0), Err(RatingError::OutOfRange(0))));
        assert!(matches!(ratings.rate(1, 6), Err(RatingError::OutOfRange(6))));
        assert!(ratings.is_empty());
    }

    #[test]
    fn persisted_layout_uses_stringified_ids() {
        let store = Arc::new(MemoryStore::new());
        let mut ratings = RatingStore::load(store.clone());
        ratings.rate(7, 3).unwrap();

        let bytes = store.get(RATINGS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["7"], 3);
    }

    #[test]
    fn unrate_deletes_the_key() {
        let store = Arc::new(MemoryStore::new());
        let mut ratings = RatingStore::load(store.clone());
        ratings.rate(1, 5).unwrap();

        assert!(ratings.unrate(1));
        assert!(!ratings.unrate(1));
        assert!(RatingStore::load(store).is_empty());
    }

    #[test]
    fn saved_event_carries_value_and_snapshot() {
        let mut ratings = RatingStore::load(Arc::new(MemoryStore::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        ratings.subscribe(move |event| {
            if let RatingEvent::Saved {
                movie_id,
                value,
                ratings,
            } = event
            {
                sink.borrow_mut().push((*movie_id, *value, ratings.len()));
            }
        });

        ratings.rate(2, 4).unwrap();
        ratings.rate(9, 1).unwrap();
        let _ = ratings.rate(9, 9);

        assert_eq!(&*seen.borrow(), &[(2, 4, 1), (9, 1, 2)]);
    }
}
