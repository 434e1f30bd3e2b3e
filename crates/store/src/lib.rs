//! # Store Crate
//!
//! Reactive catalog and rating stores over an injected key-value
//! persistence port.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (`Movie`, `MovieDraft`, `MoviePatch`,
//!   `Preferences`, change events)
//! - **storage**: The persistence port (`KeyValueStore`) with in-memory
//!   and filesystem backends
//! - **catalog**: `CatalogStore` — CRUD, validation, id allocation,
//!   legacy image normalization
//! - **ratings**: `RatingStore` — the user's 1-5 preference signals
//! - **validate**: field-keyed validation shared by add and update
//! - **seed**: the bundled fallback catalog
//! - **notify**: the synchronous change notifier both stores emit through
//!
//! ## Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use store::{CatalogStore, MemoryStore, RatingStore};
//!
//! let port = Arc::new(MemoryStore::new());
//! let mut catalog = CatalogStore::load(port.clone());
//! let mut ratings = RatingStore::load(port);
//!
//! let movie = catalog.find_by_id(1).unwrap();
//! ratings.rate(movie.id, 5)?;
//! ```

pub mod catalog;
pub mod error;
pub mod notify;
pub mod ratings;
pub mod seed;
pub mod storage;
pub mod types;
pub mod validate;

// Re-export commonly used types for convenience
pub use catalog::{CatalogStore, placeholder_image};
pub use error::{RatingError, StorageError, UpdateError, ValidationErrors};
pub use notify::Notifier;
pub use ratings::RatingStore;
pub use seed::seed_catalog;
pub use storage::{CATALOG_KEY, FileStore, KeyValueStore, MemoryStore, RATINGS_KEY};
pub use types::{CatalogEvent, Movie, MovieDraft, MovieId, MoviePatch, Preferences, RatingEvent};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn both_stores_share_one_port_without_clashing() {
        let port = Arc::new(MemoryStore::new());
        let mut catalog = CatalogStore::load_with_year(port.clone(), 2026);
        let mut ratings = RatingStore::load(port.clone());

        let first_id = catalog.movies()[0].id;
        ratings.rate(first_id, 5).unwrap();
        catalog.remove(first_id);

        // Independent records under independent keys.
        assert!(port.get(CATALOG_KEY).unwrap().is_some());
        assert!(port.get(RATINGS_KEY).unwrap().is_some());
        assert_eq!(RatingStore::load(port).get(first_id), Some(5));
    }

    #[test]
    fn removing_a_rated_movie_leaves_the_preference_untouched() {
        let port = Arc::new(MemoryStore::new());
        let mut catalog = CatalogStore::load_with_year(port.clone(), 2026);
        let mut ratings = RatingStore::load(port);

        let id = catalog.movies()[0].id;
        ratings.rate(id, 4).unwrap();
        assert!(catalog.remove(id));

        assert!(catalog.find_by_id(id).is_none());
        assert_eq!(ratings.get(id), Some(4));
    }
}
