//! Core domain types for the movie catalog.
//!
//! This module defines the data structures shared by the catalog and
//! rating stores:
//! - `Movie` is the persisted catalog record
//! - `MovieDraft` is the unit of validation (everything but the id)
//! - `MoviePatch` is a partial record merged onto an existing movie
//! - `Preferences` maps movie ids to the user's 1-5 star signal

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a movie. Allocated as `max(existing) + 1` and
/// never reused after deletion.
pub type MovieId = u32;

/// Per-user preference signals keyed by movie id. Entries exist only for
/// movies the user explicitly rated; absence means "unrated", not zero.
///
/// Serialized as a JSON object with stringified ids (`{"1": 5}`), which is
/// how `serde_json` renders integer map keys.
pub type Preferences = HashMap<MovieId, u8>;

/// A catalog entry.
///
/// `rating` is the intrinsic quality score in `[0, 10]`, distinct from the
/// user's 1-5 preference signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub rating: f32,
    pub image: String,
    pub description: String,
}

impl Movie {
    /// Extract the validatable fields, dropping the id.
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            genre: self.genre.clone(),
            year: self.year,
            rating: self.rating,
            image: self.image.clone(),
            description: self.description.clone(),
        }
    }
}

/// A candidate movie as submitted by a caller, before an id is allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub rating: f32,
    pub image: String,
    pub description: String,
}

impl MovieDraft {
    /// Promote the draft to a catalog record with the given id.
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            genre: self.genre,
            year: self.year,
            rating: self.rating,
            image: self.image,
            description: self.description,
        }
    }
}

/// Partial update for an existing movie. `None` fields are left untouched.
/// The id is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f32>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl MoviePatch {
    /// Merge this patch onto a draft in place.
    pub fn apply(&self, draft: &mut MovieDraft) {
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(genre) = &self.genre {
            draft.genre = genre.clone();
        }
        if let Some(year) = self.year {
            draft.year = year;
        }
        if let Some(rating) = self.rating {
            draft.rating = rating;
        }
        if let Some(image) = &self.image {
            draft.image = image.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
    }

    /// True if every field is `None`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre.is_none()
            && self.year.is_none()
            && self.rating.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }
}

/// Change notification emitted by the catalog store after every
/// successful mutation. Carries the full snapshot so subscribers never
/// need to reach back into the store.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    Changed { movies: Vec<Movie> },
}

/// Change notification emitted by the rating store.
///
/// `Saved` doubles as the user-visible acknowledgment hook: a front end
/// can subscribe to it to confirm the rating was recorded, while the
/// derivation layer uses the same event to recompute.
#[derive(Debug, Clone)]
pub enum RatingEvent {
    Saved {
        movie_id: MovieId,
        value: u8,
        ratings: Preferences,
    },
    Removed {
        movie_id: MovieId,
        ratings: Preferences,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MovieDraft {
        MovieDraft {
            title: "Test Movie".to_string(),
            genre: "Drama".to_string(),
            year: 2001,
            rating: 7.5,
            image: "https://picsum.photos/seed/1/400/600".to_string(),
            description: "A test movie.".to_string(),
        }
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut base = draft();
        let patch = MoviePatch {
            title: Some("Renamed".to_string()),
            year: Some(2005),
            ..MoviePatch::default()
        };

        patch.apply(&mut base);

        assert_eq!(base.title, "Renamed");
        assert_eq!(base.year, 2005);
        assert_eq!(base.genre, "Drama");
        assert_eq!(base.rating, 7.5);
    }

    #[test]
    fn empty_patch_is_a_noop() {
        let mut base = draft();
        let patch = MoviePatch::default();
        assert!(patch.is_empty());

        patch.apply(&mut base);
        assert_eq!(base, draft());
    }

    #[test]
    fn draft_round_trips_through_movie() {
        let movie = draft().into_movie(7);
        assert_eq!(movie.id, 7);
        assert_eq!(movie.to_draft(), draft());
    }
}
