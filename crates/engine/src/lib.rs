//! # Engine Crate
//!
//! The recommendation engine: a pure function from `(preferences,
//! catalog)` snapshots to a ranked, bounded suggestion list. The engine
//! holds no state of its own and persists nothing; the derivation layer
//! re-invokes it whenever either input changes.
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::recommend;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let recommendations = recommend(ratings.all(), catalog.movies(), &mut rng);
//! ```

pub mod recommend;

// Re-export the main entry points
pub use recommend::{JITTER_BOUND, MAX_RECOMMENDATIONS, Recommendation, genre_averages, recommend};
