//! Error types for the store crate.
//!
//! Validation failures are deliberately not errors: they are returned as a
//! field-keyed map (`ValidationErrors`) so callers can render one message
//! per form field. The enums below cover the cases that are genuinely
//! exceptional.

use crate::types::MovieId;
use std::collections::BTreeMap;
use thiserror::Error;

/// Map from field name to a human-readable message. An empty map means the
/// record is valid. All invalid fields are reported in one pass.
pub type ValidationErrors = BTreeMap<&'static str, String>;

/// Errors surfaced by a key-value storage backend.
///
/// These never escape the catalog or rating store: failed writes are
/// logged and swallowed, leaving the in-memory state authoritative for
/// the rest of the session.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend unavailable: {0}")]
    Backend(String),
}

/// Outcome of an `update` that could not commit.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The id does not exist in the catalog. Updates never validate a
    /// patch against an absent base record.
    #[error("movie {0} not found")]
    NotFound(MovieId),

    #[error("validation failed for {} field(s)", .0.len())]
    Invalid(ValidationErrors),
}

/// Rejection of a preference value outside the 1-5 range.
#[derive(Error, Debug)]
pub enum RatingError {
    #[error("rating {0} is out of range (expected 1-5)")]
    OutOfRange(u8),
}
