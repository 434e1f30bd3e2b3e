//! Field validation for catalog records.
//!
//! Validation never fails early: every invalid field is reported in a
//! single pass, keyed by field name, so a form can render all messages
//! at once. An empty map means the draft is acceptable.

use crate::error::ValidationErrors;
use crate::types::MovieDraft;
use url::Url;

/// Lower bound for the release year.
pub const MIN_YEAR: i32 = 1900;

/// Validate a draft against the catalog's field rules.
///
/// `current_year` is passed in rather than read from the clock so tests
/// can pin it.
pub fn validate(draft: &MovieDraft, current_year: i32) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.title.trim().is_empty() {
        errors.insert("title", "Title is required".to_string());
    }
    if draft.genre.trim().is_empty() {
        errors.insert("genre", "Genre is required".to_string());
    }
    if draft.year < MIN_YEAR || draft.year > current_year {
        errors.insert("year", format!("Year must be 1900–{current_year}"));
    }
    // NaN fails the range check, so it is rejected along with out-of-range.
    if !(0.0..=10.0).contains(&draft.rating) {
        errors.insert("rating", "Rating must be 0–10".to_string());
    }
    if Url::parse(&draft.image).is_err() {
        errors.insert("image", "Image URL is invalid".to_string());
    }
    if draft.description.trim().is_empty() {
        errors.insert("description", "Description is required".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    fn valid_draft() -> MovieDraft {
        MovieDraft {
            title: "Arrival".to_string(),
            genre: "Sci-Fi".to_string(),
            year: 2016,
            rating: 7.9,
            image: "https://picsum.photos/seed/11/400/600".to_string(),
            description: "A linguist decodes an alien language.".to_string(),
        }
    }

    #[test]
    fn valid_draft_produces_no_errors() {
        assert!(validate(&valid_draft(), YEAR).is_empty());
    }

    #[test]
    fn all_invalid_fields_reported_in_one_pass() {
        let draft = MovieDraft {
            title: "   ".to_string(),
            year: 1899,
            ..valid_draft()
        };

        let errors = validate(&draft, YEAR);

        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("title"));
        assert_eq!(errors["year"], "Year must be 1900–2026");
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let mut draft = valid_draft();

        draft.year = 1900;
        assert!(validate(&draft, YEAR).is_empty());

        draft.year = YEAR;
        assert!(validate(&draft, YEAR).is_empty());

        draft.year = YEAR + 1;
        assert!(validate(&draft, YEAR).contains_key("year"));
    }

    #[test]
    fn rating_rejects_nan_and_out_of_range() {
        let mut draft = valid_draft();

        draft.rating = f32::NAN;
        assert!(validate(&draft, YEAR).contains_key("rating"));

        draft.rating = 10.5;
        assert!(validate(&draft, YEAR).contains_key("rating"));

        draft.rating = 0.0;
        assert!(validate(&draft, YEAR).is_empty());

        draft.rating = 10.0;
        assert!(validate(&draft, YEAR).is_empty());
    }

    #[test]
    fn image_must_be_a_parseable_url() {
        let mut draft = valid_draft();

        draft.image = "not a url".to_string();
        assert_eq!(validate(&draft, YEAR)["image"], "Image URL is invalid");

        draft.image = "https://example.com/poster.png".to_string();
        assert!(validate(&draft, YEAR).is_empty());
    }

    #[test]
    fn whitespace_only_text_fields_are_rejected() {
        let draft = MovieDraft {
            genre: "\t".to_string(),
            description: " ".to_string(),
            ..valid_draft()
        };

        let errors = validate(&draft, YEAR);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("genre"));
        assert!(errors.contains_key("description"));
    }
}
