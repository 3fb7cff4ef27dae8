//! Review rating bounds and comment handling.

use crate::error::CoreError;

/// Lowest allowed rating.
pub const MIN_RATING: i32 = 1;

/// Highest allowed rating.
pub const MAX_RATING: i32 = 5;

/// Maximum length for a review comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Validate that a rating is an integer in `[1, 5]`.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "El rating debe estar entre {MIN_RATING} y {MAX_RATING}"
        )))
    }
}

/// Trim a comment and validate its length.
pub fn normalize_comment(comment: &str) -> Result<String, CoreError> {
    let trimmed = comment.trim().to_string();
    if trimmed.len() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "El comentario supera el máximo de {MAX_COMMENT_LENGTH} caracteres"
        )));
    }
    Ok(trimmed)
}
