//! Field validators shared by the request DTOs.

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
///
/// `#[validate(length(min = 1))]` lets `"   "` through; use this instead
/// for text that must carry content.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateComment {
///     #[validate(custom(function = "axum_helpers::validation::not_blank"))]
///     text: String,
/// }
/// ```
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("drill").is_ok());
        assert!(not_blank(" a ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t\n").is_err());
    }
}
