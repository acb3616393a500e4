//! Validation helpers for DTOs.

use validator::ValidationError;

const TEAM_ID_MAX_LENGTH: usize = 32;

/// Validates that a team id is 1 to 32 characters of lowercase ASCII letters,
/// digits, dashes, or underscores.
///
/// # Examples
///
/// ```ignore
/// validate_team_id("t1")        // Ok
/// validate_team_id("Team One")  // Err - uppercase and space
/// validate_team_id("")          // Err - empty
/// ```
pub fn validate_team_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || id.len() > TEAM_ID_MAX_LENGTH {
        let mut err = ValidationError::new("team_id_length");
        err.message = Some(
            format!(
                "Team ID must be between 1 and {} characters (got {})",
                TEAM_ID_MAX_LENGTH,
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        let mut err = ValidationError::new("team_id_format");
        err.message = Some(
            "Team ID must contain only lowercase letters, digits, dashes, or underscores".into(),
        );
        return Err(err);
    }

    Ok(())
}
