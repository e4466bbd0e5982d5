use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Difficulty;

/// Startup parameters for one quiz session, as collected from the
/// operator. Validated before any generation happens.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct SessionRequestDto {
    #[validate(length(min = 1, message = "topic must not be empty"))]
    pub topic: String,

    #[validate(custom(function = validate_level))]
    pub level: String,

    #[validate(range(min = 1, message = "question count must be positive"))]
    pub count: i64,
}

fn validate_level(level: &str) -> Result<(), validator::ValidationError> {
    if Difficulty::parse(level).is_some() {
        Ok(())
    } else {
        let choices = Difficulty::ALL
            .iter()
            .map(|difficulty| difficulty.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let mut err = validator::ValidationError::new("unknown_level");
        err.message = Some(format!("difficulty must be one of: {}", choices).into());
        Err(err)
    }
}
