//! User Name Value Object
//!
//! Unique handle shown next to forum posts and comments.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Letters (any script), digits, `_`, `-` and `.`; 3 to 32 characters.
    /// Matching is exact: no case folding.
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let name = raw.as_ref().trim();
        let len = name.chars().count();

        if len < USER_NAME_MIN_LENGTH || len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be between {USER_NAME_MIN_LENGTH} and {USER_NAME_MAX_LENGTH} characters"
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(AppError::bad_request(
                "Username may only contain letters, digits, '_', '-' and '.'",
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
