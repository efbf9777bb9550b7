//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use serde::{Deserialize, Serialize};

use crate::application::{LoginInput, RegisterInput};
use crate::domain::entity::user::{User, UserProfile};
use crate::domain::value_object::{
    email::Email, language::Language, user_name::UserName, user_password::RawPassword,
};
use crate::error::AuthResult;

/// Longest accepted first / last name
const PERSON_NAME_MAX_LENGTH: usize = 100;
const PHONE_MAX_LENGTH: usize = 32;

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
}

impl RegisterRequest {
    /// Validate every field. `isAdmin` is not part of the request: unknown
    /// fields are ignored, so clients cannot grant themselves admin.
    pub fn validate(self) -> AuthResult<RegisterInput> {
        let email = Email::new(&self.email)?;
        let username = UserName::new(&self.username)?;
        let first_name = person_name("First name", &self.first_name)?;
        let last_name = person_name("Last name", &self.last_name)?;

        let phone = match self.phone.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(phone) if phone.chars().count() > PHONE_MAX_LENGTH => {
                return Err(AppError::bad_request(format!(
                    "Phone must be at most {PHONE_MAX_LENGTH} characters"
                ))
                .into());
            }
            Some(phone) => Some(phone.to_string()),
        };

        let preferred_language = match self.preferred_language.as_deref() {
            Some(code) => Language::from_code(code)?,
            None => Language::default(),
        };

        let password = RawPassword::new(self.password)?;

        Ok(RegisterInput {
            username,
            email,
            password,
            profile: UserProfile {
                first_name,
                last_name,
                phone,
                preferred_language,
            },
        })
    }
}

fn person_name(field: &str, raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    if name.chars().count() > PERSON_NAME_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {PERSON_NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

// ============================================================================
// Login
// ============================================================================

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            email: req.email,
            password: req.password,
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// User
// ============================================================================

/// Public view of an account. Has no password field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            is_admin: user.is_admin,
            preferred_language: user.preferred_language,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
