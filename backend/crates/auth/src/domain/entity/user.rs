//! User Entity
//!
//! A registered account. The stored credential never leaves this crate's
//! persistence layer: responses are built from [`User`] through DTOs that
//! have no password field.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, language::Language, user_id::UserId, user_name::UserName,
    user_password::UserPassword,
};

/// Profile fields supplied at registration
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub preferred_language: Language,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    /// Grants the admin routes. Never settable through the API.
    pub is_admin: bool,
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new, non-admin account
    pub fn new(username: UserName, email: Email, password: UserPassword, profile: UserProfile) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            is_admin: false,
            preferred_language: profile.preferred_language,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            first_name: "Alice".to_string(),
            last_name: "Kumar".to_string(),
            phone: None,
            preferred_language: Language::Tamil,
        }
    }

    #[test]
    fn test_new_user_is_not_admin() {
        let user = User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            UserPassword::from_db("x.y"),
            profile(),
        );

        assert!(!user.is_admin);
        assert_eq!(user.preferred_language, Language::Tamil);
        assert_eq!(user.first_name, "Alice");
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        let make = || {
            User::new(
                UserName::new("alice").unwrap(),
                Email::new("alice@example.com").unwrap(),
                UserPassword::from_db("x.y"),
                profile(),
            )
        };
        assert_ne!(make().id, make().id);
    }
}
