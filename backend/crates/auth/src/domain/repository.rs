//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user.
    ///
    /// Fails with `EmailTaken` / `UsernameTaken` when a uniqueness constraint
    /// rejects the row, even if a pre-check passed moments earlier.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Exact match
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>>;

    /// Match on the normalised address
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}

/// Session store trait
///
/// Backends may be durable (shared by every server instance) or ephemeral.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Live session by id. Expired entries are reported as `None`.
    async fn get(&self, session_id: Uuid) -> AuthResult<Option<Session>>;

    /// Insert or replace.
    async fn set(&self, session: &Session) -> AuthResult<()>;

    /// Remove; unknown ids are not an error.
    async fn destroy(&self, session_id: Uuid) -> AuthResult<()>;

    /// Purge expired entries, returning how many were removed.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
