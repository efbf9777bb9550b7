//! Register Use Case
//!
//! Creates a new account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::login::start_session;
use crate::domain::entity::user::{User, UserProfile};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Validated registration input
#[derive(Debug)]
pub struct RegisterInput {
    pub username: UserName,
    pub email: Email,
    pub password: RawPassword,
    pub profile: UserProfile,
}

/// Authenticated account plus the signed cookie value
pub struct SessionOutput {
    pub user: User,
    pub session_token: String,
}

pub struct RegisterUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> RegisterUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    /// Email is checked before username. Both checks are advisory: the
    /// repository reports the same errors if the insert loses a race.
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<SessionOutput> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let pepper = self.config.password_pepper.clone();
        let raw = input.password;
        let password =
            tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, pepper.as_deref()))
                .await??;

        let user = User::new(input.username, input.email, password, input.profile);
        self.users.create(&user).await?;

        let session_token = start_session(self.sessions.as_ref(), &self.config, &user).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User registered"
        );

        Ok(SessionOutput {
            user,
            session_token,
        })
    }
}
