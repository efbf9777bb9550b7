//! Login Use Case
//!
//! Authenticates a user by email + password and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::SessionOutput;
use crate::application::session_token;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
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

    /// Unknown email and wrong password both end in `InvalidCredentials`
    /// after one full key derivation.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<SessionOutput> {
        let candidate = RawPassword::for_login(input.password);

        let user = match Email::new(&input.email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let stored = user
            .as_ref()
            .map(|u| u.password.clone())
            .unwrap_or_else(UserPassword::timing_dummy);
        let pepper = self.config.password_pepper.clone();

        let matches =
            tokio::task::spawn_blocking(move || stored.verify(&candidate, pepper.as_deref()))
                .await??;

        let user = match user {
            Some(user) if matches => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let session_token = start_session(self.sessions.as_ref(), &self.config, &user).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(SessionOutput {
            user,
            session_token,
        })
    }
}

/// Persist a fresh session for `user` and return the signed cookie value.
pub(crate) async fn start_session<S: SessionStore>(
    sessions: &S,
    config: &AuthConfig,
    user: &User,
) -> AuthResult<String> {
    let session = Session::new(user.id, config.session_ttl_chrono());
    sessions.set(&session).await?;
    Ok(session_token::sign(&config.session_secret, session.session_id))
}
