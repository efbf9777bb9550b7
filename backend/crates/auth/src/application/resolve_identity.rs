//! Resolve Identity Use Case
//!
//! Maps the session cookie of a request to the account it belongs to.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::identity::Identity;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::AuthResult;

pub struct ResolveIdentityUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> ResolveIdentityUseCase<U, S>
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

    /// `Anonymous` for a missing, forged, unknown or expired session and for
    /// a session whose account no longer exists (that session is destroyed).
    /// Store or repository failures are errors, not anonymity.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<Identity> {
        let Some(session_id) =
            session_token.and_then(|t| session_token::verify(&self.config.session_secret, t))
        else {
            return Ok(Identity::Anonymous);
        };

        let Some(session) = self.sessions.get(session_id).await? else {
            return Ok(Identity::Anonymous);
        };

        if session.is_expired() {
            self.sessions.destroy(session_id).await?;
            return Ok(Identity::Anonymous);
        }

        match self.users.find_by_id(&session.user_id()).await? {
            Some(user) => Ok(Identity::Authenticated(Arc::new(user))),
            None => {
                tracing::warn!(
                    session_id = %session_id,
                    user_id = %session.user_id(),
                    "Session refers to a missing user; destroying it"
                );
                self.sessions.destroy(session_id).await?;
                Ok(Identity::Anonymous)
            }
        }
    }
}
