//! Logout Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    /// Destroy the session the token points at, if any. A missing or forged
    /// token is a no-op.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        let Some(session_id) =
            session_token.and_then(|t| session_token::verify(&self.config.session_secret, t))
        else {
            return Ok(());
        };

        self.sessions.destroy(session_id).await?;

        tracing::info!(session_id = %session_id, "Session destroyed");
        Ok(())
    }
}
