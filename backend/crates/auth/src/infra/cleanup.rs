//! Periodic expired-session cleanup

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::repository::SessionStore;

/// Default pause between two sweeps
pub const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Sweep expired sessions from `store` every `every`, starting immediately.
///
/// Failures are logged and the next tick retries. The task runs until the
/// returned handle is aborted or the runtime shuts down.
pub fn spawn_session_cleanup<S>(store: S, every: Duration) -> JoinHandle<()>
where
    S: SessionStore + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match store.cleanup_expired().await {
                Ok(deleted) => {
                    tracing::debug!(sessions_deleted = deleted, "Periodic session cleanup");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Periodic session cleanup failed");
                }
            }
        }
    })
}
