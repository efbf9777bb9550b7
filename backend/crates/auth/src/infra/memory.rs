//! In-memory session store
//!
//! Process-local and ephemeral: sessions vanish on restart and are not
//! shared between instances. Expired entries are evicted on read, and
//! swept from the whole map every [`SWEEP_EVERY`] inserts.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// Inserts between two full sweeps of expired sessions
pub const SWEEP_EVERY: usize = 64;

#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
    inserts: Arc<AtomicUsize>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn sweep(&self) -> u64 {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        before.saturating_sub(self.sessions.len()) as u64
    }
}

impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        let session = self.sessions.get(&session_id).map(|entry| entry.value().clone());

        match session {
            Some(session) if session.is_expired() => {
                self.sessions.remove(&session_id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn set(&self, session: &Session) -> AuthResult<()> {
        self.sessions.insert(session.session_id, session.clone());

        if (self.inserts.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            let swept = self.sweep();
            if swept > 0 {
                tracing::debug!(sessions_deleted = swept, "Swept expired in-memory sessions");
            }
        }
        Ok(())
    }

    async fn destroy(&self, session_id: Uuid) -> AuthResult<()> {
        self.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        Ok(self.sweep())
    }
}
