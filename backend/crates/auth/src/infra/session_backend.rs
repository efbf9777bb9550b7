//! Runtime-selected session store

use uuid::Uuid;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;
use crate::infra::memory::MemorySessionStore;
use crate::infra::postgres::PgSessionStore;

/// Session backend chosen from configuration at startup
#[derive(Clone)]
pub enum SessionBackend {
    /// Durable, shared by all instances
    Postgres(PgSessionStore),
    /// Ephemeral, this process only
    Memory(MemorySessionStore),
}

impl SessionBackend {
    pub fn name(&self) -> &'static str {
        match self {
            SessionBackend::Postgres(_) => "postgres",
            SessionBackend::Memory(_) => "memory",
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, SessionBackend::Postgres(_))
    }
}

impl SessionStore for SessionBackend {
    async fn get(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        match self {
            SessionBackend::Postgres(store) => store.get(session_id).await,
            SessionBackend::Memory(store) => store.get(session_id).await,
        }
    }

    async fn set(&self, session: &Session) -> AuthResult<()> {
        match self {
            SessionBackend::Postgres(store) => store.set(session).await,
            SessionBackend::Memory(store) => store.set(session).await,
        }
    }

    async fn destroy(&self, session_id: Uuid) -> AuthResult<()> {
        match self {
            SessionBackend::Postgres(store) => store.destroy(session_id).await,
            SessionBackend::Memory(store) => store.destroy(session_id).await,
        }
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        match self {
            SessionBackend::Postgres(store) => store.cleanup_expired().await,
            SessionBackend::Memory(store) => store.cleanup_expired().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_id::UserId;

    #[tokio::test]
    async fn test_memory_variant_delegates() {
        let backend = SessionBackend::Memory(MemorySessionStore::new());
        assert_eq!(backend.name(), "memory");
        assert!(!backend.is_durable());

        let session = Session::new(UserId::new(), chrono::Duration::hours(1));
        backend.set(&session).await.unwrap();
        assert!(backend.get(session.session_id).await.unwrap().is_some());
        backend.destroy(session.session_id).await.unwrap();
        assert!(backend.get(session.session_id).await.unwrap().is_none());
    }
}
