//! Session Entity
//!
//! Server-side session record keyed by an opaque session id. The only
//! payload is the authenticated user's id.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;

/// Serialized session payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: Uuid,
    pub data: SessionData,
    /// Fixed at issuance; sessions do not slide.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            data: SessionData { user_id },
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.data.user_id
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
