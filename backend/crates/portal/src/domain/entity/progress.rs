//! User Progress Entity
//!
//! One row per (user, module) pair.

use chrono::{DateTime, Utc};
use kernel::id::{ModuleId, ProgressId, UserId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: ProgressId,
    pub user_id: UserId,
    pub module_id: ModuleId,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Seconds watched, as last reported by the client
    pub watch_time: i32,
}

/// Client report for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub user_id: UserId,
    pub module_id: ModuleId,
    pub completed: bool,
    pub watch_time: i32,
}

impl ProgressUpdate {
    /// Apply this report on top of the stored row, if any.
    ///
    /// `completed_at` is stamped on the first completion, kept while the
    /// module stays completed and cleared when it is marked incomplete.
    pub fn apply(&self, existing: Option<&UserProgress>, now: DateTime<Utc>) -> UserProgress {
        let completed_at = match (self.completed, existing) {
            (false, _) => None,
            (true, Some(prev)) => prev.completed_at.or(Some(now)),
            (true, None) => Some(now),
        };

        UserProgress {
            id: existing.map(|p| p.id).unwrap_or_default(),
            user_id: self.user_id,
            module_id: self.module_id,
            completed: self.completed,
            completed_at,
            watch_time: self.watch_time,
        }
    }
}
