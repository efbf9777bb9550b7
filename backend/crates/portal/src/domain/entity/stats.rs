//! Admin dashboard counters

use serde::Serialize;

/// Point-in-time counts. Each is read separately, so the set is not a
/// consistent snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub total_modules: i64,
    pub total_posts: i64,
    pub total_feedback: i64,
    /// Progress rows marked completed
    pub completed_modules: i64,
}
