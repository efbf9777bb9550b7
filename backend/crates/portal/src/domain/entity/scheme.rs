//! Government Scheme Entity

use chrono::{DateTime, Utc};
use kernel::id::SchemeId;
use serde::Serialize;

/// Only schemes in this status are listed
pub const SCHEME_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentScheme {
    pub id: SchemeId,
    pub name: String,
    pub name_tamil: Option<String>,
    pub description: String,
    pub description_tamil: Option<String>,
    pub category: String,
    pub eligibility: String,
    pub amount: Option<String>,
    pub status: String,
    pub application_url: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl GovernmentScheme {
    pub fn is_active(&self) -> bool {
        self.status == SCHEME_STATUS_ACTIVE
    }
}

#[derive(Debug, Clone)]
pub struct NewScheme {
    pub name: String,
    pub name_tamil: Option<String>,
    pub description: String,
    pub description_tamil: Option<String>,
    pub category: String,
    pub eligibility: String,
    pub amount: Option<String>,
    pub application_url: Option<String>,
}

impl NewScheme {
    pub fn into_scheme(self) -> GovernmentScheme {
        GovernmentScheme {
            id: SchemeId::new(),
            name: self.name,
            name_tamil: self.name_tamil,
            description: self.description,
            description_tamil: self.description_tamil,
            category: self.category,
            eligibility: self.eligibility,
            amount: self.amount,
            status: SCHEME_STATUS_ACTIVE.to_string(),
            application_url: self.application_url,
            last_updated: Utc::now(),
        }
    }
}
