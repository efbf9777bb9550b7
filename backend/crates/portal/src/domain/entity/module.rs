//! Learning Module Entity

use chrono::{DateTime, Utc};
use kernel::id::ModuleId;
use serde::Serialize;

/// Bilingual video lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    pub title_tamil: Option<String>,
    pub description: String,
    pub description_tamil: Option<String>,
    pub category: String,
    pub video_url: Option<String>,
    pub pdf_url: Option<String>,
    /// Seconds
    pub duration: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewModule {
    pub title: String,
    pub title_tamil: Option<String>,
    pub description: String,
    pub description_tamil: Option<String>,
    pub category: String,
    pub video_url: Option<String>,
    pub pdf_url: Option<String>,
    pub duration: Option<i32>,
    pub is_active: bool,
}

impl NewModule {
    pub fn into_module(self) -> Module {
        Module {
            id: ModuleId::new(),
            title: self.title,
            title_tamil: self.title_tamil,
            description: self.description,
            description_tamil: self.description_tamil,
            category: self.category,
            video_url: self.video_url,
            pdf_url: self.pdf_url,
            duration: self.duration,
            is_active: self.is_active,
            created_at: Utc::now(),
        }
    }
}
