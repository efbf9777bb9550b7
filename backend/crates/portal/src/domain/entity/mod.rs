//! Entities

pub mod feedback;
pub mod forum;
pub mod module;
pub mod progress;
pub mod scheme;
pub mod stats;

pub use feedback::{Feedback, NewFeedback};
pub use forum::{
    Author, ForumComment, ForumCommentWithAuthor, ForumPost, ForumPostWithAuthor,
    NewForumComment, NewForumPost,
};
pub use module::{Module, NewModule};
pub use progress::{ProgressUpdate, UserProgress};
pub use scheme::{GovernmentScheme, NewScheme};
pub use stats::AdminStats;
