//! Entities

pub mod session;
pub mod user;

pub use session::{Session, SessionData};
pub use user::{User, UserProfile};
