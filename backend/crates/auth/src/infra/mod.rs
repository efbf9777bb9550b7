//! Infrastructure Layer
//!
//! Database and in-memory implementations of the repository traits.

pub mod cleanup;
pub mod memory;
pub mod postgres;
pub mod session_backend;

pub use cleanup::{SESSION_CLEANUP_INTERVAL, spawn_session_cleanup};
pub use memory::MemorySessionStore;
pub use postgres::{PgSessionStore, PgUserRepository};
pub use session_backend::SessionBackend;
