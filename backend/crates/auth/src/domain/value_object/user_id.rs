//! User identifier, shared with every crate that references users.

pub use kernel::id::UserId;
