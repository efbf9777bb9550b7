//! Request identity and the access rules applied to it.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

/// Who is making the current request
#[derive(Debug, Clone, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(Arc<User>),
}

impl Identity {
    pub fn user(&self) -> Option<&Arc<User>> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Route requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Admin,
}

/// Decide whether `identity` may use a route guarded by `access`.
///
/// Anonymous callers of admin routes get `AdminRequired` (403), not 401.
pub fn authorize(identity: &Identity, access: Access) -> AuthResult<&Arc<User>> {
    match (access, identity.user()) {
        (Access::Authenticated, Some(user)) => Ok(user),
        (Access::Authenticated, None) => Err(AuthError::Unauthenticated),
        (Access::Admin, Some(user)) if user.is_admin => Ok(user),
        (Access::Admin, _) => Err(AuthError::AdminRequired),
    }
}
