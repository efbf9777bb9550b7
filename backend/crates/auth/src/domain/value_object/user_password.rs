//! User Password Value Object
//!
//! Domain wrapper around `platform::password`: policy violations become
//! 400 errors with user-facing hints, derivation failures stay typed.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(stored.verify(&raw, None).unwrap());
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password for a new account; the policy applies.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::bad_request(format!("Password must be at least {min} characters"))
                    .with_action("Please choose a longer password")
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("Password must be at most {max} characters"))
                    .with_action("Please choose a shorter password")
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Login candidate. Never rejected: a password that could not have been
    /// registered simply fails verification.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::unvalidated(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stored credential in `"<key hex>.<salt hex>"` form.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password. CPU and memory heavy: call from a blocking
    /// context.
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.0.hash(pepper).map(Self)
    }

    /// Load from the database. Malformed values are accepted here and fail
    /// verification later.
    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(stored))
    }

    /// Stand-in used when no account matched, so the failure path costs the
    /// same derivation as a wrong password.
    pub fn timing_dummy() -> Self {
        Self(HashedPassword::timing_dummy())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> Result<bool, PasswordHashError> {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
