//! Password Hashing and Verification
//!
//! Credential codec for stored passwords:
//! - Argon2id key derivation (memory-hard) with fixed parameters
//! - Stored form `"<derived key hex>.<salt hex>"`, salt freshly random per hash
//! - Constant-time comparison of derived keys
//! - Zeroization of clear text and peppered input
//!
//! The stored form carries no parameters, so [`KDF_MEMORY_KIB`],
//! [`KDF_ITERATIONS`] and [`KDF_PARALLELISM`] must never change for
//! existing rows.

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Minimum password length in code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Argon2 memory cost (19 MiB)
pub const KDF_MEMORY_KIB: u32 = 19_456;

/// Argon2 time cost
pub const KDF_ITERATIONS: u32 = 2;

/// Argon2 lanes
pub const KDF_PARALLELISM: u32 = 1;

/// Derived key length in bytes (128 hex characters when stored)
pub const DERIVED_KEY_LEN: usize = 64;

/// Random salt length in bytes (32 hex characters when stored)
pub const SALT_LEN: usize = 16;

const SEPARATOR: char = '.';

/// Well-formed stored value that matches no password. Verifying against it
/// costs one full derivation, same as a real account.
const TIMING_DUMMY: &str = concat!(
    "00000000000000000000000000000000000000000000000000000000000000000000",
    "000000000000000000000000000000000000000000000000000000000000",
    ".",
    "8f2c6a1d9b4e7f30a5c1d2e3f4a5b6c7"
);

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Key derivation failure. Never caused by user input.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl From<argon2::Error> for PasswordHashError {
    fn from(err: argon2::Error) -> Self {
        Self::HashingFailed(err.to_string())
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, NFKC-normalised and wiped from memory on drop.
///
/// Not `Clone`; `Debug` output is redacted.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
/// assert_eq!(format!("{password:?}"), "ClearTextPassword(\"[REDACTED]\")");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a password for a new account, enforcing the policy:
    /// not blank, 8 to 128 code points, no control characters.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::unvalidated(raw);
        let normalized = &password.0;

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Normalise a login candidate without applying the policy.
    pub fn unvalidated(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Derive a stored credential with a fresh random salt.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let salt_hex = hex::encode(salt);

        let key = derive_key(&self.peppered(pepper), &salt_hex)?;

        Ok(HashedPassword(format!(
            "{}{SEPARATOR}{salt_hex}",
            hex::encode(key.as_slice())
        )))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Stored credential `"<key hex>.<salt hex>"`.
///
/// Values loaded from storage are not validated up front: a malformed value
/// simply never verifies.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// A well-formed credential that matches nothing, for equalising the
    /// cost of failed lookups.
    pub fn timing_dummy() -> Self {
        Self(TIMING_DUMMY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a candidate password against this credential.
    ///
    /// `Ok(false)` for a wrong password or a malformed stored value;
    /// `Err` only when the derivation itself fails.
    pub fn verify(
        &self,
        candidate: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<bool, PasswordHashError> {
        let Some((expected, salt_hex)) = self.split() else {
            return Ok(false);
        };

        let derived = derive_key(&candidate.peppered(pepper), salt_hex)?;

        Ok(derived.as_slice().ct_eq(expected.as_slice()).into())
    }

    fn split(&self) -> Option<(Zeroizing<Vec<u8>>, &str)> {
        let (key_hex, salt_hex) = self.0.split_once(SEPARATOR)?;

        if salt_hex.len() != SALT_LEN * 2 || hex::decode(salt_hex).is_err() {
            return None;
        }

        let key = Zeroizing::new(hex::decode(key_hex).ok()?);
        if key.len() != DERIVED_KEY_LEN {
            return None;
        }

        Some((key, salt_hex))
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashedPassword").field(&"[HASH]").finish()
    }
}

/// The salt's hex text, not its decoded bytes, is the KDF salt input.
fn derive_key(
    password: &[u8],
    salt_hex: &str,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, PasswordHashError> {
    let params = Params::new(
        KDF_MEMORY_KIB,
        KDF_ITERATIONS,
        KDF_PARALLELISM,
        Some(DERIVED_KEY_LEN),
    )?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
    argon2.hash_password_into(password, salt_hex.as_bytes(), key.as_mut_slice())?;
    Ok(key)
}
