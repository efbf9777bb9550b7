//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC, Base64, constant-time comparison)
//! - Credential codec (Argon2id key derivation, salted, hex stored form)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
