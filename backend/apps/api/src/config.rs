//! Server Configuration
//!
//! Environment variables parsed once at startup. Parsing goes through a
//! lookup closure so it can be exercised without touching the process
//! environment.

use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Which session store backs the auth routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    pub session_store: SessionStoreKind,
    pub session_secret: Option<[u8; 32]>,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS is not a positive integer: {raw}")
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a socket address")?;

        let environment = match var("APP_ENV").as_deref() {
            None | Some("development") => Environment::Development,
            Some("production") => Environment::Production,
            Some(other) => bail!("APP_ENV must be development or production, got {other}"),
        };

        let session_store = match var("SESSION_STORE").as_deref() {
            None | Some("postgres") => SessionStoreKind::Postgres,
            Some("memory") => SessionStoreKind::Memory,
            Some(other) => bail!("SESSION_STORE must be postgres or memory, got {other}"),
        };

        let session_secret = var("SESSION_SECRET")
            .map(|raw| decode_secret(&raw))
            .transpose()?;
        if environment == Environment::Production && session_secret.is_none() {
            bail!("SESSION_SECRET must be set in production");
        }

        let password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            environment,
            session_store,
            session_secret,
            password_pepper,
            frontend_origins,
        })
    }

    /// No `SESSION_SECRET` was given, so each start signs with a new random key
    pub fn uses_ephemeral_secret(&self) -> bool {
        self.session_secret.is_none()
    }

    /// Auth configuration for this deployment
    pub fn auth_config(&self) -> AuthConfig {
        let base = match (self.environment, self.session_secret) {
            (Environment::Production, Some(secret)) => AuthConfig::production(secret),
            (Environment::Development, Some(secret)) => AuthConfig {
                session_secret: secret,
                ..AuthConfig::development()
            },
            (_, None) => AuthConfig::development(),
        };
        base.with_pepper(self.password_pepper.clone())
    }
}

fn decode_secret(raw: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(raw)
        .context("SESSION_SECRET is not valid base64")?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn secret_b64(byte: u8) -> String {
        general_purpose::STANDARD.encode([byte; 32])
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[("DATABASE_URL", "postgres://localhost/portal")]).unwrap();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.session_store, SessionStoreKind::Postgres);
        assert!(config.session_secret.is_none());
        assert!(config.password_pepper.is_none());
        assert_eq!(config.frontend_origins, vec!["http://localhost:5173"]);

        let auth = config.auth_config();
        assert!(!auth.cookie_secure);
        assert!(config.uses_ephemeral_secret());
        assert_ne!(
            config.auth_config().session_secret,
            auth.session_secret,
            "fallback secret changes on every start"
        );
    }

    #[test]
    fn test_database_url_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_production_requires_secret() {
        let err = parse(&[("DATABASE_URL", "postgres://db"), ("APP_ENV", "production")]);
        assert!(err.is_err());

        let secret = secret_b64(9);
        let config = parse(&[
            ("DATABASE_URL", "postgres://db"),
            ("APP_ENV", "production"),
            ("SESSION_SECRET", secret.as_str()),
        ])
        .unwrap();
        let auth = config.auth_config();
        assert!(auth.cookie_secure);
        assert_eq!(auth.session_secret, [9u8; 32]);
        assert!(!config.uses_ephemeral_secret());
    }

    #[test]
    fn test_secret_must_be_32_bytes() {
        let short = general_purpose::STANDARD.encode([1u8; 16]);
        assert!(parse(&[("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", short.as_str())]).is_err());
        assert!(parse(&[("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", "%%%")]).is_err());
    }

    #[test]
    fn test_explicit_values() {
        let secret = secret_b64(3);
        let config = parse(&[
            ("DATABASE_URL", "postgres://db"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("SESSION_STORE", "memory"),
            ("SESSION_SECRET", secret.as_str()),
            ("PASSWORD_PEPPER", "pepper"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.session_store, SessionStoreKind::Memory);
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );

        let auth = config.auth_config();
        assert!(!auth.cookie_secure);
        assert_eq!(auth.session_secret, [3u8; 32]);
        assert_eq!(auth.pepper(), Some(&b"pepper"[..]));
    }

    #[test]
    fn test_rejects_unknown_values() {
        for (key, value) in [
            ("APP_ENV", "staging"),
            ("SESSION_STORE", "redis"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
            ("BIND_ADDR", "localhost"),
        ] {
            let result = parse(&[("DATABASE_URL", "postgres://db"), (key, value)]);
            assert!(result.is_err(), "{key}={value}");
        }
    }
}
