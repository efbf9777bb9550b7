//! PostgreSQL Repository Implementations

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::entity::{
    session::{Session, SessionData},
    user::User,
};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{
    email::Email, language::Language, user_id::UserId, user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Constraint names from the `users` migration
const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_USERNAME_KEY: &str = "users_username_key";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: UserLookup, value: &str) -> AuthResult<Option<User>> {
        let sql = format!(
            r#"
            SELECT
                id,
                username,
                email,
                password,
                first_name,
                last_name,
                phone,
                is_admin,
                preferred_language,
                created_at
            FROM users
            WHERE {} = $1
            "#,
            column.as_str()
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }
}

#[derive(Clone, Copy)]
enum UserLookup {
    Username,
    Email,
}

impl UserLookup {
    fn as_str(self) -> &'static str {
        match self {
            UserLookup::Username => "username",
            UserLookup::Email => "email",
        }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                username,
                email,
                password,
                first_name,
                last_name,
                phone,
                is_admin,
                preferred_language,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.is_admin)
        .bind(user.preferred_language.code())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_user_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password,
                first_name,
                last_name,
                phone,
                is_admin,
                preferred_language,
                created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        self.find_one(UserLookup::Username, username.as_str()).await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one(UserLookup::Email, email.as_str()).await
    }
}

/// Uniqueness violations become typed conflicts, keyed on the constraint
/// name rather than the message text.
fn map_user_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USERS_EMAIL_KEY) => return AuthError::EmailTaken,
                Some(USERS_USERNAME_KEY) => return AuthError::UsernameTaken,
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Session Store Implementation
// ============================================================================

const CREATE_SESSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS "session" (
    "sid" VARCHAR NOT NULL PRIMARY KEY,
    "sess" JSON NOT NULL,
    "expire" TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS "IDX_session_expire" ON "session" ("expire");
"#;

/// Durable session store shared by every server instance.
///
/// The `session` table is not part of the migrations; it is created on
/// first use, once per process.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
    schema_ready: Arc<OnceCell<()>>,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    async fn ensure_schema(&self) -> AuthResult<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                sqlx::raw_sql(CREATE_SESSION_TABLE)
                    .execute(&self.pool)
                    .await?;
                tracing::info!("Session table ready");
                Ok::<(), AuthError>(())
            })
            .await?;
        Ok(())
    }
}

impl SessionStore for PgSessionStore {
    async fn get(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        self.ensure_schema().await?;

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT sess, expire
            FROM "session"
            WHERE sid = $1 AND expire > $2
            "#,
        )
        .bind(session_id.to_string())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(|r| r.into_session(session_id)))
    }

    async fn set(&self, session: &Session) -> AuthResult<()> {
        self.ensure_schema().await?;

        sqlx::query(
            r#"
            INSERT INTO "session" (sid, sess, expire)
            VALUES ($1, $2::json, $3)
            ON CONFLICT (sid) DO UPDATE
            SET sess = EXCLUDED.sess, expire = EXCLUDED.expire
            "#,
        )
        .bind(session.session_id.to_string())
        .bind(Json(&session.data))
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn destroy(&self, session_id: Uuid) -> AuthResult<()> {
        self.ensure_schema().await?;

        sqlx::query(r#"DELETE FROM "session" WHERE sid = $1"#)
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.ensure_schema().await?;

        let deleted = sqlx::query(r#"DELETE FROM "session" WHERE expire <= $1"#)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    is_admin: bool,
    preferred_language: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_uuid(self.id),
            username: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password),
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            is_admin: self.is_admin,
            preferred_language: Language::from_db(&self.preferred_language),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    sess: Json<serde_json::Value>,
    expire: DateTime<Utc>,
}

impl SessionRow {
    /// Unreadable payloads count as no session.
    fn into_session(self, session_id: Uuid) -> Option<Session> {
        match serde_json::from_value::<SessionData>(self.sess.0) {
            Ok(data) => Some(Session {
                session_id,
                data,
                expires_at: self.expire,
            }),
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Discarding unreadable session payload"
                );
                None
            }
        }
    }
}
