//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::database::connection::DatabasePool;

use ag_core::domain::entities::user::{Role, User};
use ag_core::errors::DomainError;
use ag_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, username, password_hash, role, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: DatabasePool,
}

impl PgUserRepository {
    /// Create a new PostgreSQL user repository
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        self.pool.get_pool()
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::Database(format!("Failed to get role: {}", e)))?;

        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::Database(format!("Failed to get id: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("Failed to get email: {}", e)))?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::Database(format!("Failed to get username: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Database(format!("Failed to get password_hash: {}", e)))?,
            role: role
                .parse::<Role>()
                .map_err(|e| DomainError::Database(format!("Invalid role in row: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

fn query_failed(e: sqlx::Error) -> DomainError {
    DomainError::Database(format!("Database query failed: {}", e))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1 LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(self.pool())
            .await
            .map_err(query_failed)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(query_failed)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(self.pool())
            .await
            .map_err(query_failed)?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            "INSERT INTO users (email, username, password_hash, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::Conflict {
                    message: "User with this email already exists".to_string(),
                },
                other => query_failed(other),
            })?;

        Self::row_to_user(&row)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<bool, DomainError> {
        self.pool.health_check().await.map_err(DomainError::from)
    }
}
