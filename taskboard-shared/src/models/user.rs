/// User model and database operations
///
/// Users own boards and can be added to other users' boards through
/// membership rows. There is no authentication; the demo user constant in
/// the crate root stands in for a logged-in identity.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE,
///     name VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Email address (unique)
    pub email: String,

    /// Display name
    pub name: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (must not already exist)
    pub email: String,

    /// Display name
    pub name: String,
}

/// Input for updating a user
///
/// Both fields are required; users are otherwise immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New email address
    pub email: String,

    /// New display name
    pub name: String,
}

impl User {
    /// Lists all users ordered by display name
    pub async fn list(db: impl sqlx::PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at FROM users ORDER BY name ASC",
        )
        .fetch_all(db)
        .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Finds a user by email, used for the duplicate-email check on create
    pub async fn find_by_email(
        db: impl sqlx::PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Creates a new user
    pub async fn create(
        db: impl sqlx::PgExecutor<'_>,
        data: CreateUser,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            RETURNING id, email, name, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.name)
        .fetch_one(db)
        .await
    }

    /// Updates a user's email and name
    pub async fn update(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, name = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, email, name, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.name)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Deletes a user
    ///
    /// Returns true if a row was removed.
    pub async fn delete(db: impl sqlx::PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
