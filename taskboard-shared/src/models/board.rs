/// Board model and database operations
///
/// Boards are the top-level containers. Creating a board also creates the
/// default three-list skeleton and an `owner` membership for the creator;
/// that orchestration lives in the store backends so it can run inside a
/// transaction.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     -- no FK: boards stay in place when their owner is deleted
///     user_id UUID NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::membership::BoardMember;

/// Board record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID
    pub id: Uuid,

    /// Board title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user
    pub user_id: Uuid,

    /// When the board was created
    pub created_at: DateTime<Utc>,

    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
}

/// Board record with its membership collection, as returned by `GET /api/boards/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardWithMembers {
    /// The board itself
    #[serde(flatten)]
    pub board: Board,

    /// Members of the board, oldest first
    pub members: Vec<BoardMember>,
}

/// Input for creating a new board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoard {
    /// Board title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Creating user; becomes the owner
    pub user_id: Uuid,
}

/// Input for updating a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBoard {
    /// New title
    pub title: String,

    /// New description (absent clears it)
    pub description: Option<String>,
}

impl Board {
    /// Lists boards visible to a user: owned by them OR where they hold a
    /// membership row. Newest first.
    pub async fn list_for_user(
        db: impl sqlx::PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            SELECT DISTINCT b.id, b.title, b.description, b.user_id,
                            b.created_at, b.updated_at
            FROM boards b
            LEFT JOIN board_members bm ON b.id = bm.board_id
            WHERE b.user_id = $1 OR bm.user_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Finds a board by ID
    pub async fn find_by_id(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Checks whether a board exists
    pub async fn exists(db: impl sqlx::PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM boards WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
    }

    /// Inserts a board row
    pub async fn create(
        db: impl sqlx::PgExecutor<'_>,
        data: CreateBoard,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, user_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .fetch_one(db)
        .await
    }

    /// Updates title and description, stamping `updated_at`
    pub async fn update(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
        data: UpdateBoard,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET title = $1, description = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, title, description, user_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Deletes a board
    ///
    /// Returns true if a row was removed. Lists and tasks are not cascaded
    /// at the application layer.
    pub async fn delete(db: impl sqlx::PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
