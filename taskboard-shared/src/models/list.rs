/// List model and database operations
///
/// Lists are the ordered columns of a board. Their `position` values form a
/// dense 0-based sequence within the board; a list created without an
/// explicit position is appended at the end.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE lists (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     -- no FK: lists stay in place when their board is deleted
///     board_id UUID NOT NULL,
///     position INTEGER NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Titles of the three-list skeleton created with every new board
pub const DEFAULT_LIST_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// List record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    /// Unique list ID
    pub id: Uuid,

    /// List title
    pub title: String,

    /// Board this list belongs to
    pub board_id: Uuid,

    /// 0-based rank among the board's lists
    pub position: i32,

    /// When the list was created
    pub created_at: DateTime<Utc>,

    /// When the list was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateList {
    /// List title
    pub title: String,

    /// Board to add the list to
    pub board_id: Uuid,

    /// Explicit position; appended at the end when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

/// Input for updating a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateList {
    /// New title
    pub title: String,

    /// New position; unchanged when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl List {
    /// Lists a board's lists ordered by position
    pub async fn list_for_board(
        db: impl sqlx::PgExecutor<'_>,
        board_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, List>(
            r#"
            SELECT id, title, board_id, position, created_at, updated_at
            FROM lists
            WHERE board_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(db)
        .await
    }

    /// Finds a list by ID
    pub async fn find_by_id(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, List>(
            r#"
            SELECT id, title, board_id, position, created_at, updated_at
            FROM lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Next free position within a board (current count)
    pub async fn next_position(
        db: impl sqlx::PgExecutor<'_>,
        board_id: Uuid,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM lists WHERE board_id = $1",
        )
        .bind(board_id)
        .fetch_one(db)
        .await
    }

    /// Inserts a list at an explicit position
    pub async fn create_at(
        db: impl sqlx::PgExecutor<'_>,
        title: &str,
        board_id: Uuid,
        position: i32,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (title, board_id, position)
            VALUES ($1, $2, $3)
            RETURNING id, title, board_id, position, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(board_id)
        .bind(position)
        .fetch_one(db)
        .await
    }

    /// Updates title and optionally position, stamping `updated_at`
    pub async fn update(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
        data: UpdateList,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, List>(
            r#"
            UPDATE lists
            SET title = $1,
                position = COALESCE($2, position),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, title, board_id, position, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.position)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Deletes a list
    ///
    /// Tasks in the list are left in place; there is no application-level
    /// cascade.
    pub async fn delete(db: impl sqlx::PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_titles() {
        assert_eq!(DEFAULT_LIST_TITLES, ["To Do", "In Progress", "Done"]);
    }

    #[test]
    fn test_create_list_omits_absent_position() {
        let data = CreateList {
            title: "Backlog".to_string(),
            board_id: Uuid::new_v4(),
            position: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("position"));
    }
}
