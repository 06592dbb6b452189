/// Task model and database operations
///
/// Tasks are the cards of the board. Within a list their `position` values
/// form a dense 0-based sequence; a task created without an explicit
/// position is appended at the end. Moving a task is handled by the store
/// backends (see `store`), which renumber every displaced sibling
/// atomically.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     -- no FK: tasks stay in place when their list is deleted
///     list_id UUID NOT NULL,
///     position INTEGER NOT NULL,
///     priority task_priority NOT NULL DEFAULT 'medium',
///     due_date TIMESTAMPTZ,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     -- no FK: the assignment outlives the user; the joined name comes back empty
///     assigned_to UUID,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Converts the priority to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Task record, with the assignee's name joined in when assigned
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// List this task belongs to
    pub list_id: Uuid,

    /// 0-based rank among the list's tasks
    pub position: i32,

    /// Priority (defaults to medium)
    pub priority: Priority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Completion flag
    pub completed: bool,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,

    /// Assignee display name (joined from users)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// List to add the task to
    pub list_id: Uuid,

    /// Explicit position; appended at the end when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: Priority,

    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Optional assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
}

/// Input for updating a task
///
/// `title` is required. Nullable columns (`description`, `due_date`,
/// `assigned_to`) take the given value, clearing them when absent; the
/// remaining fields keep their current value when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: String,

    /// New description
    pub description: Option<String>,

    /// Move to another list without renumbering (plain field update)
    pub list_id: Option<Uuid>,

    /// New position
    pub position: Option<i32>,

    /// New priority
    pub priority: Option<Priority>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New assignee
    pub assigned_to: Option<Uuid>,
}

/// Destination of a drag-and-drop move
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveTask {
    /// Destination list
    pub new_list_id: Uuid,

    /// Destination index (0-based; clamped to the end of the list)
    pub new_position: i32,
}

const TASK_COLUMNS: &str = "t.id, t.title, t.description, t.list_id, t.position, t.priority, \
     t.due_date, t.completed, t.assigned_to, u.name AS assigned_to_name, \
     t.created_at, t.updated_at";

impl Task {
    /// Lists a list's tasks ordered by position
    pub async fn list_for_list(
        db: impl sqlx::PgExecutor<'_>,
        list_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks t
            LEFT JOIN users u ON t.assigned_to = u.id
            WHERE t.list_id = $1
            ORDER BY t.position ASC
            "#
        ))
        .bind(list_id)
        .fetch_all(db)
        .await
    }

    /// Lists every task of a board in one query, ordered by list then
    /// position. Backs the aggregate endpoint that replaces the client's
    /// per-list fetch loop.
    pub async fn list_for_board(
        db: impl sqlx::PgExecutor<'_>,
        board_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks t
            JOIN lists l ON t.list_id = l.id
            LEFT JOIN users u ON t.assigned_to = u.id
            WHERE l.board_id = $1
            ORDER BY l.position ASC, t.position ASC
            "#
        ))
        .bind(board_id)
        .fetch_all(db)
        .await
    }

    /// Finds a task by ID
    pub async fn find_by_id(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks t
            LEFT JOIN users u ON t.assigned_to = u.id
            WHERE t.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Task IDs of a list in position order, used by the move routine
    pub async fn ids_for_list(
        db: impl sqlx::PgExecutor<'_>,
        list_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM tasks WHERE list_id = $1 ORDER BY position ASC",
        )
        .bind(list_id)
        .fetch_all(db)
        .await
    }

    /// Next free position within a list (current count)
    pub async fn next_position(
        db: impl sqlx::PgExecutor<'_>,
        list_id: Uuid,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE list_id = $1",
        )
        .bind(list_id)
        .fetch_one(db)
        .await
    }

    /// Inserts a task at an explicit position
    pub async fn create_at(
        db: impl sqlx::PgExecutor<'_>,
        data: &CreateTask,
        position: i32,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            WITH inserted AS (
                INSERT INTO tasks (title, description, list_id, position, priority,
                                   due_date, assigned_to)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT i.id, i.title, i.description, i.list_id, i.position, i.priority,
                   i.due_date, i.completed, i.assigned_to, u.name AS assigned_to_name,
                   i.created_at, i.updated_at
            FROM inserted i
            LEFT JOIN users u ON i.assigned_to = u.id
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.list_id)
        .bind(position)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.assigned_to)
        .fetch_one(db)
        .await
    }

    /// Full update, stamping `updated_at`
    pub async fn update(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            WITH updated AS (
                UPDATE tasks
                SET title = $1,
                    description = $2,
                    list_id = COALESCE($3, list_id),
                    position = COALESCE($4, position),
                    priority = COALESCE($5, priority),
                    due_date = $6,
                    completed = COALESCE($7, completed),
                    assigned_to = $8,
                    updated_at = NOW()
                WHERE id = $9
                RETURNING *
            )
            SELECT up.id, up.title, up.description, up.list_id, up.position,
                   up.priority, up.due_date, up.completed, up.assigned_to,
                   u.name AS assigned_to_name, up.created_at, up.updated_at
            FROM updated up
            LEFT JOIN users u ON up.assigned_to = u.id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.list_id)
        .bind(data.position)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.completed)
        .bind(data.assigned_to)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Rewrites a sibling's position during a move; `updated_at` is left
    /// alone for rows that merely shift
    pub async fn set_position(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
        position: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tasks SET position = $2 WHERE id = $1")
            .bind(id)
            .bind(position)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Rewrites the moved task's list and position, stamping `updated_at`
    pub async fn place(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
        list_id: Uuid,
        position: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE tasks SET list_id = $2, position = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(list_id)
        .bind(position)
        .execute(db)
        .await?;

        Ok(())
    }

    /// Flips the completion flag, stamping `updated_at`
    pub async fn toggle(
        db: impl sqlx::PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            WITH updated AS (
                UPDATE tasks
                SET completed = NOT completed, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT up.id, up.title, up.description, up.list_id, up.position,
                   up.priority, up.due_date, up.completed, up.assigned_to,
                   u.name AS assigned_to_name, up.created_at, up.updated_at
            FROM updated up
            LEFT JOIN users u ON up.assigned_to = u.id
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Deletes a task
    pub async fn delete(db: impl sqlx::PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
