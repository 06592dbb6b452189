/// Board membership model and database operations
///
/// Membership rows grant a user a role on a board. The board creator gets
/// the `owner` role at creation time; further members are added as `member`
/// or `admin`. At most one row exists per (board, user) pair.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE member_role AS ENUM ('owner', 'admin', 'member');
///
/// CREATE TABLE board_members (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     -- no FK: the membership row outlives the user; joins yield no profile
///     user_id UUID NOT NULL,
///     role member_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (board_id, user_id)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user holds on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Board creator; exactly one per board, assigned at creation
    Owner,

    /// Can manage members
    Admin,

    /// Regular collaborator
    Member,
}

impl MemberRole {
    /// Converts the role to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        MemberRole::Member
    }
}

/// Membership record, with the member's profile joined in when available
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardMember {
    /// Unique membership ID
    pub id: Uuid,

    /// Board this membership belongs to
    pub board_id: Uuid,

    /// Member user ID
    pub user_id: Uuid,

    /// Role on the board
    pub role: MemberRole,

    /// When the membership was created
    pub created_at: DateTime<Utc>,

    /// Member display name (joined from users)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Member email (joined from users)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Input for adding a member to a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMember {
    /// User to add
    pub user_id: Uuid,

    /// Role to grant (defaults to `member`)
    #[serde(default)]
    pub role: MemberRole,
}

impl BoardMember {
    /// Lists members of a board with user profiles, oldest first
    pub async fn list_for_board(
        db: impl sqlx::PgExecutor<'_>,
        board_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BoardMember>(
            r#"
            SELECT bm.id, bm.board_id, bm.user_id, bm.role, bm.created_at,
                   u.name, u.email
            FROM board_members bm
            LEFT JOIN users u ON bm.user_id = u.id
            WHERE bm.board_id = $1
            ORDER BY bm.created_at ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(db)
        .await
    }

    /// Finds a specific membership row
    pub async fn find(
        db: impl sqlx::PgExecutor<'_>,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BoardMember>(
            r#"
            SELECT bm.id, bm.board_id, bm.user_id, bm.role, bm.created_at,
                   u.name, u.email
            FROM board_members bm
            LEFT JOIN users u ON bm.user_id = u.id
            WHERE bm.board_id = $1 AND bm.user_id = $2
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Creates a membership row
    ///
    /// The caller is responsible for the duplicate check; the unique
    /// constraint backstops it.
    pub async fn create(
        db: impl sqlx::PgExecutor<'_>,
        board_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, BoardMember>(
            r#"
            WITH inserted AS (
                INSERT INTO board_members (board_id, user_id, role)
                VALUES ($1, $2, $3)
                RETURNING id, board_id, user_id, role, created_at
            )
            SELECT i.id, i.board_id, i.user_id, i.role, i.created_at,
                   u.name, u.email
            FROM inserted i
            LEFT JOIN users u ON i.user_id = u.id
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(db)
        .await
    }

    /// Removes a user from a board
    ///
    /// Returns true if a membership row was removed.
    pub async fn delete(
        db: impl sqlx::PgExecutor<'_>,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM board_members WHERE board_id = $1 AND user_id = $2",
        )
        .bind(board_id)
        .bind(user_id)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
