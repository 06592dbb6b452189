/// Storage backends for the Taskboard data model
///
/// The `BoardStore` trait is the seam between the HTTP handlers and durable
/// state. Two backends implement it:
///
/// - `memory::MemoryStore`: process-local storage behind a `tokio::sync::RwLock`,
///   optionally seeded with demo data
/// - `postgres::PgStore`: sqlx-backed PostgreSQL storage
///
/// Both maintain the ordering invariant: within a list, task positions are
/// exactly `{0, 1, ..., n-1}`; same for list positions within a board. The
/// multi-row renumbering performed by `move_task` is atomic in both backends
/// (one write-lock critical section in memory, one transaction in PostgreSQL).
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AddMember, Board, BoardMember, BoardWithMembers, CreateBoard, CreateList, CreateTask,
    CreateUser, List, MoveTask, Task, UpdateBoard, UpdateList, UpdateTask, UpdateUser, User,
};

pub mod memory;
pub mod position;
pub mod postgres;

/// Errors surfaced by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// An entity referenced by ID does not exist. Carries the entity name
    /// as it should appear in the client-facing message ("Board not found").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness rule was violated (duplicate email, duplicate membership)
    #[error("{0}")]
    Conflict(String),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository interface over users, boards, lists, tasks, and membership
///
/// Handlers hold an `Arc<dyn BoardStore>`, so the same routing and handler
/// logic runs against either backend.
#[async_trait]
pub trait BoardStore: Send + Sync {
    // Users

    /// All users, ordered by name
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Single user by ID
    async fn get_user(&self, id: Uuid) -> Result<User, StoreError>;

    /// Creates a user; duplicate email is a conflict
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Updates a user's email and name
    async fn update_user(&self, id: Uuid, data: UpdateUser) -> Result<User, StoreError>;

    /// Deletes a user
    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError>;

    // Boards

    /// Boards the user owns OR is a member of, newest first
    async fn boards_for_user(&self, user_id: Uuid) -> Result<Vec<Board>, StoreError>;

    /// Single board with its membership collection
    async fn get_board(&self, id: Uuid) -> Result<BoardWithMembers, StoreError>;

    /// Creates a board, its default three-list skeleton, and an `owner`
    /// membership for the creator
    async fn create_board(&self, data: CreateBoard) -> Result<Board, StoreError>;

    /// Updates a board's title and description
    async fn update_board(&self, id: Uuid, data: UpdateBoard) -> Result<Board, StoreError>;

    /// Deletes a board
    async fn delete_board(&self, id: Uuid) -> Result<(), StoreError>;

    // Board members

    /// Members of a board, oldest first; the board must exist
    async fn board_members(&self, board_id: Uuid) -> Result<Vec<BoardMember>, StoreError>;

    /// Adds a member; duplicate membership is a conflict
    async fn add_member(&self, board_id: Uuid, data: AddMember)
        -> Result<BoardMember, StoreError>;

    /// Removes a member; a non-member user is a not-found
    async fn remove_member(&self, board_id: Uuid, user_id: Uuid) -> Result<(), StoreError>;

    // Lists

    /// Lists of a board, ordered by position
    async fn lists_for_board(&self, board_id: Uuid) -> Result<Vec<List>, StoreError>;

    /// Single list by ID
    async fn get_list(&self, id: Uuid) -> Result<List, StoreError>;

    /// Creates a list, appending when no explicit position is given
    async fn create_list(&self, data: CreateList) -> Result<List, StoreError>;

    /// Updates a list's title and optionally position
    async fn update_list(&self, id: Uuid, data: UpdateList) -> Result<List, StoreError>;

    /// Deletes a list; its tasks are left in place
    async fn delete_list(&self, id: Uuid) -> Result<(), StoreError>;

    // Tasks

    /// Tasks of a list, ordered by position
    async fn tasks_for_list(&self, list_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Every task of a board in one call (aggregate for the client)
    async fn tasks_for_board(&self, board_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Single task by ID
    async fn get_task(&self, id: Uuid) -> Result<Task, StoreError>;

    /// Creates a task, appending when no explicit position is given
    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError>;

    /// Full update of a task's fields
    async fn update_task(&self, id: Uuid, data: UpdateTask) -> Result<Task, StoreError>;

    /// Moves a task within or across lists, renumbering every displaced
    /// sibling so both affected lists stay dense. Moving a task onto its
    /// current (list, index) is a no-op.
    async fn move_task(&self, id: Uuid, dest: MoveTask) -> Result<Task, StoreError>;

    /// Flips a task's completion flag
    async fn toggle_task(&self, id: Uuid) -> Result<Task, StoreError>;

    /// Deletes a task
    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError>;
}
