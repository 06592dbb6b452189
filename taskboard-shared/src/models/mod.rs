/// Typed records for the Taskboard data model
///
/// Each module owns one entity: the record struct returned to clients, the
/// input structs accepted from clients, and the PostgreSQL queries for that
/// entity. Query functions take `impl sqlx::PgExecutor` so they run equally
/// against the pool or inside a transaction.
///
/// # Models
///
/// - `user`: User accounts
/// - `board`: Top-level containers owned by a user
/// - `membership`: Board membership rows with roles (owner/admin/member)
/// - `list`: Ordered columns within a board
/// - `task`: Cards within a list, ordered by dense 0-based position

pub mod board;
pub mod list;
pub mod membership;
pub mod task;
pub mod user;

pub use board::{Board, BoardWithMembers, CreateBoard, UpdateBoard};
pub use list::{CreateList, List, UpdateList, DEFAULT_LIST_TITLES};
pub use membership::{AddMember, BoardMember, MemberRole};
pub use task::{CreateTask, MoveTask, Priority, Task, UpdateTask};
pub use user::{CreateUser, UpdateUser, User};
