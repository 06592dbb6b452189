/// PostgreSQL storage backend
///
/// Thin implementation of `BoardStore` over the model queries. Operations
/// that touch multiple rows — board creation with its default lists and
/// owner membership, and the move routine's renumbering — run inside a
/// single transaction so partial writes never become visible.
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    AddMember, Board, BoardMember, BoardWithMembers, CreateBoard, CreateList, CreateTask,
    CreateUser, List, MoveTask, Task, UpdateBoard, UpdateList, UpdateTask, UpdateUser, User,
    DEFAULT_LIST_TITLES,
};
use crate::store::position::{clamp_index, reorder};
use crate::store::{BoardStore, StoreError};

/// PostgreSQL implementation of `BoardStore`
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BoardStore for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(User::list(&self.pool).await?)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        User::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound("User"))
    }

    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        if User::find_by_email(&self.pool, &data.email).await?.is_some() {
            return Err(StoreError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }
        Ok(User::create(&self.pool, data).await?)
    }

    async fn update_user(&self, id: Uuid, data: UpdateUser) -> Result<User, StoreError> {
        User::update(&self.pool, id, data)
            .await?
            .ok_or(StoreError::NotFound("User"))
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        if !User::delete(&self.pool, id).await? {
            return Err(StoreError::NotFound("User"));
        }
        Ok(())
    }

    async fn boards_for_user(&self, user_id: Uuid) -> Result<Vec<Board>, StoreError> {
        Ok(Board::list_for_user(&self.pool, user_id).await?)
    }

    async fn get_board(&self, id: Uuid) -> Result<BoardWithMembers, StoreError> {
        let board = Board::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound("Board"))?;
        let members = BoardMember::list_for_board(&self.pool, id).await?;
        Ok(BoardWithMembers { board, members })
    }

    async fn create_board(&self, data: CreateBoard) -> Result<Board, StoreError> {
        let user_id = data.user_id;
        let mut tx = self.pool.begin().await?;

        let board = Board::create(&mut *tx, data).await?;
        for (index, title) in DEFAULT_LIST_TITLES.iter().enumerate() {
            List::create_at(&mut *tx, title, board.id, index as i32).await?;
        }
        BoardMember::create(&mut *tx, board.id, user_id, crate::models::MemberRole::Owner)
            .await?;

        tx.commit().await?;
        debug!(board_id = %board.id, "created board with default lists");
        Ok(board)
    }

    async fn update_board(&self, id: Uuid, data: UpdateBoard) -> Result<Board, StoreError> {
        Board::update(&self.pool, id, data)
            .await?
            .ok_or(StoreError::NotFound("Board"))
    }

    async fn delete_board(&self, id: Uuid) -> Result<(), StoreError> {
        if !Board::delete(&self.pool, id).await? {
            return Err(StoreError::NotFound("Board"));
        }
        Ok(())
    }

    async fn board_members(&self, board_id: Uuid) -> Result<Vec<BoardMember>, StoreError> {
        if !Board::exists(&self.pool, board_id).await? {
            return Err(StoreError::NotFound("Board"));
        }
        Ok(BoardMember::list_for_board(&self.pool, board_id).await?)
    }

    async fn add_member(
        &self,
        board_id: Uuid,
        data: AddMember,
    ) -> Result<BoardMember, StoreError> {
        if !Board::exists(&self.pool, board_id).await? {
            return Err(StoreError::NotFound("Board"));
        }
        if BoardMember::find(&self.pool, board_id, data.user_id)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict(
                "User is already a member of this board".to_string(),
            ));
        }
        Ok(BoardMember::create(&self.pool, board_id, data.user_id, data.role).await?)
    }

    async fn remove_member(&self, board_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        if !Board::exists(&self.pool, board_id).await? {
            return Err(StoreError::NotFound("Board"));
        }
        if !BoardMember::delete(&self.pool, board_id, user_id).await? {
            return Err(StoreError::NotFound("Board member"));
        }
        Ok(())
    }

    async fn lists_for_board(&self, board_id: Uuid) -> Result<Vec<List>, StoreError> {
        Ok(List::list_for_board(&self.pool, board_id).await?)
    }

    async fn get_list(&self, id: Uuid) -> Result<List, StoreError> {
        List::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound("List"))
    }

    async fn create_list(&self, data: CreateList) -> Result<List, StoreError> {
        let mut tx = self.pool.begin().await?;
        let position = match data.position {
            Some(position) => position,
            None => List::next_position(&mut *tx, data.board_id).await?,
        };
        let list = List::create_at(&mut *tx, &data.title, data.board_id, position).await?;
        tx.commit().await?;
        Ok(list)
    }

    async fn update_list(&self, id: Uuid, data: UpdateList) -> Result<List, StoreError> {
        List::update(&self.pool, id, data)
            .await?
            .ok_or(StoreError::NotFound("List"))
    }

    async fn delete_list(&self, id: Uuid) -> Result<(), StoreError> {
        if !List::delete(&self.pool, id).await? {
            return Err(StoreError::NotFound("List"));
        }
        Ok(())
    }

    async fn tasks_for_list(&self, list_id: Uuid) -> Result<Vec<Task>, StoreError> {
        Ok(Task::list_for_list(&self.pool, list_id).await?)
    }

    async fn tasks_for_board(&self, board_id: Uuid) -> Result<Vec<Task>, StoreError> {
        Ok(Task::list_for_board(&self.pool, board_id).await?)
    }

    async fn get_task(&self, id: Uuid) -> Result<Task, StoreError> {
        Task::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound("Task"))
    }

    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        let mut tx = self.pool.begin().await?;
        let position = match data.position {
            Some(position) => position,
            None => Task::next_position(&mut *tx, data.list_id).await?,
        };
        let task = Task::create_at(&mut *tx, &data, position).await?;
        tx.commit().await?;
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> Result<Task, StoreError> {
        Task::update(&self.pool, id, data)
            .await?
            .ok_or(StoreError::NotFound("Task"))
    }

    async fn move_task(&self, id: Uuid, dest: MoveTask) -> Result<Task, StoreError> {
        let mut tx = self.pool.begin().await?;

        let task = Task::find_by_id(&mut *tx, id)
            .await?
            .ok_or(StoreError::NotFound("Task"))?;

        // No-op guard: dropping a card back where it came from
        if task.list_id == dest.new_list_id && task.position == dest.new_position {
            tx.rollback().await?;
            return Ok(task);
        }

        if task.list_id == dest.new_list_id {
            let mut ids = Task::ids_for_list(&mut *tx, task.list_id).await?;
            if let Some(from) = ids.iter().position(|t| *t == id) {
                let to = clamp_index(dest.new_position, ids.len().saturating_sub(1));
                reorder(&mut ids, from, to);
            }
            for (index, task_id) in ids.iter().enumerate() {
                if *task_id == id {
                    Task::place(&mut *tx, id, task.list_id, index as i32).await?;
                } else {
                    Task::set_position(&mut *tx, *task_id, index as i32).await?;
                }
            }
        } else {
            let mut source_ids = Task::ids_for_list(&mut *tx, task.list_id).await?;
            source_ids.retain(|t| *t != id);
            for (index, task_id) in source_ids.iter().enumerate() {
                Task::set_position(&mut *tx, *task_id, index as i32).await?;
            }

            let mut dest_ids = Task::ids_for_list(&mut *tx, dest.new_list_id).await?;
            let to = clamp_index(dest.new_position, dest_ids.len());
            dest_ids.insert(to, id);
            for (index, task_id) in dest_ids.iter().enumerate() {
                if *task_id == id {
                    Task::place(&mut *tx, id, dest.new_list_id, index as i32).await?;
                } else {
                    Task::set_position(&mut *tx, *task_id, index as i32).await?;
                }
            }
        }

        tx.commit().await?;
        debug!(task_id = %id, list_id = %dest.new_list_id, "moved task");

        Task::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound("Task"))
    }

    async fn toggle_task(&self, id: Uuid) -> Result<Task, StoreError> {
        Task::toggle(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound("Task"))
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError> {
        if !Task::delete(&self.pool, id).await? {
            return Err(StoreError::NotFound("Task"));
        }
        Ok(())
    }
}
