/// In-memory storage backend
///
/// Process-local storage with no persistence across restart. All state sits
/// behind a single `tokio::sync::RwLock`, which makes every operation —
/// including the multi-row renumbering of `move_task` — atomic with respect
/// to other requests.
///
/// `MemoryStore::with_demo_data` seeds the demo user and a sample board so
/// the server is usable immediately without a database.
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use async_trait::async_trait;

use crate::models::{
    AddMember, Board, BoardMember, BoardWithMembers, CreateBoard, CreateList, CreateTask,
    CreateUser, List, MemberRole, MoveTask, Priority, Task, UpdateBoard, UpdateList, UpdateTask,
    UpdateUser, User, DEFAULT_LIST_TITLES,
};
use crate::store::position::{clamp_index, reorder};
use crate::store::{BoardStore, StoreError};
use crate::DEMO_USER_ID;

/// In-memory implementation of `BoardStore`
pub struct MemoryStore {
    inner: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    boards: Vec<Board>,
    members: Vec<BoardMember>,
    lists: Vec<List>,
    tasks: Vec<Task>,
}

impl State {
    /// Fills in the joined user profile on a membership row
    fn join_member(&self, member: &BoardMember) -> BoardMember {
        let user = self.users.iter().find(|u| u.id == member.user_id);
        BoardMember {
            name: user.map(|u| u.name.clone()),
            email: user.map(|u| u.email.clone()),
            ..member.clone()
        }
    }

    /// Fills in the joined assignee name on a task
    fn join_task(&self, task: &Task) -> Task {
        let assigned_to_name = task.assigned_to.and_then(|id| {
            self.users
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.name.clone())
        });
        Task {
            assigned_to_name,
            ..task.clone()
        }
    }

    /// Task IDs of a list in position order
    fn task_ids(&self, list_id: Uuid) -> Vec<Uuid> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.list_id == list_id).collect();
        tasks.sort_by_key(|t| t.position);
        tasks.iter().map(|t| t.id).collect()
    }

    /// Writes `position = index` for each ID in order
    fn renumber(&mut self, ids: &[Uuid]) {
        for (index, id) in ids.iter().enumerate() {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
                task.position = index as i32;
            }
        }
    }
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State::default()),
        }
    }

    /// Creates a store seeded with the demo user and a sample board
    ///
    /// Seeds one user, one board with the default lists, and a single
    /// sample task, so the server is immediately usable without a database.
    pub fn with_demo_data() -> Self {
        let now = Utc::now();

        let demo_user = User {
            id: DEMO_USER_ID,
            email: "demo@example.com".to_string(),
            name: "Demo User".to_string(),
            created_at: now,
        };

        let board = Board {
            id: Uuid::new_v4(),
            title: "Sample Board".to_string(),
            description: Some("This is a sample board to get you started".to_string()),
            user_id: DEMO_USER_ID,
            created_at: now,
            updated_at: now,
        };

        let owner = BoardMember {
            id: Uuid::new_v4(),
            board_id: board.id,
            user_id: DEMO_USER_ID,
            role: MemberRole::Owner,
            created_at: now,
            name: None,
            email: None,
        };

        let lists: Vec<List> = DEFAULT_LIST_TITLES
            .iter()
            .enumerate()
            .map(|(index, title)| List {
                id: Uuid::new_v4(),
                title: (*title).to_string(),
                board_id: board.id,
                position: index as i32,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let sample_task = Task {
            id: Uuid::new_v4(),
            title: "Sample Task".to_string(),
            description: Some("This is a sample task to get you started".to_string()),
            list_id: lists[0].id,
            position: 0,
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            assigned_to: None,
            assigned_to_name: None,
            created_at: now,
            updated_at: now,
        };

        Self {
            inner: RwLock::new(State {
                users: vec![demo_user],
                boards: vec![board],
                members: vec![owner],
                lists,
                tasks: vec![sample_task],
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let state = self.inner.read().await;
        let mut users = state.users.clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        let state = self.inner.read().await;
        state
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("User"))
    }

    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut state = self.inner.write().await;
        if state.users.iter().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            name: data.name,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, data: UpdateUser) -> Result<User, StoreError> {
        let mut state = self.inner.write().await;
        if state.users.iter().any(|u| u.email == data.email && u.id != id) {
            return Err(StoreError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound("User"))?;
        user.email = data.email;
        user.name = data.name;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Err(StoreError::NotFound("User"));
        }
        Ok(())
    }

    async fn boards_for_user(&self, user_id: Uuid) -> Result<Vec<Board>, StoreError> {
        let state = self.inner.read().await;
        let mut boards: Vec<Board> = state
            .boards
            .iter()
            .filter(|b| {
                b.user_id == user_id
                    || state
                        .members
                        .iter()
                        .any(|m| m.board_id == b.id && m.user_id == user_id)
            })
            .cloned()
            .collect();
        boards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(boards)
    }

    async fn get_board(&self, id: Uuid) -> Result<BoardWithMembers, StoreError> {
        let state = self.inner.read().await;
        let board = state
            .boards
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Board"))?;
        let mut members: Vec<BoardMember> = state
            .members
            .iter()
            .filter(|m| m.board_id == id)
            .map(|m| state.join_member(m))
            .collect();
        members.sort_by_key(|m| m.created_at);
        Ok(BoardWithMembers { board, members })
    }

    async fn create_board(&self, data: CreateBoard) -> Result<Board, StoreError> {
        let mut state = self.inner.write().await;
        let now = Utc::now();

        let board = Board {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };

        for (index, title) in DEFAULT_LIST_TITLES.iter().enumerate() {
            state.lists.push(List {
                id: Uuid::new_v4(),
                title: (*title).to_string(),
                board_id: board.id,
                position: index as i32,
                created_at: now,
                updated_at: now,
            });
        }

        state.members.push(BoardMember {
            id: Uuid::new_v4(),
            board_id: board.id,
            user_id: data.user_id,
            role: MemberRole::Owner,
            created_at: now,
            name: None,
            email: None,
        });

        state.boards.push(board.clone());
        Ok(board)
    }

    async fn update_board(&self, id: Uuid, data: UpdateBoard) -> Result<Board, StoreError> {
        let mut state = self.inner.write().await;
        let board = state
            .boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound("Board"))?;
        board.title = data.title;
        board.description = data.description;
        board.updated_at = Utc::now();
        Ok(board.clone())
    }

    async fn delete_board(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let before = state.boards.len();
        state.boards.retain(|b| b.id != id);
        if state.boards.len() == before {
            return Err(StoreError::NotFound("Board"));
        }
        // Membership rows belong to the board; lists and tasks are left in
        // place (no application-level cascade).
        state.members.retain(|m| m.board_id != id);
        Ok(())
    }

    async fn board_members(&self, board_id: Uuid) -> Result<Vec<BoardMember>, StoreError> {
        let state = self.inner.read().await;
        if !state.boards.iter().any(|b| b.id == board_id) {
            return Err(StoreError::NotFound("Board"));
        }
        let mut members: Vec<BoardMember> = state
            .members
            .iter()
            .filter(|m| m.board_id == board_id)
            .map(|m| state.join_member(m))
            .collect();
        members.sort_by_key(|m| m.created_at);
        Ok(members)
    }

    async fn add_member(
        &self,
        board_id: Uuid,
        data: AddMember,
    ) -> Result<BoardMember, StoreError> {
        let mut state = self.inner.write().await;
        if !state.boards.iter().any(|b| b.id == board_id) {
            return Err(StoreError::NotFound("Board"));
        }
        if state
            .members
            .iter()
            .any(|m| m.board_id == board_id && m.user_id == data.user_id)
        {
            return Err(StoreError::Conflict(
                "User is already a member of this board".to_string(),
            ));
        }

        let member = BoardMember {
            id: Uuid::new_v4(),
            board_id,
            user_id: data.user_id,
            role: data.role,
            created_at: Utc::now(),
            name: None,
            email: None,
        };
        state.members.push(member.clone());
        Ok(state.join_member(&member))
    }

    async fn remove_member(&self, board_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        if !state.boards.iter().any(|b| b.id == board_id) {
            return Err(StoreError::NotFound("Board"));
        }
        let before = state.members.len();
        state
            .members
            .retain(|m| !(m.board_id == board_id && m.user_id == user_id));
        if state.members.len() == before {
            return Err(StoreError::NotFound("Board member"));
        }
        Ok(())
    }

    async fn lists_for_board(&self, board_id: Uuid) -> Result<Vec<List>, StoreError> {
        let state = self.inner.read().await;
        let mut lists: Vec<List> = state
            .lists
            .iter()
            .filter(|l| l.board_id == board_id)
            .cloned()
            .collect();
        lists.sort_by_key(|l| l.position);
        Ok(lists)
    }

    async fn get_list(&self, id: Uuid) -> Result<List, StoreError> {
        let state = self.inner.read().await;
        state
            .lists
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("List"))
    }

    async fn create_list(&self, data: CreateList) -> Result<List, StoreError> {
        let mut state = self.inner.write().await;
        let position = match data.position {
            Some(position) => position,
            None => state
                .lists
                .iter()
                .filter(|l| l.board_id == data.board_id)
                .count() as i32,
        };

        let now = Utc::now();
        let list = List {
            id: Uuid::new_v4(),
            title: data.title,
            board_id: data.board_id,
            position,
            created_at: now,
            updated_at: now,
        };
        state.lists.push(list.clone());
        Ok(list)
    }

    async fn update_list(&self, id: Uuid, data: UpdateList) -> Result<List, StoreError> {
        let mut state = self.inner.write().await;
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound("List"))?;
        list.title = data.title;
        if let Some(position) = data.position {
            list.position = position;
        }
        list.updated_at = Utc::now();
        Ok(list.clone())
    }

    async fn delete_list(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let before = state.lists.len();
        state.lists.retain(|l| l.id != id);
        if state.lists.len() == before {
            return Err(StoreError::NotFound("List"));
        }
        Ok(())
    }

    async fn tasks_for_list(&self, list_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let state = self.inner.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|t| t.list_id == list_id)
            .map(|t| state.join_task(t))
            .collect();
        tasks.sort_by_key(|t| t.position);
        Ok(tasks)
    }

    async fn tasks_for_board(&self, board_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let state = self.inner.read().await;
        let mut lists: Vec<&List> = state
            .lists
            .iter()
            .filter(|l| l.board_id == board_id)
            .collect();
        lists.sort_by_key(|l| l.position);

        let mut tasks = Vec::new();
        for list in lists {
            let mut list_tasks: Vec<Task> = state
                .tasks
                .iter()
                .filter(|t| t.list_id == list.id)
                .map(|t| state.join_task(t))
                .collect();
            list_tasks.sort_by_key(|t| t.position);
            tasks.extend(list_tasks);
        }
        Ok(tasks)
    }

    async fn get_task(&self, id: Uuid) -> Result<Task, StoreError> {
        let state = self.inner.read().await;
        state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| state.join_task(t))
            .ok_or(StoreError::NotFound("Task"))
    }

    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        let mut state = self.inner.write().await;
        let position = match data.position {
            Some(position) => position,
            None => state
                .tasks
                .iter()
                .filter(|t| t.list_id == data.list_id)
                .count() as i32,
        };

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            list_id: data.list_id,
            position,
            priority: data.priority,
            due_date: data.due_date,
            completed: false,
            assigned_to: data.assigned_to,
            assigned_to_name: None,
            created_at: now,
            updated_at: now,
        };
        state.tasks.push(task.clone());
        Ok(state.join_task(&task))
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> Result<Task, StoreError> {
        let mut state = self.inner.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound("Task"))?;

        task.title = data.title;
        task.description = data.description;
        if let Some(list_id) = data.list_id {
            task.list_id = list_id;
        }
        if let Some(position) = data.position {
            task.position = position;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        task.due_date = data.due_date;
        if let Some(completed) = data.completed {
            task.completed = completed;
        }
        task.assigned_to = data.assigned_to;
        task.updated_at = Utc::now();

        let task = task.clone();
        Ok(state.join_task(&task))
    }

    async fn move_task(&self, id: Uuid, dest: MoveTask) -> Result<Task, StoreError> {
        let mut state = self.inner.write().await;
        let (source_list, source_position) = state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| (t.list_id, t.position))
            .ok_or(StoreError::NotFound("Task"))?;

        // No-op guard: dropping a card back where it came from
        if source_list == dest.new_list_id && source_position == dest.new_position {
            let task = state
                .tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| state.join_task(t))
                .ok_or(StoreError::NotFound("Task"))?;
            return Ok(task);
        }

        if source_list == dest.new_list_id {
            let mut ids = state.task_ids(source_list);
            if let Some(from) = ids.iter().position(|t| *t == id) {
                let to = clamp_index(dest.new_position, ids.len().saturating_sub(1));
                reorder(&mut ids, from, to);
            }
            state.renumber(&ids);
        } else {
            let mut source_ids = state.task_ids(source_list);
            source_ids.retain(|t| *t != id);
            state.renumber(&source_ids);

            let mut dest_ids = state.task_ids(dest.new_list_id);
            let to = clamp_index(dest.new_position, dest_ids.len());
            dest_ids.insert(to, id);
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
                task.list_id = dest.new_list_id;
            }
            state.renumber(&dest_ids);
        }

        if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
            task.updated_at = Utc::now();
        }

        let task = state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| state.join_task(t))
            .ok_or(StoreError::NotFound("Task"))?;
        Ok(task)
    }

    async fn toggle_task(&self, id: Uuid) -> Result<Task, StoreError> {
        let mut state = self.inner.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound("Task"))?;
        task.completed = !task.completed;
        task.updated_at = Utc::now();

        let task = task.clone();
        Ok(state.join_task(&task))
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(StoreError::NotFound("Task"));
        }
        Ok(())
    }
}
