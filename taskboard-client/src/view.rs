/// Client-side board snapshot with local drag-and-drop
///
/// `BoardView` holds one board, its lists, and every task, loaded in three
/// requests (the tasks arrive through the aggregate endpoint rather than
/// one request per list). Drag-and-drop is applied locally first with the
/// same clamping and renumbering rules the server uses, so the optimistic
/// state matches what the server will persist; the PATCH then confirms it,
/// and a failed PATCH triggers a reload.
use uuid::Uuid;

use taskboard_shared::models::{BoardWithMembers, List, MoveTask, Task};
use taskboard_shared::store::position::{clamp_index, reorder};

use crate::api::{ApiClient, ClientError};

/// Snapshot of one board as the UI renders it
#[derive(Debug, Clone)]
pub struct BoardView {
    /// The board and its members
    pub board: BoardWithMembers,

    /// Lists of the board, by position
    pub lists: Vec<List>,

    /// Every task of the board
    pub tasks: Vec<Task>,
}

impl BoardView {
    /// Loads a board, its lists, and all of its tasks
    pub async fn load(client: &ApiClient, board_id: Uuid) -> Result<Self, ClientError> {
        let board = client.board(board_id).await?;
        let lists = client.lists(board_id).await?;
        let tasks = client.board_tasks(board_id).await?;

        Ok(Self {
            board,
            lists,
            tasks,
        })
    }

    /// Reloads everything from the server, discarding local state
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        *self = Self::load(client, self.board.board.id).await?;
        Ok(())
    }

    /// Tasks of one list, ordered by position
    pub fn tasks_in(&self, list_id: Uuid) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.list_id == list_id).collect();
        tasks.sort_by_key(|t| t.position);
        tasks
    }

    /// Task IDs of one list, ordered by position
    fn ordered_ids(&self, list_id: Uuid) -> Vec<Uuid> {
        self.tasks_in(list_id).iter().map(|t| t.id).collect()
    }

    /// Rewrites positions so the list matches the given ID order
    fn renumber(&mut self, ids: &[Uuid]) {
        for (index, id) in ids.iter().enumerate() {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
                task.position = index as i32;
            }
        }
    }

    /// Applies a move locally, mirroring the server's rules: out-of-range
    /// positions clamp, displaced siblings renumber, both lists stay dense.
    ///
    /// Returns false when the task is not part of this board.
    pub fn apply_move(&mut self, task_id: Uuid, new_list_id: Uuid, new_position: i32) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else {
            return false;
        };
        let source_list = task.list_id;

        if source_list == new_list_id {
            let mut ids = self.ordered_ids(source_list);
            let from = match ids.iter().position(|id| *id == task_id) {
                Some(index) => index,
                None => return false,
            };
            let to = clamp_index(new_position, ids.len().saturating_sub(1));
            if to == from {
                return true;
            }
            reorder(&mut ids, from, to);
            self.renumber(&ids);
        } else {
            let mut source_ids = self.ordered_ids(source_list);
            source_ids.retain(|id| *id != task_id);

            let mut dest_ids = self.ordered_ids(new_list_id);
            let to = clamp_index(new_position, dest_ids.len());
            dest_ids.insert(to, task_id);

            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                task.list_id = new_list_id;
            }
            self.renumber(&source_ids);
            self.renumber(&dest_ids);
        }

        true
    }

    /// Moves a task: optimistic local application, then the PATCH. A server
    /// rejection reloads the board so the view cannot drift.
    pub async fn move_task(
        &mut self,
        client: &ApiClient,
        task_id: Uuid,
        new_list_id: Uuid,
        new_position: i32,
    ) -> Result<(), ClientError> {
        self.apply_move(task_id, new_list_id, new_position);

        let dest = MoveTask {
            new_list_id,
            new_position,
        };
        match client.move_task(task_id, &dest).await {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(%task_id, "Move rejected by server, reloading board");
                self.refresh(client).await?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taskboard_shared::models::{Board, Priority};

    fn make_task(list_id: Uuid, position: i32, title: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            list_id,
            position,
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            assigned_to: None,
            assigned_to_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_view(tasks: Vec<Task>) -> BoardView {
        let board = Board {
            id: Uuid::new_v4(),
            title: "Sprint 1".to_string(),
            description: None,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        BoardView {
            board: BoardWithMembers {
                board,
                members: vec![],
            },
            lists: vec![],
            tasks,
        }
    }

    fn titles(view: &BoardView, list_id: Uuid) -> Vec<String> {
        view.tasks_in(list_id)
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn test_apply_move_within_list() {
        let list = Uuid::new_v4();
        let tasks = vec![
            make_task(list, 0, "a"),
            make_task(list, 1, "b"),
            make_task(list, 2, "c"),
        ];
        let last = tasks[2].id;
        let mut view = make_view(tasks);

        assert!(view.apply_move(last, list, 0));
        assert_eq!(titles(&view, list), ["c", "a", "b"]);
        let positions: Vec<i32> = view.tasks_in(list).iter().map(|t| t.position).collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn test_apply_move_across_lists() {
        let todo = Uuid::new_v4();
        let doing = Uuid::new_v4();
        let tasks = vec![
            make_task(todo, 0, "a"),
            make_task(todo, 1, "b"),
            make_task(doing, 0, "x"),
        ];
        let moved = tasks[0].id;
        let mut view = make_view(tasks);

        assert!(view.apply_move(moved, doing, 0));
        assert_eq!(titles(&view, todo), ["b"]);
        assert_eq!(titles(&view, doing), ["a", "x"]);
        assert_eq!(view.tasks_in(todo)[0].position, 0);
        let positions: Vec<i32> = view.tasks_in(doing).iter().map(|t| t.position).collect();
        assert_eq!(positions, [0, 1]);
    }

    #[test]
    fn test_apply_move_clamps() {
        let todo = Uuid::new_v4();
        let doing = Uuid::new_v4();
        let tasks = vec![make_task(todo, 0, "a"), make_task(doing, 0, "x")];
        let moved = tasks[0].id;
        let mut view = make_view(tasks);

        assert!(view.apply_move(moved, doing, 99));
        assert_eq!(titles(&view, doing), ["x", "a"]);
    }

    #[test]
    fn test_apply_move_noop() {
        let list = Uuid::new_v4();
        let tasks = vec![make_task(list, 0, "a"), make_task(list, 1, "b")];
        let first = tasks[0].id;
        let mut view = make_view(tasks);

        assert!(view.apply_move(first, list, 0));
        assert_eq!(titles(&view, list), ["a", "b"]);
    }

    #[test]
    fn test_apply_move_unknown_task() {
        let list = Uuid::new_v4();
        let mut view = make_view(vec![make_task(list, 0, "a")]);

        assert!(!view.apply_move(Uuid::new_v4(), list, 0));
    }
}
