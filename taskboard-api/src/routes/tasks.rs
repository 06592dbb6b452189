/// Task route handlers
///
/// # Endpoints
///
/// ```text
/// GET    /api/tasks?list_id=<uuid>   Tasks of a list, by position
/// POST   /api/tasks                  Create a task (appended when no position)
/// GET    /api/tasks/:id              Get a task
/// PUT    /api/tasks/:id              Full update
/// DELETE /api/tasks/:id              Delete a task
/// PATCH  /api/tasks/:id/move         Drag-and-drop move with renumbering
/// PATCH  /api/tasks/:id/toggle       Flip the completion flag
/// ```
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Json, Path, Query},
    routes::{present, MessageResponse},
};
use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use taskboard_shared::models::{CreateTask, MoveTask, Priority, Task, UpdateTask};

/// Query parameters for listing tasks
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub list_id: Option<Uuid>,
}

/// Request body for creating a task
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskPayload {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub list_id: Option<Uuid>,

    pub position: Option<i32>,

    #[serde(default)]
    pub priority: Priority,

    pub due_date: Option<DateTime<Utc>>,

    pub assigned_to: Option<Uuid>,
}

/// Request body for updating a task
///
/// `title` is required; the nullable fields (`description`, `due_date`,
/// `assigned_to`) are overwritten with whatever is sent, absent meaning
/// cleared.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskPayload {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub list_id: Option<Uuid>,

    pub position: Option<i32>,

    pub priority: Option<Priority>,

    pub due_date: Option<DateTime<Utc>>,

    pub completed: Option<bool>,

    pub assigned_to: Option<Uuid>,
}

/// Request body for moving a task
#[derive(Debug, Deserialize)]
pub struct MoveTaskPayload {
    pub new_list_id: Option<Uuid>,

    pub new_position: Option<i32>,
}

/// GET /api/tasks?list_id=<uuid>
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let list_id = query
        .list_id
        .ok_or_else(|| ApiError::BadRequest("list_id is required".to_string()))?;

    let tasks = state.store.tasks_for_list(list_id).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.store.get_task(id).await?;
    Ok(Json(task))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskPayload>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    if !present(&payload.title) || payload.list_id.is_none() {
        return Err(ApiError::BadRequest(
            "title and list_id are required".to_string(),
        ));
    }
    payload.validate()?;

    let task = state
        .store
        .create_task(CreateTask {
            title: payload.title.unwrap(),
            description: payload.description,
            list_id: payload.list_id.unwrap(),
            position: payload.position,
            priority: payload.priority,
            due_date: payload.due_date,
            assigned_to: payload.assigned_to,
        })
        .await?;

    tracing::info!(task_id = %task.id, list_id = %task.list_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskPayload>,
) -> ApiResult<Json<Task>> {
    if !present(&payload.title) {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }
    payload.validate()?;

    let task = state
        .store
        .update_task(
            id,
            UpdateTask {
                title: payload.title.unwrap(),
                description: payload.description,
                list_id: payload.list_id,
                position: payload.position,
                priority: payload.priority,
                due_date: payload.due_date,
                completed: payload.completed,
                assigned_to: payload.assigned_to,
            },
        )
        .await?;
    Ok(Json(task))
}

/// PATCH /api/tasks/:id/move
///
/// Moves a task to `(new_list_id, new_position)` and renumbers every
/// displaced sibling in both affected lists in one atomic step. An
/// out-of-range position is clamped; moving onto the current slot is a
/// no-op.
pub async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoveTaskPayload>,
) -> ApiResult<Json<Task>> {
    let (new_list_id, new_position) = match (payload.new_list_id, payload.new_position) {
        (Some(list_id), Some(position)) => (list_id, position),
        _ => {
            return Err(ApiError::BadRequest(
                "new_list_id and new_position are required".to_string(),
            ))
        }
    };

    let task = state
        .store
        .move_task(
            id,
            MoveTask {
                new_list_id,
                new_position,
            },
        )
        .await?;

    tracing::debug!(
        task_id = %id,
        list_id = %new_list_id,
        position = new_position,
        "Task moved"
    );
    Ok(Json(task))
}

/// PATCH /api/tasks/:id/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.store.toggle_task(id).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete_task(id).await?;

    tracing::info!(task_id = %id, "Task deleted");
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
