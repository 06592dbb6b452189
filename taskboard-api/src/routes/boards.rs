/// Board route handlers
///
/// # Endpoints
///
/// ```text
/// GET    /api/boards?user_id=<uuid>       Boards owned by or shared with a user
/// POST   /api/boards                      Create a board (plus default lists)
/// GET    /api/boards/:id                  Board with its members
/// PUT    /api/boards/:id                  Update title/description
/// DELETE /api/boards/:id                  Delete a board
/// GET    /api/boards/:id/tasks            Every task of the board, ordered
/// GET    /api/boards/:id/members          List members
/// POST   /api/boards/:id/members          Add a member (409 if already present)
/// DELETE /api/boards/:id/members/:user_id Remove a member
/// ```
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Json, Path, Query},
    routes::{present, MessageResponse},
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use taskboard_shared::models::{
    AddMember, Board, BoardMember, BoardWithMembers, CreateBoard, MemberRole, Task, UpdateBoard,
};

/// Query parameters for listing boards
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub user_id: Option<Uuid>,
}

/// Request body for creating a board
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardPayload {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub user_id: Option<Uuid>,
}

/// Request body for updating a board
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardPayload {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,
}

/// Request body for adding a board member
#[derive(Debug, Deserialize)]
pub struct AddMemberPayload {
    pub user_id: Option<Uuid>,

    #[serde(default)]
    pub role: MemberRole,
}

/// GET /api/boards?user_id=<uuid>
pub async fn list_boards(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Json<Vec<Board>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::BadRequest("user_id is required".to_string()))?;

    let boards = state.store.boards_for_user(user_id).await?;
    Ok(Json(boards))
}

/// GET /api/boards/:id
pub async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BoardWithMembers>> {
    let board = state.store.get_board(id).await?;
    Ok(Json(board))
}

/// POST /api/boards
///
/// Also creates the default "To Do" / "In Progress" / "Done" lists and an
/// `owner` membership for the creating user.
pub async fn create_board(
    State(state): State<AppState>,
    Json(payload): Json<CreateBoardPayload>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    if !present(&payload.title) || payload.user_id.is_none() {
        return Err(ApiError::BadRequest(
            "title and user_id are required".to_string(),
        ));
    }
    payload.validate()?;

    let board = state
        .store
        .create_board(CreateBoard {
            title: payload.title.unwrap(),
            description: payload.description,
            user_id: payload.user_id.unwrap(),
        })
        .await?;

    tracing::info!(board_id = %board.id, "Board created");
    Ok((StatusCode::CREATED, Json(board)))
}

/// PUT /api/boards/:id
pub async fn update_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBoardPayload>,
) -> ApiResult<Json<Board>> {
    if !present(&payload.title) {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }
    payload.validate()?;

    let board = state
        .store
        .update_board(
            id,
            UpdateBoard {
                title: payload.title.unwrap(),
                description: payload.description,
            },
        )
        .await?;
    Ok(Json(board))
}

/// DELETE /api/boards/:id
pub async fn delete_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete_board(id).await?;

    tracing::info!(board_id = %id, "Board deleted");
    Ok(Json(MessageResponse::new("Board deleted successfully")))
}

/// GET /api/boards/:id/tasks
///
/// Aggregate endpoint: every task of the board in one response, ordered by
/// list position then task position, so the client can render a board with
/// a single round-trip instead of one fetch per list.
pub async fn board_tasks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.store.tasks_for_board(id).await?;
    Ok(Json(tasks))
}

/// GET /api/boards/:id/members
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<BoardMember>>> {
    let members = state.store.board_members(id).await?;
    Ok(Json(members))
}

/// POST /api/boards/:id/members
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMemberPayload>,
) -> ApiResult<(StatusCode, Json<BoardMember>)> {
    let user_id = payload
        .user_id
        .ok_or_else(|| ApiError::BadRequest("user_id is required".to_string()))?;

    let member = state
        .store
        .add_member(
            id,
            AddMember {
                user_id,
                role: payload.role,
            },
        )
        .await?;

    tracing::info!(board_id = %id, user_id = %user_id, "Member added");
    Ok((StatusCode::CREATED, Json(member)))
}

/// DELETE /api/boards/:id/members/:user_id
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.remove_member(id, user_id).await?;

    tracing::info!(board_id = %id, user_id = %user_id, "Member removed");
    Ok(Json(MessageResponse::new(
        "Member removed from board successfully",
    )))
}
