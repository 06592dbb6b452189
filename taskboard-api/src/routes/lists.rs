/// List route handlers
///
/// # Endpoints
///
/// ```text
/// GET    /api/lists?board_id=<uuid>   Lists of a board, by position
/// POST   /api/lists                   Create a list (appended when no position)
/// GET    /api/lists/:id               Get a list
/// PUT    /api/lists/:id               Update title and optionally position
/// DELETE /api/lists/:id               Delete a list (its tasks are left in place)
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

use taskboard_shared::models::{CreateList, List, UpdateList};

/// Query parameters for listing lists
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub board_id: Option<Uuid>,
}

/// Request body for creating a list
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListPayload {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub title: Option<String>,

    pub board_id: Option<Uuid>,

    pub position: Option<i32>,
}

/// Request body for updating a list
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListPayload {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub title: Option<String>,

    pub position: Option<i32>,
}

/// GET /api/lists?board_id=<uuid>
pub async fn list_lists(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<List>>> {
    let board_id = query
        .board_id
        .ok_or_else(|| ApiError::BadRequest("board_id is required".to_string()))?;

    let lists = state.store.lists_for_board(board_id).await?;
    Ok(Json(lists))
}

/// GET /api/lists/:id
pub async fn get_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<List>> {
    let list = state.store.get_list(id).await?;
    Ok(Json(list))
}

/// POST /api/lists
pub async fn create_list(
    State(state): State<AppState>,
    Json(payload): Json<CreateListPayload>,
) -> ApiResult<(StatusCode, Json<List>)> {
    if !present(&payload.title) || payload.board_id.is_none() {
        return Err(ApiError::BadRequest(
            "title and board_id are required".to_string(),
        ));
    }
    payload.validate()?;

    let list = state
        .store
        .create_list(CreateList {
            title: payload.title.unwrap(),
            board_id: payload.board_id.unwrap(),
            position: payload.position,
        })
        .await?;

    tracing::info!(list_id = %list.id, "List created");
    Ok((StatusCode::CREATED, Json(list)))
}

/// PUT /api/lists/:id
pub async fn update_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateListPayload>,
) -> ApiResult<Json<List>> {
    if !present(&payload.title) {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }
    payload.validate()?;

    let list = state
        .store
        .update_list(
            id,
            UpdateList {
                title: payload.title.unwrap(),
                position: payload.position,
            },
        )
        .await?;
    Ok(Json(list))
}

/// DELETE /api/lists/:id
pub async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete_list(id).await?;

    tracing::info!(list_id = %id, "List deleted");
    Ok(Json(MessageResponse::new("List deleted successfully")))
}
