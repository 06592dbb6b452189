/// User route handlers
///
/// # Endpoints
///
/// ```text
/// GET    /api/users          List all users
/// POST   /api/users          Create a user (409 on duplicate email)
/// GET    /api/users/:id      Get a user
/// PUT    /api/users/:id      Update a user's email and name
/// DELETE /api/users/:id      Delete a user
/// ```
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Json, Path},
    routes::{present, MessageResponse},
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use taskboard_shared::models::{CreateUser, UpdateUser, User};

/// Request body for creating or updating a user
///
/// Both fields are required; blank strings count as missing.
#[derive(Debug, Deserialize, Validate)]
pub struct UserPayload {
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,

    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: Option<String>,
}

impl UserPayload {
    fn into_fields(self) -> ApiResult<(String, String)> {
        if !present(&self.email) || !present(&self.name) {
            return Err(ApiError::BadRequest("email and name are required".to_string()));
        }
        self.validate()?;
        Ok((self.email.unwrap(), self.name.unwrap()))
    }
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = state.store.get_user(id).await?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let (email, name) = payload.into_fields()?;

    let user = state.store.create_user(CreateUser { email, name }).await?;

    tracing::info!(user_id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<User>> {
    let (email, name) = payload.into_fields()?;

    let user = state.store.update_user(id, UpdateUser { email, name }).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete_user(id).await?;

    tracing::info!(user_id = %id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
