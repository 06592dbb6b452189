/// Typed HTTP client for the Taskboard API
///
/// One method per endpoint, reusing the shared model and input types so
/// request and response bodies cannot drift from the server.
///
/// # Example
///
/// ```no_run
/// use taskboard_client::ApiClient;
/// use taskboard_shared::DEMO_USER_ID;
///
/// # async fn example() -> Result<(), taskboard_client::ClientError> {
/// let client = ApiClient::new("http://localhost:8080");
/// let boards = client.boards(DEMO_USER_ID).await?;
/// for board in boards {
///     println!("{}: {}", board.id, board.title);
/// }
/// # Ok(())
/// # }
/// ```
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use taskboard_shared::models::{
    AddMember, Board, BoardMember, BoardWithMembers, CreateBoard, CreateList, CreateTask,
    CreateUser, List, MoveTask, Task, UpdateBoard, UpdateList, UpdateTask, UpdateUser, User,
};

/// Errors surfaced by the API client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad JSON)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status and an `{ "error": ... }` body
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the error body
        message: String,
    },
}

/// Shape of the server's error bodies
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Body of delete confirmations, discarded after decoding
#[derive(Debug, Deserialize)]
struct MessageBody {
    #[allow(dead_code)]
    message: String,
}

/// HTTP client bound to one Taskboard server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL (scheme, host, port; no
    /// trailing slash required)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a response into a typed value, mapping error statuses to
    /// `ClientError::Api` with the server's message
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| status.to_string());
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.patch(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.url(path)).send().await?;
        let _: MessageBody = Self::decode(response).await?;
        Ok(())
    }

    // Users

    /// GET /api/users
    pub async fn users(&self) -> Result<Vec<User>, ClientError> {
        self.get("/api/users").await
    }

    /// GET /api/users/:id
    pub async fn user(&self, id: Uuid) -> Result<User, ClientError> {
        self.get(&format!("/api/users/{id}")).await
    }

    /// POST /api/users
    pub async fn create_user(&self, data: &CreateUser) -> Result<User, ClientError> {
        self.post("/api/users", data).await
    }

    /// PUT /api/users/:id
    pub async fn update_user(&self, id: Uuid, data: &UpdateUser) -> Result<User, ClientError> {
        self.put(&format!("/api/users/{id}"), data).await
    }

    /// DELETE /api/users/:id
    pub async fn delete_user(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/users/{id}")).await
    }

    // Boards

    /// GET /api/boards?user_id=<uuid>
    pub async fn boards(&self, user_id: Uuid) -> Result<Vec<Board>, ClientError> {
        self.get(&format!("/api/boards?user_id={user_id}")).await
    }

    /// GET /api/boards/:id
    pub async fn board(&self, id: Uuid) -> Result<BoardWithMembers, ClientError> {
        self.get(&format!("/api/boards/{id}")).await
    }

    /// POST /api/boards
    pub async fn create_board(&self, data: &CreateBoard) -> Result<Board, ClientError> {
        self.post("/api/boards", data).await
    }

    /// PUT /api/boards/:id
    pub async fn update_board(
        &self,
        id: Uuid,
        data: &UpdateBoard,
    ) -> Result<Board, ClientError> {
        self.put(&format!("/api/boards/{id}"), data).await
    }

    /// DELETE /api/boards/:id
    pub async fn delete_board(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/boards/{id}")).await
    }

    /// GET /api/boards/:id/tasks — every task of the board in one call
    pub async fn board_tasks(&self, id: Uuid) -> Result<Vec<Task>, ClientError> {
        self.get(&format!("/api/boards/{id}/tasks")).await
    }

    // Board members

    /// GET /api/boards/:id/members
    pub async fn members(&self, board_id: Uuid) -> Result<Vec<BoardMember>, ClientError> {
        self.get(&format!("/api/boards/{board_id}/members")).await
    }

    /// POST /api/boards/:id/members
    pub async fn add_member(
        &self,
        board_id: Uuid,
        data: &AddMember,
    ) -> Result<BoardMember, ClientError> {
        self.post(&format!("/api/boards/{board_id}/members"), data)
            .await
    }

    /// DELETE /api/boards/:id/members/:user_id
    pub async fn remove_member(&self, board_id: Uuid, user_id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/boards/{board_id}/members/{user_id}"))
            .await
    }

    // Lists

    /// GET /api/lists?board_id=<uuid>
    pub async fn lists(&self, board_id: Uuid) -> Result<Vec<List>, ClientError> {
        self.get(&format!("/api/lists?board_id={board_id}")).await
    }

    /// POST /api/lists
    pub async fn create_list(&self, data: &CreateList) -> Result<List, ClientError> {
        self.post("/api/lists", data).await
    }

    /// PUT /api/lists/:id
    pub async fn update_list(&self, id: Uuid, data: &UpdateList) -> Result<List, ClientError> {
        self.put(&format!("/api/lists/{id}"), data).await
    }

    /// DELETE /api/lists/:id
    pub async fn delete_list(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/lists/{id}")).await
    }

    // Tasks

    /// GET /api/tasks?list_id=<uuid>
    pub async fn tasks(&self, list_id: Uuid) -> Result<Vec<Task>, ClientError> {
        self.get(&format!("/api/tasks?list_id={list_id}")).await
    }

    /// GET /api/tasks/:id
    pub async fn task(&self, id: Uuid) -> Result<Task, ClientError> {
        self.get(&format!("/api/tasks/{id}")).await
    }

    /// POST /api/tasks
    pub async fn create_task(&self, data: &CreateTask) -> Result<Task, ClientError> {
        self.post("/api/tasks", data).await
    }

    /// PUT /api/tasks/:id
    pub async fn update_task(&self, id: Uuid, data: &UpdateTask) -> Result<Task, ClientError> {
        self.put(&format!("/api/tasks/{id}"), data).await
    }

    /// PATCH /api/tasks/:id/move
    pub async fn move_task(&self, id: Uuid, dest: &MoveTask) -> Result<Task, ClientError> {
        self.patch(&format!("/api/tasks/{id}/move"), dest).await
    }

    /// PATCH /api/tasks/:id/toggle
    pub async fn toggle_task(&self, id: Uuid) -> Result<Task, ClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/tasks/{id}/toggle")))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// DELETE /api/tasks/:id
    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/tasks/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/api/users"), "http://localhost:8080/api/users");
    }

    #[test]
    fn test_error_body_shape() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Task not found"}"#).unwrap();
        assert_eq!(body.error, "Task not found");
    }
}
