/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD
/// - `boards`: Boards, board members, and the aggregate tasks endpoint
/// - `lists`: Lists within a board
/// - `tasks`: Tasks, including move and toggle
use serde::{Deserialize, Serialize};

pub mod boards;
pub mod health;
pub mod lists;
pub mod tasks;
pub mod users;

/// Body of the confirmation responses sent after deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// True when a required text field is present and non-blank
pub(crate) fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
