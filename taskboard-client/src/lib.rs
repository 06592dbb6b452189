//! # Taskboard Client Library
//!
//! Typed HTTP client for the Taskboard API plus a local board view that
//! mirrors the server's drag-and-drop position rules, so the UI can
//! reorder optimistically and stay consistent with what the server will
//! persist.
//!
//! ## Module Organization
//!
//! - `api`: `ApiClient`, one typed method per endpoint
//! - `view`: `BoardView`, a client-side snapshot of one board with local
//!   move application

pub mod api;
pub mod view;

pub use api::{ApiClient, ClientError};
pub use view::BoardView;
