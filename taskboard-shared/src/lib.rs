//! # Taskboard Shared Library
//!
//! This crate contains the typed models, storage backends, and business
//! logic shared by the Taskboard API server and the client library.
//!
//! ## Module Organization
//!
//! - `models`: Typed records for users, boards, lists, tasks, and board
//!   membership, plus their PostgreSQL queries
//! - `store`: The `BoardStore` repository trait and its two backends
//!   (in-memory and PostgreSQL), including the position-reassignment routine
//! - `db`: PostgreSQL connection pool management

pub mod db;
pub mod models;
pub mod store;

use uuid::Uuid;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifier of the built-in demo user.
///
/// No authentication exists anywhere in the system; this constant stands in
/// for a logged-in user on both the client and the seeded in-memory store.
pub const DEMO_USER_ID: Uuid = uuid::uuid!("550e8400-e29b-41d4-a716-446655440000");
