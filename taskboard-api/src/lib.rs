//! # Taskboard API Server Library
//!
//! REST backend for the Taskboard Kanban application.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors whose rejections use the JSON wire format
//! - `routes`: API route handlers, one module per resource

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
