/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::store::memory::MemoryStore;
/// use std::sync::Arc;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::with_demo_data()), config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use taskboard_shared::store::BoardStore;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning. Handlers only see the
/// `BoardStore` trait, so the same router serves both the in-memory and
/// the PostgreSQL backend.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub store: Arc<dyn BoardStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn BoardStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                       # Health check
/// └── /api/
///     ├── /users/                   # User CRUD
///     ├── /boards/                  # Boards, members, aggregate tasks
///     ├── /lists/                   # Lists within a board
///     └── /tasks/                   # Tasks, move, toggle
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check at the root, outside the /api prefix
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/", post(routes::users::create_user))
        .route("/:id", get(routes::users::get_user))
        .route("/:id", put(routes::users::update_user))
        .route("/:id", delete(routes::users::delete_user));

    let board_routes = Router::new()
        .route("/", get(routes::boards::list_boards))
        .route("/", post(routes::boards::create_board))
        .route("/:id", get(routes::boards::get_board))
        .route("/:id", put(routes::boards::update_board))
        .route("/:id", delete(routes::boards::delete_board))
        .route("/:id/tasks", get(routes::boards::board_tasks))
        .route("/:id/members", get(routes::boards::list_members))
        .route("/:id/members", post(routes::boards::add_member))
        .route("/:id/members/:user_id", delete(routes::boards::remove_member));

    let list_routes = Router::new()
        .route("/", get(routes::lists::list_lists))
        .route("/", post(routes::lists::create_list))
        .route("/:id", get(routes::lists::get_list))
        .route("/:id", put(routes::lists::update_list))
        .route("/:id", delete(routes::lists::delete_list));

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/move", patch(routes::tasks::move_task))
        .route("/:id/toggle", patch(routes::tasks::toggle_task));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/boards", board_routes)
        .nest("/lists", list_routes)
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
