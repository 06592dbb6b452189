//! # Taskboard API Server
//!
//! REST backend for the Taskboard Kanban application, serving boards,
//! lists, tasks, users, and board memberships.
//!
//! ## Architecture
//!
//! Built with Axum on top of a pluggable storage layer:
//! - `STORAGE=memory` (default): process-local store seeded with demo data
//! - `STORAGE=postgres`: PostgreSQL via sqlx, pooled connections
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskboard-api
//! ```

use std::sync::Arc;

use taskboard_api::{
    app::{build_router, AppState},
    config::{Config, StorageBackend},
};
use taskboard_shared::{
    db::pool::{create_pool, DatabaseConfig},
    store::{memory::MemoryStore, postgres::PgStore, BoardStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let store: Arc<dyn BoardStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage (demo data seeded, lost on restart)");
            Arc::new(MemoryStore::with_demo_data())
        }
        StorageBackend::Postgres => {
            // from_env guarantees the URL is present for this backend
            let url = config
                .storage
                .database_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;

            let pool = create_pool(DatabaseConfig {
                url,
                max_connections: config.storage.database_max_connections,
                ..Default::default()
            })
            .await?;

            tracing::info!("Using PostgreSQL storage");
            Arc::new(PgStore::new(pool))
        }
    };

    let bind_address = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
