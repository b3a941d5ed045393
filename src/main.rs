//! Server: loads config, ensures the database and `todos` table exist, serves the API.

use std::sync::Arc;
use todo_api::{app, ensure_database_exists, ensure_todos_table, AppState, Config, PgStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todo_api=info")),
        )
        .init();

    ensure_database_exists(&config.db).await?;
    let store = PgStore::connect_lazy(&config.db)?;
    ensure_todos_table(store.pool()).await?;

    let state = AppState::new(Arc::new(store));
    let app = app(state, config.server.body_limit);

    let listener = TcpListener::bind(config.server.addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
