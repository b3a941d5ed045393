//! Todo service: whitelisted dynamic SQL over PostgreSQL with normalized API errors.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Config, DbConfig, ServerConfig};
pub use error::{normalize, AppError, ConfigError, NormalizedError, StoreError};
pub use model::Todo;
pub use response::{success_created, success_ok, ERROR_TYPE, TODO_TYPE};
pub use routes::{app, common_routes, todo_routes};
pub use service::TodoService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_todos_table, PgStore, TodoStore};
