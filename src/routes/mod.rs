//! Router assembly.

mod common;
mod todos;

pub use common::common_routes;
pub use todos::todo_routes;

use crate::config::API_V1_PATH;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application: probes at the root, todos under `/v1`.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_V1_PATH, todo_routes(state))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(body_limit)))
}
