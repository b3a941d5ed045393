//! Todo resource routes, mounted under the API version prefix.

use crate::handlers::todos::{create, delete, list, read, update};
use crate::model::TABLE;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route(&format!("/{}", TABLE), get(list).post(create))
        .route(&format!("/{}/:id", TABLE), get(read).patch(update).delete(delete))
        .with_state(state)
}
