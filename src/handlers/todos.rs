//! Todo handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::response::{success_created, success_ok};
use crate::service::TodoService;
use crate::sql::{parse_date_filter, ListOrder};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<i64, AppError> {
    let Path(id_str) = path.map_err(|e| AppError::validation(e.body_text()))?;
    id_str
        .parse()
        .map_err(|_| AppError::validation(format!("invalid id '{}'", id_str)))
}

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<HashMap<String, Value>, AppError> {
    let Json(value) = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::with_status(StatusCode::PAYLOAD_TOO_LARGE, None)
        } else {
            AppError::validation(e.body_text())
        }
    })?;
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::validation("body must be a JSON object")),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let mut order = ListOrder::default();
    let mut date = None;
    for (k, v) in &params {
        match k.as_str() {
            "date" if !v.is_empty() => date = Some(parse_date_filter(v)?),
            "order_col" => order.column = v.parse()?,
            "order_dir" => order.direction = v.parse()?,
            _ => {}
        }
    }
    let rows = TodoService::list(state.store.as_ref(), date, order).await?;
    Ok(success_ok(rows))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let row = TodoService::create(state.store.as_ref(), &body).await?;
    tracing::info!(id = row.id, "todo created");
    Ok(success_created(row))
}

pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(path)?;
    let row = TodoService::read(state.store.as_ref(), id).await?;
    Ok(success_ok(row))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(path)?;
    let body = body_to_map(body)?;
    let row = TodoService::update(state.store.as_ref(), id, &body).await?;
    Ok(success_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(path)?;
    let row = TodoService::delete(state.store.as_ref(), id).await?;
    tracing::info!(id = row.id, "todo deleted");
    Ok(success_ok(row))
}
