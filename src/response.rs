//! Standard response envelope: `{ "type": ..., "data": ... }`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `type` marker on successful todo responses.
pub const TODO_TYPE: &str = "todo";
/// `type` marker on normalized errors.
pub const ERROR_TYPE: &str = "error";

#[derive(Serialize)]
pub struct Envelope<T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: T,
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            kind: TODO_TYPE,
            data,
        }),
    )
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope {
            kind: TODO_TYPE,
            data,
        }),
    )
}
