//! Typed errors, storage code mapping, and the normalized `{status, message}` error.

use crate::response::ERROR_TYPE;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// PostgreSQL `invalid_datetime_format`.
pub const INVALID_DATETIME_FORMAT: &str = "22007";
/// PostgreSQL `invalid_text_representation`.
pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
/// PostgreSQL `not_null_violation`.
pub const NOT_NULL_VIOLATION: &str = "23502";

const CLIENT_INPUT_CODES: &[&str] = &[
    INVALID_DATETIME_FORMAT,
    INVALID_TEXT_REPRESENTATION,
    NOT_NULL_VIOLATION,
];

pub const FALLBACK_MESSAGE: &str = "Something broke!";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {var}: {value}")]
    Env { var: &'static str, value: String },
}

/// Failure reported by the storage collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A one-row statement returned nothing.
    #[error("query returned no rows")]
    NoRows,
    #[error("database error {code}: {message}")]
    Database { code: String, message: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage: {0}")]
    Other(String),
}

impl StoreError {
    /// Machine-readable SQLSTATE when the database rejected the statement.
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Database { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NoRows,
            sqlx::Error::Database(db) => StoreError::Database {
                code: db.code().map(|c| c.into_owned()).unwrap_or_default(),
                message: db.message().to_string(),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Other(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Raised with an explicit status: validation and not-found checks before storage.
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(e.into())
    }
}

impl AppError {
    /// Error with an explicit status. Without a message the status-keyed default is used.
    pub fn with_status(status: StatusCode, message: Option<&str>) -> Self {
        AppError::Status {
            status,
            message: message
                .map(str::to_string)
                .unwrap_or_else(|| default_message(status).to_string()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Status {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::with_status(StatusCode::NOT_FOUND, None)
    }
}

pub fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal server error",
        _ => FALLBACK_MESSAGE,
    }
}

/// The only error shape that crosses the API boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NormalizedError {
    pub status: u16,
    pub message: String,
}

impl NormalizedError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Explicit status wins; otherwise the storage outcome decides; otherwise 500.
/// Database text is never copied into the message.
pub fn normalize(err: &AppError) -> NormalizedError {
    let (status, message) = match err {
        AppError::Status { status, message } => {
            let message = if message.is_empty() {
                default_message(*status).to_string()
            } else {
                message.clone()
            };
            (*status, message)
        }
        AppError::Store(StoreError::NoRows) => {
            (StatusCode::NOT_FOUND, default_message(StatusCode::NOT_FOUND).to_string())
        }
        AppError::Store(e) if e.code().is_some_and(|c| CLIENT_INPUT_CODES.contains(&c)) => {
            (StatusCode::BAD_REQUEST, default_message(StatusCode::BAD_REQUEST).to_string())
        }
        AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_MESSAGE.to_string()),
    };
    NormalizedError {
        status: status.as_u16(),
        message,
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: NormalizedError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let normalized = normalize(&self);
        let status = normalized.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = normalized.status, "request failed");
        } else if let AppError::Store(e) = &self {
            tracing::warn!(error = %e, status = normalized.status, "storage rejected request");
        }
        let body = ErrorBody {
            kind: ERROR_TYPE,
            data: normalized,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(code: &str) -> AppError {
        AppError::Store(StoreError::Database {
            code: code.into(),
            message: format!("relation \"todos\" violated {}", code),
        })
    }

    #[test]
    fn explicit_status_is_preserved() {
        let n = normalize(&AppError::validation("Required column value missing"));
        assert_eq!(n, NormalizedError { status: 400, message: "Required column value missing".into() });
        let n = normalize(&AppError::with_status(StatusCode::CONFLICT, Some("taken")));
        assert_eq!(n.status, 409);
        assert_eq!(n.message, "taken");
    }

    #[test]
    fn status_keyed_default_messages() {
        assert_eq!(normalize(&AppError::not_found()).message, "Not found");
        assert_eq!(
            normalize(&AppError::with_status(StatusCode::INTERNAL_SERVER_ERROR, None)).message,
            "Internal server error"
        );
        assert_eq!(
            normalize(&AppError::with_status(StatusCode::BAD_REQUEST, None)).message,
            "Something broke!"
        );
    }

    #[test]
    fn no_rows_maps_to_404() {
        let n = normalize(&AppError::from(sqlx::Error::RowNotFound));
        assert_eq!(n, NormalizedError { status: 404, message: "Not found".into() });
    }

    #[test]
    fn client_input_codes_map_to_400_without_leaking_db_text() {
        for code in [NOT_NULL_VIOLATION, INVALID_DATETIME_FORMAT, INVALID_TEXT_REPRESENTATION] {
            let n = normalize(&db(code));
            assert_eq!(n.status, 400, "code {}", code);
            assert!(!n.message.contains("todos"));
        }
    }

    #[test]
    fn anything_else_is_500() {
        assert_eq!(normalize(&db("23505")).status, 500);
        assert_eq!(normalize(&db("")).status, 500);
        let n = normalize(&AppError::from(sqlx::Error::PoolTimedOut));
        assert_eq!(n, NormalizedError { status: 500, message: "Something broke!".into() });
        let n = normalize(&AppError::Store(StoreError::Other("boom".into())));
        assert_eq!(n.message, "Something broke!");
    }

    #[test]
    fn pool_timeout_is_unavailable() {
        assert!(matches!(StoreError::from(sqlx::Error::PoolTimedOut), StoreError::Unavailable(_)));
    }
}
