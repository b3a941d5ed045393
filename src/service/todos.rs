//! Todo operations: validate, scaffold, assemble, execute.

use crate::error::AppError;
use crate::model::{Todo, REQUIRED_ON_CREATE, TABLE, VALID_COLUMNS};
use crate::service::validation::{RequestValidator, NO_VALID_COLUMN, REQUIRED_MISSING};
use crate::sql::{build_scaffold, delete, insert, select_by_id, select_list, update, ListOrder};
use crate::store::TodoStore;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

pub struct TodoService;

impl TodoService {
    /// All todos, optionally limited to one calendar day.
    pub async fn list(
        store: &dyn TodoStore,
        date: Option<NaiveDate>,
        order: ListOrder,
    ) -> Result<Vec<Todo>, AppError> {
        let q = select_list(TABLE, date, order);
        Ok(store.any(&q).await?)
    }

    /// Insert one todo. `date` and `name` must be present and non-null.
    pub async fn create(store: &dyn TodoStore, body: &HashMap<String, Value>) -> Result<Todo, AppError> {
        if !RequestValidator::all_required_present(body, REQUIRED_ON_CREATE) {
            return Err(AppError::validation(REQUIRED_MISSING));
        }
        let scaffold = build_scaffold(body, VALID_COLUMNS, None);
        let q = insert(TABLE, &scaffold);
        Ok(store.one(&q).await?)
    }

    /// Zero rows surfaces as `StoreError::NoRows`, normalized to 404.
    pub async fn read(store: &dyn TodoStore, id: i64) -> Result<Todo, AppError> {
        let q = select_by_id(TABLE, id);
        Ok(store.one(&q).await?)
    }

    /// Partial update. Only whitelisted columns present in `body` are set.
    pub async fn update(
        store: &dyn TodoStore,
        id: i64,
        body: &HashMap<String, Value>,
    ) -> Result<Todo, AppError> {
        if !RequestValidator::any_present(body, VALID_COLUMNS) {
            return Err(AppError::validation(NO_VALID_COLUMN));
        }
        let scaffold = build_scaffold(body, VALID_COLUMNS, Some(id));
        let q = update(TABLE, &scaffold).ok_or_else(|| AppError::validation(NO_VALID_COLUMN))?;
        Ok(store.one(&q).await?)
    }

    /// Delete and return the removed row.
    pub async fn delete(store: &dyn TodoStore, id: i64) -> Result<Todo, AppError> {
        let q = delete(TABLE, id);
        Ok(store.one(&q).await?)
    }
}
