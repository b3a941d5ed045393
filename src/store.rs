//! Storage collaborator: runs assembled statements against PostgreSQL.

use crate::config::DbConfig;
use crate::error::StoreError;
use crate::model::{Todo, CREATE_TABLE};
use crate::sql::{PgBindValue, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::QueryAs;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::time::Duration;

/// Executes one statement per call. No retries; failures return immediately.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Exactly one row, or `StoreError::NoRows`.
    async fn one(&self, q: &QueryBuf) -> Result<Todo, StoreError>;

    /// Zero or more rows.
    async fn any(&self, q: &QueryBuf) -> Result<Vec<Todo>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Lazily connecting pool built from config. Acquire timeouts surface as `StoreError::Unavailable`.
    pub fn connect_lazy(config: &DbConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(config.connect_options()?);
        Ok(PgStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn bind<'q>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, Todo, PgArguments> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Todo>(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        query
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn one(&self, q: &QueryBuf) -> Result<Todo, StoreError> {
        Ok(Self::bind(q).fetch_one(&self.pool).await?)
    }

    async fn any(&self, q: &QueryBuf) -> Result<Vec<Todo>, StoreError> {
        Ok(Self::bind(q).fetch_all(&self.pool).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the configured database if missing, connecting through the `postgres` maintenance db.
pub async fn ensure_database_exists(config: &DbConfig) -> Result<(), StoreError> {
    let opts = config.connect_options()?;
    let db_name = opts.get_database().unwrap_or_default().to_string();
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn = opts.database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create the `todos` table when it does not exist yet.
pub async fn ensure_todos_table(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_database_names() {
        assert_eq!(quote_ident("todo"), "\"todo\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
