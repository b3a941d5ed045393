//! The todo row and its writable-column whitelist.

use crate::sql::Column;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

pub const TABLE: &str = "todos";

/// Columns clients may write, in the order they appear in generated SQL.
pub const VALID_COLUMNS: &[Column] = &[
    Column::new("completed_at", Some("timestamptz")),
    Column::new("date", Some("timestamptz")),
    Column::new("details", None),
    Column::new("order_num", Some("integer")),
    Column::new("name", None),
];

/// Must be present and non-null on create.
pub const REQUIRED_ON_CREATE: &[&str] = &["date", "name"];

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i32,
    #[serde(serialize_with = "millis")]
    pub date: DateTime<Utc>,
    pub name: String,
    pub details: Option<String>,
    pub order_num: Option<i32>,
    #[serde(serialize_with = "millis_opt")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// `2019-02-03T08:00:00.000Z`: the shape clients send, echoed back unchanged.
fn millis<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn millis_opt<S: Serializer>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
    match dt {
        Some(dt) => millis(dt, s),
        None => s.serialize_none(),
    }
}

/// DDL for the single table. Idempotent; used by the server and integration tests.
pub const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id SERIAL PRIMARY KEY,
    date TIMESTAMPTZ NOT NULL,
    name TEXT NOT NULL,
    details TEXT,
    order_num INTEGER,
    completed_at TIMESTAMPTZ
)
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_timestamps_with_millis_and_z() {
        let t = Todo {
            id: 1,
            date: Utc.with_ymd_and_hms(2019, 2, 3, 8, 0, 0).unwrap(),
            name: "Hello world!".into(),
            details: None,
            order_num: Some(2),
            completed_at: None,
        };
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["date"], json!("2019-02-03T08:00:00.000Z"));
        assert_eq!(v["completed_at"], json!(null));
        assert_eq!(v["order_num"], json!(2));
    }

    #[test]
    fn whitelist_never_contains_id() {
        assert!(VALID_COLUMNS.iter().all(|c| c.name != "id"));
        for r in REQUIRED_ON_CREATE {
            assert!(VALID_COLUMNS.iter().any(|c| c.name == *r));
        }
    }
}
